//! JSON configuration and report helpers.

use crate::{BoardModel, ConfigurationError, DartHit, RingCalibration, ScoreResult};
use dartcam_core::{display_scale, rectify_board, OuterRingCorners, RectifiedFrame, RectifyError};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum DartcamIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum DartcamConfigError {
    #[error(transparent)]
    Board(#[from] ConfigurationError),
    #[error(transparent)]
    Rectify(#[from] RectifyError),
}

impl RingCalibration {
    /// Load a `rings.json` calibration. The result is not validated yet;
    /// `BoardModel::new` does that.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DartcamIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DartcamIoError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn default_output_size() -> u32 {
    800
}

fn default_max_display_size() -> u32 {
    900
}

fn default_points_from_resized_display() -> bool {
    true
}

fn default_corners() -> OuterRingCorners {
    OuterRingCorners {
        top: Point2::new(291.0, 197.0),
        right: Point2::new(505.0, 414.0),
        bottom: Point2::new(291.0, 623.0),
        left: Point2::new(78.0, 414.0),
    }
}

/// Camera session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DartcamConfig {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Side of the rectified canvas in pixels.
    #[serde(default = "default_output_size")]
    pub output_size: u32,
    /// Outer double-ring points in image pixels.
    #[serde(default = "default_corners")]
    pub corners: OuterRingCorners,
    /// `corners` were picked on a display shrunk to `max_display_size`.
    #[serde(default = "default_points_from_resized_display")]
    pub points_from_resized_display: bool,
    #[serde(default = "default_max_display_size")]
    pub max_display_size: u32,
    #[serde(default)]
    pub rings: RingCalibration,
}

impl Default for DartcamConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            output_dir: None,
            output_size: default_output_size(),
            corners: default_corners(),
            points_from_resized_display: default_points_from_resized_display(),
            max_display_size: default_max_display_size(),
            rings: RingCalibration::default(),
        }
    }
}

impl DartcamConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DartcamIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DartcamIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the directory for rendered images.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("out"))
    }

    /// Calibration corners in full-resolution pixels of a `width x height`
    /// image.
    pub fn image_corners(&self, width: u32, height: u32) -> OuterRingCorners {
        if self.points_from_resized_display {
            self.corners
                .unscaled(display_scale(width, height, self.max_display_size))
        } else {
            self.corners
        }
    }

    /// Rectified frame for an image of the given size.
    pub fn build_frame(&self, width: u32, height: u32) -> Result<RectifiedFrame, RectifyError> {
        rectify_board(&self.image_corners(width, height), self.output_size)
    }

    /// Rectified frame when the image size is unknown; corners are taken
    /// as full-resolution pixels.
    pub fn build_frame_unscaled(&self) -> Result<RectifiedFrame, RectifyError> {
        rectify_board(&self.corners, self.output_size)
    }

    /// Board model filling the rectified canvas.
    pub fn build_board(&self) -> Result<BoardModel, DartcamConfigError> {
        if self.output_size < 2 {
            return Err(RectifyError::InvalidOutputSize(self.output_size).into());
        }
        let half = f64::from(self.output_size / 2);
        Ok(BoardModel::new(
            Point2::new(half, half),
            half,
            &self.rings,
        )?)
    }
}

/// Scored point written by the CLI's `--report` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Point as given on the command line.
    pub point: Point2<f64>,
    /// Point in rectified canvas pixels.
    pub rectified_point: Point2<f64>,
    pub result: ScoreResult,
    pub hit: DartHit,
}

impl ScoreReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DartcamIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DartcamIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: DartcamConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DartcamConfig::default());
        assert_eq!(cfg.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn board_fills_the_canvas() {
        let cfg = DartcamConfig {
            output_size: 801,
            ..DartcamConfig::default()
        };
        let board = cfg.build_board().unwrap();
        assert_eq!(board.center(), Point2::new(400.0, 400.0));
        assert_eq!(board.radius(), 400.0);
    }

    #[test]
    fn tiny_canvas_is_a_config_error() {
        let cfg = DartcamConfig {
            output_size: 1,
            ..DartcamConfig::default()
        };
        assert!(matches!(
            cfg.build_board(),
            Err(DartcamConfigError::Rectify(RectifyError::InvalidOutputSize(1)))
        ));
    }

    #[test]
    fn image_corners_respect_display_flag() {
        let mut cfg = DartcamConfig::default();
        assert_eq!(cfg.image_corners(1800, 1800).top, Point2::new(582.0, 394.0));
        cfg.points_from_resized_display = false;
        assert_eq!(cfg.image_corners(1800, 1800), cfg.corners);
    }
}
