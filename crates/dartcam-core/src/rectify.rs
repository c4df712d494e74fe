//! Rectification of the board from four calibration points on the outer
//! edge of the double ring.
//!
//! The rectified frame is a square `size x size` canvas in which the board
//! is centered and axis-aligned: the top calibration point lands on the
//! middle of the top edge, the right point on the middle of the right edge,
//! and so on. Scoring happens in this frame.

use crate::{homography_from_4pt, warp_perspective_gray, GrayImage, GrayImageView, Homography};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RectifyError {
    #[error("output size must be >= 2 (got {0})")]
    InvalidOutputSize(u32),
    #[error("calibration corner `{name}` is not finite")]
    NonFiniteCorner { name: &'static str },
    #[error("calibration corners are degenerate (three or more collinear)")]
    Degenerate,
    #[error("homography not invertible")]
    NonInvertible,
}

/// Points on the outer edge of the double ring, in original-image pixels.
///
/// `top` sits straight above the bull in the physical board frame, the
/// others follow clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OuterRingCorners {
    pub top: Point2<f64>,
    pub right: Point2<f64>,
    pub bottom: Point2<f64>,
    pub left: Point2<f64>,
}

impl OuterRingCorners {
    /// Corners in homography order: top, right, bottom, left.
    pub fn to_array(&self) -> [Point2<f64>; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Convert points picked on a display scaled by `scale` back to the
    /// full-resolution image. Coordinates are rounded to whole pixels.
    pub fn unscaled(&self, scale: f64) -> Self {
        if scale == 1.0 {
            return *self;
        }
        let unscale = |p: Point2<f64>| Point2::new((p.x / scale).round(), (p.y / scale).round());
        Self {
            top: unscale(self.top),
            right: unscale(self.right),
            bottom: unscale(self.bottom),
            left: unscale(self.left),
        }
    }

    fn check_finite(&self) -> Result<(), RectifyError> {
        let named = [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ];
        match named
            .iter()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            Some(&(name, _)) => Err(RectifyError::NonFiniteCorner { name }),
            None => Ok(()),
        }
    }
}

/// Scale factor used to fit a `width x height` image into a display of
/// `max_size` pixels; never upscales.
pub fn display_scale(width: u32, height: u32, max_size: u32) -> f64 {
    let max = f64::from(max_size);
    (max / f64::from(width.max(1)))
        .min(max / f64::from(height.max(1)))
        .min(1.0)
}

/// Square rectified frame with the board centered in it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectifiedFrame {
    /// Canvas side in pixels.
    pub size: u32,
    /// Board center in rectified pixels.
    pub center: Point2<f64>,
    /// Outer double-ring radius in rectified pixels.
    pub radius: f64,
    pub h_rect_from_img: Homography,
    pub h_img_from_rect: Homography,
}

impl RectifiedFrame {
    /// Map an original-image point into the rectified frame.
    #[inline]
    pub fn to_rectified(&self, p_img: Point2<f64>) -> Point2<f64> {
        self.h_rect_from_img.apply(p_img)
    }

    /// Map a rectified point back into the original image.
    #[inline]
    pub fn to_image(&self, p_rect: Point2<f64>) -> Point2<f64> {
        self.h_img_from_rect.apply(p_rect)
    }
}

/// Solve the homography sending the four calibration corners to the edge
/// midpoints of an `output_size` square canvas.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(corners)))]
pub fn rectify_board(
    corners: &OuterRingCorners,
    output_size: u32,
) -> Result<RectifiedFrame, RectifyError> {
    if output_size < 2 {
        return Err(RectifyError::InvalidOutputSize(output_size));
    }
    corners.check_finite()?;

    let s = f64::from(output_size);
    let c = f64::from(output_size / 2);
    let dst = [
        Point2::new(c, 0.0),
        Point2::new(s, c),
        Point2::new(c, s),
        Point2::new(0.0, c),
    ];

    let h_rect_from_img =
        homography_from_4pt(&corners.to_array(), &dst).ok_or(RectifyError::Degenerate)?;
    let h_img_from_rect = h_rect_from_img
        .inverse()
        .ok_or(RectifyError::NonInvertible)?;

    log::debug!(
        "rectified board into {output_size}x{output_size} canvas, H = {:?}",
        h_rect_from_img.to_array()
    );

    Ok(RectifiedFrame {
        size: output_size,
        center: Point2::new(c, c),
        radius: c,
        h_rect_from_img,
        h_img_from_rect,
    })
}

/// Resample `src` into the rectified frame.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, frame), fields(width = src.width, height = src.height))
)]
pub fn warp_board_gray(src: &GrayImageView<'_>, frame: &RectifiedFrame) -> GrayImage {
    let side = frame.size as usize;
    warp_perspective_gray(src, &frame.h_img_from_rect, side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_corners() -> OuterRingCorners {
        OuterRingCorners {
            top: Point2::new(291.0, 197.0),
            right: Point2::new(505.0, 414.0),
            bottom: Point2::new(291.0, 623.0),
            left: Point2::new(78.0, 414.0),
        }
    }

    #[test]
    fn corners_land_on_canvas_edge_midpoints() {
        let frame = rectify_board(&sample_corners(), 800).expect("frame");
        assert_eq!(frame.size, 800);
        assert_eq!(frame.radius, 400.0);

        let expected = [(400.0, 0.0), (800.0, 400.0), (400.0, 800.0), (0.0, 400.0)];
        for (p, (ex, ey)) in sample_corners().to_array().into_iter().zip(expected) {
            let q = frame.to_rectified(p);
            assert_relative_eq!(q.x, ex, epsilon = 1e-6);
            assert_relative_eq!(q.y, ey, epsilon = 1e-6);
        }
    }

    #[test]
    fn diagonal_intersection_maps_to_center() {
        let frame = rectify_board(&sample_corners(), 800).expect("frame");
        let q = frame.to_rectified(Point2::new(291.0, 414.0));
        assert_relative_eq!(q.x, frame.center.x, epsilon = 1e-6);
        assert_relative_eq!(q.y, frame.center.y, epsilon = 1e-6);

        let back = frame.to_image(q);
        assert_relative_eq!(back.x, 291.0, epsilon = 1e-6);
        assert_relative_eq!(back.y, 414.0, epsilon = 1e-6);
    }

    #[test]
    fn odd_canvas_uses_integer_center() {
        let frame = rectify_board(&sample_corners(), 801).expect("frame");
        assert_eq!(frame.center, Point2::new(400.0, 400.0));
        assert_eq!(frame.radius, 400.0);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            rectify_board(&sample_corners(), 1).unwrap_err(),
            RectifyError::InvalidOutputSize(1)
        );

        let mut corners = sample_corners();
        corners.left.x = f64::NAN;
        assert_eq!(
            rectify_board(&corners, 800).unwrap_err(),
            RectifyError::NonFiniteCorner { name: "left" }
        );

        let p = Point2::new(10.0, 10.0);
        let collapsed = OuterRingCorners {
            top: p,
            right: p,
            bottom: p,
            left: p,
        };
        assert_eq!(
            rectify_board(&collapsed, 800).unwrap_err(),
            RectifyError::Degenerate
        );
    }

    #[test]
    fn display_unscale_restores_full_resolution() {
        let scale = display_scale(1800, 1200, 900);
        assert_relative_eq!(scale, 0.5);
        assert_eq!(display_scale(640, 480, 900), 1.0);

        let full = sample_corners().unscaled(scale);
        assert_eq!(full.top, Point2::new(582.0, 394.0));
        assert_eq!(full.left, Point2::new(156.0, 828.0));
        assert_eq!(sample_corners().unscaled(1.0), sample_corners());
    }

    #[test]
    fn corners_serialize_as_coordinate_pairs() {
        let json = serde_json::to_value(sample_corners()).expect("json");
        assert_eq!(json["top"], serde_json::json!([291.0, 197.0]));
    }
}
