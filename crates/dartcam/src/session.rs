use crate::board::{BoardModel, DartcamConfig, ScoreResult};
use crate::core::RectifiedFrame;
use crate::DartcamError;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A calibrated camera session: the rectified frame and the board drawn in
/// it. Immutable, so one session can serve many threads.
#[derive(Clone, Debug)]
pub struct Session {
    frame: RectifiedFrame,
    board: BoardModel,
}

impl Session {
    /// Build the frame and the board from a config.
    ///
    /// `image_size` is needed to unscale corners picked on a resized
    /// display; without it the corners are used as they are.
    pub fn from_config(
        cfg: &DartcamConfig,
        image_size: Option<(u32, u32)>,
    ) -> Result<Self, DartcamError> {
        let frame = match image_size {
            Some((width, height)) => cfg.build_frame(width, height)?,
            None => {
                if cfg.points_from_resized_display {
                    log::warn!(
                        "image size unknown; display-picked corners are used as full-resolution pixels"
                    );
                }
                cfg.build_frame_unscaled()?
            }
        };
        let board = BoardModel::for_frame(&frame, &cfg.rings)?;
        Ok(Self { frame, board })
    }

    pub fn frame(&self) -> &RectifiedFrame {
        &self.frame
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    /// Score a point given in rectified canvas pixels.
    pub fn score_rectified(&self, p: Point2<f64>) -> Result<ScoreResult, DartcamError> {
        Ok(self.board.score(p)?)
    }

    /// Score a point given in original-image pixels. Returns the rectified
    /// point along with the result.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn score_image_point(
        &self,
        p_img: Point2<f64>,
    ) -> Result<(Point2<f64>, ScoreResult), DartcamError> {
        let p_rect = self.frame.to_rectified(p_img);
        log::debug!(
            "image ({:.1}, {:.1}) -> rectified ({:.2}, {:.2})",
            p_img.x,
            p_img.y,
            p_rect.x,
            p_rect.y
        );
        Ok((p_rect, self.board.score(p_rect)?))
    }
}
