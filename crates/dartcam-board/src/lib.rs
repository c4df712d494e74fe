//! Dartboard scoring in rectified image space.
//!
//! A [`BoardModel`] is built once per calibration session from the board
//! center, the outer double-ring radius and a [`RingCalibration`]. It then
//! turns any point of the rectified image into a [`ScoreResult`]:
//!
//! - the distance from the center selects the [`Ring`],
//! - the clockwise angle from straight up (plus the calibrated offset)
//!   selects one of the 20 wedges of [`SECTOR_NUMBERS`],
//! - bulls and misses are scored without a sector lookup.
//!
//! ```
//! use dartcam_board::{BoardModel, RingCalibration};
//! use nalgebra::Point2;
//!
//! let board = BoardModel::new(Point2::new(400.0, 400.0), 400.0, &RingCalibration::default())?;
//! let result = board.score(Point2::new(400.0, 160.0))?;
//! assert_eq!(result.code, "T20");
//! assert_eq!(result.points, 60);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod board;
mod calibration;
mod error;
mod hit;
mod io;
mod result;
mod ring;
mod sanity;
mod sector;

pub use board::{BoardModel, RingRadii};
pub use calibration::RingCalibration;
pub use error::{ConfigurationError, InvalidPointError};
pub use hit::{DartHit, HitMultiplier, BULL_SEGMENT};
pub use io::{DartcamConfig, DartcamConfigError, DartcamIoError, ScoreReport};
pub use result::ScoreResult;
pub use ring::Ring;
pub use sanity::{sanity_points, SanityProbe};
pub use sector::{SECTOR_COUNT, SECTOR_NUMBERS, SECTOR_WIDTH};
