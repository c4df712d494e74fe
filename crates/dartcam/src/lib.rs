//! High-level facade crate for the `dartcam-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry crate ([`core`]) and the scoring crate
//!   ([`board`]),
//! - [`Session`], which pairs a rectified frame with a board model so a
//!   point picked in either the original image or the rectified canvas can
//!   be scored in one call,
//! - (feature `image`) loading, warping and overlay rendering helpers in
//!   [`render`],
//! - (feature `cli`) the `dartcam` binary.
//!
//! ## Quickstart
//!
//! ```
//! use dartcam::board::DartcamConfig;
//! use dartcam::Session;
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::from_config(&DartcamConfig::default(), None)?;
//! let result = session.score_rectified(Point2::new(400.0, 10.0))?;
//! assert_eq!(result.code, "D20");
//! # Ok(())
//! # }
//! ```

pub use dartcam_board as board;
pub use dartcam_core as core;

pub use dartcam_board::{BoardModel, DartHit, Ring, RingCalibration, ScoreResult};

mod error;
mod session;

pub use error::DartcamError;
pub use session::Session;

#[cfg(feature = "image")]
pub mod render;
