//! Geometry support for dartboard cameras.
//!
//! This crate is intentionally small and purely geometric. It knows how to
//! map the four calibration points of the outer double ring onto a square,
//! axis-aligned canvas and how to resample a grayscale image into that
//! canvas. It knows nothing about scoring.

mod homography;
mod image;
mod rectify;
#[cfg(feature = "tracing")]
mod subscriber;

pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use rectify::{
    display_scale, rectify_board, warp_board_gray, OuterRingCorners, RectifiedFrame, RectifyError,
};

#[cfg(feature = "tracing")]
pub use subscriber::init_tracing;
