//! Image loading, board warping and overlay rendering (feature `image`).

use crate::board::BoardModel;
use crate::core::{warp_board_gray, GrayImage, GrayImageView, RectifiedFrame};
use crate::DartcamError;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

const OVERLAY_VALUE: u8 = 255;
const CENTER_DOT_RADIUS: f64 = 6.0;

/// Load an image from disk as 8-bit grayscale.
pub fn load_gray(path: &Path) -> Result<::image::GrayImage, DartcamError> {
    let img = ::image::open(path).map_err(|source| DartcamError::Image {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Borrow an `image::GrayImage` as a core view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Write a core gray image as PNG (format chosen by extension).
pub fn save_gray(img: &GrayImage, path: &Path) -> Result<(), DartcamError> {
    ::image::save_buffer(
        path,
        &img.data,
        img.width as u32,
        img.height as u32,
        ::image::ColorType::L8,
    )
    .map_err(|source| DartcamError::Image {
        path: path.display().to_string(),
        source,
    })
}

/// Pixels within one pixel inside `radius` of `center`.
fn draw_circle(canvas: &mut GrayImage, cx: f64, cy: f64, radius: f64, value: u8) {
    let r_outer = radius.max(1.0);
    let r_inner = (r_outer - 1.0).max(0.0);
    let span = r_outer.ceil() as i64;
    let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);

    for y in (cy_i - span)..=(cy_i + span) {
        for x in (cx_i - span)..=(cx_i + span) {
            let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
            if d <= r_outer && d >= r_inner {
                canvas.put(x, y, value);
            }
        }
    }
}

fn fill_disc(canvas: &mut GrayImage, cx: f64, cy: f64, radius: f64, value: u8) {
    let span = radius.ceil() as i64;
    let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
    let r_sq = radius * radius;

    for y in (cy_i - span)..=(cy_i + span) {
        for x in (cx_i - span)..=(cx_i + span) {
            if (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2) <= r_sq {
                canvas.put(x, y, value);
            }
        }
    }
}

/// Bresenham segment between two pixel positions.
fn draw_line(canvas: &mut GrayImage, from: (i64, i64), to: (i64, i64), value: u8) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        canvas.put(x, y, value);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Copy of `rectified` with the board geometry drawn on top: center dot,
/// the six ring boundaries and the 20 wedge boundaries.
pub fn draw_overlay(rectified: &GrayImage, board: &BoardModel) -> GrayImage {
    let mut canvas = rectified.clone();
    let c = board.center();

    fill_disc(&mut canvas, c.x, c.y, CENTER_DOT_RADIUS, OVERLAY_VALUE);
    for r in board.radii().to_array() {
        draw_circle(&mut canvas, c.x, c.y, r, OVERLAY_VALUE);
    }

    let from = (c.x.round() as i64, c.y.round() as i64);
    for theta in board.wedge_boundaries() {
        let to = (
            (c.x + board.radius() * theta.sin()).round() as i64,
            (c.y - board.radius() * theta.cos()).round() as i64,
        );
        draw_line(&mut canvas, from, to, OVERLAY_VALUE);
    }
    canvas
}

/// Paths written by [`render_to_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImages {
    pub warped: PathBuf,
    pub overlay: PathBuf,
}

/// Warp `img` into `frame`, draw the board overlay and save
/// `warped_<size>.png` plus `overlay_<size>.png` into `out_dir`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, frame, board), fields(size = frame.size))
)]
pub fn render_to_dir(
    img: &::image::GrayImage,
    frame: &RectifiedFrame,
    board: &BoardModel,
    out_dir: &Path,
) -> Result<RenderedImages, DartcamError> {
    fs::create_dir_all(out_dir).map_err(|source| DartcamError::OutputDir {
        path: out_dir.display().to_string(),
        source,
    })?;

    let warped = warp_board_gray(&gray_view(img), frame);
    let overlay = draw_overlay(&warped, board);

    let paths = RenderedImages {
        warped: out_dir.join(format!("warped_{}.png", frame.size)),
        overlay: out_dir.join(format!("overlay_{}.png", frame.size)),
    };
    save_gray(&warped, &paths.warped)?;
    save_gray(&overlay, &paths.overlay)?;
    log::info!(
        "saved {} and {}",
        paths.warped.display(),
        paths.overlay.display()
    );
    Ok(paths)
}
