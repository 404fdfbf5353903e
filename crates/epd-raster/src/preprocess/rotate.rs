//! Counter-clockwise rotation with an expanded canvas.
//!
//! Right angles are exact pixel permutations. Any other angle is resampled
//! bilinearly onto a canvas large enough to hold every corner of the source,
//! with the uncovered area painted in the background color.

use image::{imageops, Rgb, RgbImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use tracing::debug;

/// Normalize an angle in degrees to `0.0..360.0`.
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Size of the axis-aligned box that holds a `width`×`height` image rotated
/// by `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = (normalize_degrees(degrees) as f64).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (width as f64, height as f64);
    // shave float noise so 90.0000001 does not grow the box by a pixel
    let bw = (w * cos + h * sin - 1e-6).ceil().max(1.0);
    let bh = (w * sin + h * cos - 1e-6).ceil().max(1.0);
    (bw as u32, bh as u32)
}

/// Rotate `source` counter-clockwise by `degrees`, expanding the canvas.
///
/// Negative angles rotate clockwise. The caller is responsible for passing a
/// finite angle.
pub fn rotate_expand(source: &RgbImage, degrees: f32, background: Rgb<u8>) -> RgbImage {
    let d = normalize_degrees(degrees);

    if d == 0.0 {
        return source.clone();
    }
    if d == 90.0 {
        debug!(degrees = d, "rotating by quarter turn");
        return imageops::rotate270(source);
    }
    if d == 180.0 {
        debug!(degrees = d, "rotating by half turn");
        return imageops::rotate180(source);
    }
    if d == 270.0 {
        debug!(degrees = d, "rotating by three quarter turns");
        return imageops::rotate90(source);
    }

    let (w, h) = source.dimensions();
    let (bw, bh) = rotated_bounds(w, h, d);

    // The working square must hold both the source and the rotated box,
    // since rotate_about_center keeps the input size.
    let cw = w.max(bw);
    let ch = h.max(bh);
    let mut canvas = RgbImage::from_pixel(cw, ch, background);
    imageops::replace(
        &mut canvas,
        source,
        ((cw - w) / 2) as i64,
        ((ch - h) / 2) as i64,
    );

    debug!(
        degrees = d,
        src_w = w,
        src_h = h,
        out_w = bw,
        out_h = bh,
        "rotating with bilinear resampling"
    );

    // rotate_about_center turns clockwise
    let rotated = rotate_about_center(
        &canvas,
        -d.to_radians(),
        Interpolation::Bilinear,
        background,
    );

    if (cw, ch) == (bw, bh) {
        return rotated;
    }
    imageops::crop_imm(&rotated, (cw - bw) / 2, (ch - bh) / 2, bw, bh).to_image()
}
