//! Fitting an arbitrary source into the fixed target canvas.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::debug;

use super::rotate::rotate_expand;
use crate::RasterError;

/// Default background: white paper.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// How the rotated source is mapped onto the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Scale to fit entirely inside the target and pad with the background
    /// color (letterbox or pillarbox).
    Fit,
    /// Scale to cover the target and crop the overflow symmetrically.
    #[default]
    Fill,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Fit => "fit",
            DisplayMode::Fill => "fill",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(DisplayMode::Fit),
            "fill" => Ok(DisplayMode::Fill),
            other => Err(format!("unknown display mode '{other}' (expected fit or fill)")),
        }
    }
}

/// Check source and target dimensions without touching pixel data.
pub fn validate_dimensions(source: (u32, u32), target: (u32, u32)) -> Result<(), RasterError> {
    let (sw, sh) = source;
    if sw == 0 || sh == 0 {
        return Err(RasterError::EmptySource {
            width: sw,
            height: sh,
        });
    }
    let (tw, th) = target;
    if tw == 0 || th == 0 {
        return Err(RasterError::InvalidTarget {
            width: tw,
            height: th,
        });
    }
    Ok(())
}

/// Rotate, scale and crop or pad `source` to exactly `width`×`height`,
/// padding with white.
///
/// ```
/// use epd_raster::{fit, DisplayMode};
/// use image::{Rgb, RgbImage};
///
/// let src = RgbImage::from_pixel(1600, 480, Rgb([10, 20, 30]));
/// let out = fit(&src, 800, 480, 0.0, DisplayMode::Fill).unwrap();
/// assert_eq!(out.dimensions(), (800, 480));
/// ```
pub fn fit(
    source: &RgbImage,
    width: u32,
    height: u32,
    rotation: f32,
    mode: DisplayMode,
) -> Result<RgbImage, RasterError> {
    fit_with_background(source, width, height, rotation, mode, WHITE)
}

/// [`fit`] with an explicit background color for padding and rotation
/// corners.
pub fn fit_with_background(
    source: &RgbImage,
    width: u32,
    height: u32,
    rotation: f32,
    mode: DisplayMode,
    background: Rgb<u8>,
) -> Result<RgbImage, RasterError> {
    validate_dimensions(source.dimensions(), (width, height))?;
    if !rotation.is_finite() {
        return Err(RasterError::InvalidRotation(rotation));
    }

    let rotated = rotate_expand(source, rotation, background);
    let canvas = match mode {
        DisplayMode::Fit => letterbox(&rotated, width, height, background),
        DisplayMode::Fill => cover(&rotated, width, height),
    };
    debug_assert_eq!(canvas.dimensions(), (width, height));
    Ok(canvas)
}

/// Lanczos3 resize that leaves already-sized images alone.
fn resize(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        debug!(width, height, "Image already at target size, skipping resize");
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Lanczos3)
}

fn letterbox(img: &RgbImage, width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    let (w, h) = img.dimensions();
    let scale = f64::min(width as f64 / w as f64, height as f64 / h as f64);
    let sw = ((w as f64 * scale).round() as u32).clamp(1, width);
    let sh = ((h as f64 * scale).round() as u32).clamp(1, height);
    let x = (width - sw) / 2;
    let y = (height - sh) / 2;

    debug!(
        src_w = w,
        src_h = h,
        scale,
        scaled_w = sw,
        scaled_h = sh,
        pad_x = x,
        pad_y = y,
        "fit: scaling inside target"
    );

    let scaled = resize(img, sw, sh);
    let mut canvas = RgbImage::from_pixel(width, height, background);
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

/// Crop the source to the target aspect ratio around its center, then
/// resample the crop straight to the target. The resampler never sees more
/// than the source or produces more than the target, whatever the aspect
/// ratio.
fn cover(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let (crop_w, crop_h) = cover_crop_size((w, h), (width, height));
    let left = (w - crop_w) / 2;
    let top = (h - crop_h) / 2;

    debug!(
        src_w = w,
        src_h = h,
        crop_w,
        crop_h,
        crop_x = left,
        crop_y = top,
        "fill: cropping to target aspect"
    );

    if (crop_w, crop_h) == (w, h) {
        return resize(img, width, height);
    }
    let cropped = imageops::crop_imm(img, left, top, crop_w, crop_h).to_image();
    resize(&cropped, width, height)
}

/// Largest region of `source` with the aspect ratio of `target`.
fn cover_crop_size(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (w, h) = (source.0 as u64, source.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);
    if w * th > h * tw {
        // source is wider: keep full height
        let cw = (h as f64 * tw as f64 / th as f64).round() as u32;
        (cw.clamp(1, source.0), source.1)
    } else {
        let ch = (w as f64 * th as f64 / tw as f64).round() as u32;
        (source.0, ch.clamp(1, source.1))
    }
}
