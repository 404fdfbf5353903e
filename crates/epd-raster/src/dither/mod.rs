//! Error diffusion dithering.
//!
//! A single row-major pass over the working canvas. Each pixel is mapped to
//! its nearest palette entry, and the scaled quantization error is pushed
//! into the neighbors the scan has not reached yet. The working canvas is
//! taken by value: diffusion rewrites it in place and nothing else may look
//! at it while that happens.
//!
//! # Example
//!
//! ```
//! use epd_raster::{dither, DitherOptions, Palette};
//! use image::{Rgb, RgbImage};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
//! let canvas = RgbImage::from_pixel(8, 8, Rgb([128, 128, 128]));
//!
//! let result = dither(canvas, &palette, &DitherOptions::new()).unwrap();
//! let counts = result.histogram();
//! assert!(counts[0] > 0 && counts[1] > 0);
//! ```

mod kernel;
mod options;

pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::{validate_strength, DitherOptions};

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::output::QuantizedImage;
use crate::palette::{ColorDistance, Palette};
use crate::RasterError;

/// Dither `working` to `palette` with Floyd-Steinberg diffusion.
pub fn dither(
    working: RgbImage,
    palette: &Palette,
    options: &DitherOptions,
) -> Result<QuantizedImage, RasterError> {
    dither_with_metric(working, palette, &options.metric, options.strength)
}

/// Dither with any [`ColorDistance`] strategy.
pub fn dither_with_metric<M: ColorDistance + ?Sized>(
    working: RgbImage,
    palette: &Palette,
    metric: &M,
    strength: f32,
) -> Result<QuantizedImage, RasterError> {
    validate_strength(strength)?;
    Ok(dither_with_kernel(
        working,
        palette,
        metric,
        strength,
        &FLOYD_STEINBERG,
    ))
}

/// Core scan. `strength` must already be validated.
pub(crate) fn dither_with_kernel<M: ColorDistance + ?Sized>(
    mut working: RgbImage,
    palette: &Palette,
    metric: &M,
    strength: f32,
    kernel: &Kernel,
) -> QuantizedImage {
    debug_assert!(
        kernel.propagation() <= 1.0,
        "kernel would amplify error ({})",
        kernel.propagation()
    );
    let (width, height) = working.dimensions();
    debug!(width, height, strength, colors = palette.len(), "dither start");

    let mut output = RgbImage::new(width, height);
    let mut indices = Vec::with_capacity(width as usize * height as usize);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let current = working.get_pixel(x, y).0;
            let idx = palette.closest(current, metric);
            output.put_pixel(x, y, Rgb(palette.bytes(idx)));
            // closest() is bounded by the palette, which holds at most 256
            indices.push(idx as u8);

            if strength == 0.0 {
                continue;
            }

            let target = palette.color(idx).channels();
            let mut error = [0.0f32; 3];
            for c in 0..3 {
                error[c] = (current[c] as f32 / 255.0 - target[c]) * strength * 255.0;
            }
            if error == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let share = weight as f32 / divisor;
                let neighbor = working.get_pixel_mut(nx as u32, ny as u32);
                for c in 0..3 {
                    let v = neighbor.0[c] as f32 + error[c] * share;
                    neighbor.0[c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    debug!(width, height, "dither finished");
    QuantizedImage::new(indices, output, palette.clone())
}
