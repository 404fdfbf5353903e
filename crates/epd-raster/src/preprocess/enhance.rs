//! Color and contrast enhancement.
//!
//! Both operations blend the image with a "degenerate" version of itself:
//! `out = degenerate + factor * (image - degenerate)`. A factor of 1.0 is the
//! identity, 0.0 yields the degenerate image, values above 1.0 push away from
//! it. Results are rounded and saturated to 0..=255.

use image::RgbImage;
use tracing::debug;

use crate::RasterError;

/// ITU-R 601 luma of an 8-bit RGB pixel, rounded to the nearest integer.
///
/// `L = 0.299 R + 0.587 G + 0.114 B` in 16-bit fixed point.
#[inline]
pub fn luma(p: [u8; 3]) -> u8 {
    let l = (p[0] as u32 * 19595 + p[1] as u32 * 38470 + p[2] as u32 * 7471 + 0x8000) >> 16;
    l as u8
}

/// Reject negative, NaN and infinite factors.
pub fn validate_factor(name: &'static str, value: f32) -> Result<(), RasterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RasterError::InvalidFactor { name, value })
    }
}

#[inline]
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let d = degenerate as f32;
    (d + factor * (value as f32 - d)).round().clamp(0.0, 255.0) as u8
}

/// Scale color saturation against the pixel's own grayscale.
///
/// 0.0 turns the image gray, 1.5 is a typical boost for muted e-paper inks.
pub fn saturate(image: &mut RgbImage, factor: f32) -> Result<(), RasterError> {
    validate_factor("saturation", factor)?;
    if factor == 1.0 {
        return Ok(());
    }
    debug!(factor, "adjusting saturation");
    for px in image.pixels_mut() {
        let l = luma(px.0);
        px.0 = px.0.map(|c| blend(l, c, factor));
    }
    Ok(())
}

/// Scale contrast around the mean luma of the whole image.
pub fn adjust_contrast(image: &mut RgbImage, factor: f32) -> Result<(), RasterError> {
    validate_factor("contrast", factor)?;
    if factor == 1.0 || image.width() == 0 || image.height() == 0 {
        return Ok(());
    }

    let sum: u64 = image.pixels().map(|p| luma(p.0) as u64).sum();
    let count = image.width() as u64 * image.height() as u64;
    let mean = (sum as f64 / count as f64).round() as u8;
    debug!(factor, mean, "adjusting contrast");

    for px in image.pixels_mut() {
        px.0 = px.0.map(|c| blend(mean, c, factor));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        RgbImage::from_fn(16, 4, |x, y| Rgb([(x * 16) as u8, (y * 60) as u8, 200]))
    }

    #[test]
    fn test_luma_primaries() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
    }

    #[test]
    fn test_factor_one_is_identity() {
        let mut img = sample();
        saturate(&mut img, 1.0).unwrap();
        adjust_contrast(&mut img, 1.0).unwrap();
        assert_eq!(img, sample());
    }

    #[test]
    fn test_zero_saturation_is_grayscale() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        saturate(&mut img, 0.0).unwrap();
        assert!(img.pixels().all(|p| *p == Rgb([76, 76, 76])));
    }

    #[test]
    fn test_saturation_boost_pushes_channels_apart() {
        let mut img = RgbImage::from_pixel(1, 1, Rgb([200, 100, 100]));
        saturate(&mut img, 1.5).unwrap();
        let p = img.get_pixel(0, 0);
        assert!(p[0] > 200);
        assert!(p[1] < 100);
        // grays have nothing to boost
        let mut gray = RgbImage::from_pixel(1, 1, Rgb([90, 90, 90]));
        saturate(&mut gray, 3.0).unwrap();
        assert_eq!(*gray.get_pixel(0, 0), Rgb([90, 90, 90]));
    }

    #[test]
    fn test_zero_contrast_is_flat_mean() {
        let mut img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        adjust_contrast(&mut img, 0.0).unwrap();
        // mean luma 127.5 rounds to 128
        assert!(img.pixels().all(|p| *p == Rgb([128, 128, 128])));
    }

    #[test]
    fn test_contrast_boost_saturates() {
        let mut img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([20, 20, 20])
            } else {
                Rgb([240, 240, 240])
            }
        });
        adjust_contrast(&mut img, 2.0).unwrap();
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(1, 0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_invalid_factors() {
        let mut img = sample();
        assert_eq!(
            saturate(&mut img, -0.5),
            Err(RasterError::InvalidFactor {
                name: "saturation",
                value: -0.5
            })
        );
        assert!(matches!(
            adjust_contrast(&mut img, f32::INFINITY),
            Err(RasterError::InvalidFactor {
                name: "contrast",
                ..
            })
        ));
        assert_eq!(img, sample(), "rejected factors must not touch pixels");
    }
}
