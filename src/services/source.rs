//! Source image loading.
//!
//! Decodes anything the `image` crate understands, applies the EXIF
//! orientation and flattens transparency onto white, which is what an
//! unlit e-paper pixel looks like.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage, RgbaImage};

use crate::error::SourceError;

/// Load and normalize a source image from disk.
pub fn load_source(path: &Path) -> Result<RgbImage, SourceError> {
    let open_err = |source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?;

    let image = decode(reader).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded source image"
    );
    Ok(image)
}

/// Decode an in-memory encoded image.
pub fn decode_source(bytes: &[u8]) -> Result<RgbImage, image::ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    decode(reader)
}

fn decode<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<RgbImage, image::ImageError> {
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(flatten_alpha(image))
}

/// Convert to RGB8, compositing any alpha channel over white.
pub fn flatten_alpha(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }
    let rgba: RgbaImage = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        image::Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

#[inline]
fn over_white(c: u8, a: u8) -> u8 {
    let (c, a) = (c as u32, a as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn test_over_white() {
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(200, 255), 200);
        assert_eq!(over_white(0, 128), 127);
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let rgba = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([255, 0, 0, 0])
            }
        });
        let rgb = flatten_alpha(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_is_plain_conversion() {
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let out = flatten_alpha(DynamicImage::ImageRgb8(rgb.clone()));
        assert_eq!(out, rgb);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(decode_source(b"definitely not an image").is_err());
    }
}
