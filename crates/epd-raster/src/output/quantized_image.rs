//! QuantizedImage: the result of a conversion.
//!
//! Holds two parallel views of the same raster: one palette index per pixel,
//! and an `RgbImage` whose every pixel is byte-identical to the palette entry
//! at that index.

use image::RgbImage;

use crate::palette::Palette;

/// The canonical output of the pipeline.
///
/// # Example
///
/// ```
/// use epd_raster::{Palette, QuantizedImage};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// let image = QuantizedImage::from_indices(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.dimensions(), (2, 2));
/// assert_eq!(image.rgb().get_pixel(1, 0).0, [255, 255, 255]);
/// assert_eq!(image.histogram(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    rgb: RgbImage,
    palette: Palette,
}

impl QuantizedImage {
    /// Assemble from parts produced together by the ditherer.
    pub(crate) fn new(indices: Vec<u8>, rgb: RgbImage, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            rgb.width() as usize * rgb.height() as usize,
            "index plane must cover the raster"
        );
        Self {
            indices,
            rgb,
            palette,
        }
    }

    /// Build from an index plane, rendering the RGB view from the palette.
    ///
    /// # Panics
    ///
    /// Panics if `indices.len() != width * height` or an index is outside the
    /// palette.
    pub fn from_indices(indices: Vec<u8>, width: u32, height: u32, palette: Palette) -> Self {
        assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length ({}) must match {width}x{height}",
            indices.len()
        );
        let mut rgb = RgbImage::new(width, height);
        for (px, &idx) in rgb.pixels_mut().zip(&indices) {
            px.0 = palette.bytes(idx as usize);
        }
        Self::new(indices, rgb, palette)
    }

    /// Palette indices, one per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Palette-colored raster.
    #[inline]
    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.rgb.dimensions()
    }

    /// Index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width() && y < self.height(), "({x}, {y}) out of bounds");
        self.indices[y as usize * self.width() as usize + x as usize]
    }

    /// Pixel count per palette index; the vector has one slot per entry.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }

    /// Give up the parts, e.g. to hand the raster to an encoder.
    pub fn into_parts(self) -> (Vec<u8>, RgbImage, Palette) {
        (self.indices, self.rgb, self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::from_hex(&["#000000", "#FFFFFF", "#FF0000"]).unwrap()
    }

    #[test]
    fn test_rgb_view_follows_indices() {
        let img = QuantizedImage::from_indices(vec![2, 1, 0, 2, 2, 1], 3, 2, palette());
        assert_eq!(img.rgb().get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.rgb().get_pixel(2, 0).0, [0, 0, 0]);
        assert_eq!(img.index_at(2, 1), 1);
        assert_eq!(img.histogram(), vec![1, 2, 3]);
    }

    #[test]
    fn test_histogram_includes_unused_entries() {
        let img = QuantizedImage::from_indices(vec![1; 4], 2, 2, palette());
        assert_eq!(img.histogram(), vec![0, 4, 0]);
    }

    #[test]
    #[should_panic(expected = "must match")]
    fn test_from_indices_rejects_wrong_length() {
        let _ = QuantizedImage::from_indices(vec![0; 3], 2, 2, palette());
    }

    #[test]
    fn test_into_parts() {
        let img = QuantizedImage::from_indices(vec![0, 1], 2, 1, palette());
        let (indices, rgb, pal) = img.into_parts();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(pal.len(), 3);
    }
}
