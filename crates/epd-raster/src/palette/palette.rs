//! Palette struct and nearest-color matching.

use std::collections::HashSet;
use std::str::FromStr;

use super::error::PaletteError;
use super::metric::ColorDistance;
use crate::color::Srgb;

/// Largest palette a `u8` index plane can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// The six inks of a Spectra 6 panel, in device index order.
const SPECTRA6: [[u8; 3]; 6] = [
    [0, 0, 0],       // black
    [255, 255, 255], // white
    [255, 255, 0],   // yellow
    [255, 0, 0],     // red
    [0, 0, 255],     // blue
    [0, 255, 0],     // green
];

/// An ordered set of display colors.
///
/// The position of a color is its index, and the index is the only thing
/// that identifies an output color downstream. A palette is validated once
/// at construction (non-empty, no duplicates, at most 256 entries) and is
/// immutable afterwards, so it can be shared by reference across threads.
///
/// # Example
///
/// ```
/// use epd_raster::{Palette, Srgb};
///
/// let colors = [Srgb::from_u8(0, 0, 0), Srgb::from_u8(255, 255, 255)];
/// let palette = Palette::new(&colors).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
    // Byte form of `colors`, written verbatim into output pixels
    bytes: Vec<[u8; 3]>,
}

impl Palette {
    /// Create a palette from sRGB colors.
    ///
    /// # Errors
    ///
    /// - `colors` is empty ([`PaletteError::EmptyPalette`])
    /// - more than 256 colors ([`PaletteError::TooManyColors`])
    /// - two colors with the same 8-bit value ([`PaletteError::DuplicateColor`],
    ///   reporting the index of the second occurrence)
    pub fn new(colors: &[Srgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_LEN {
            return Err(PaletteError::TooManyColors { len: colors.len() });
        }

        let mut seen = HashSet::new();
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(color.to_bytes()) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        // Snap to 8-bit so matching and output agree on every entry
        let bytes: Vec<[u8; 3]> = colors.iter().map(|c| c.to_bytes()).collect();
        let colors = bytes.iter().map(|&b| Srgb::from_bytes(b)).collect();

        Ok(Self { colors, bytes })
    }

    /// Create a palette from hex color strings (`#RRGGBB` or `#RGB`).
    ///
    /// # Example
    ///
    /// ```
    /// use epd_raster::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFF", "#F00"]).unwrap();
    /// assert_eq!(palette.bytes(2), [255, 0, 0]);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| Srgb::from_str(s.as_ref()).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&colors)
    }

    /// The six-color panel palette: black, white, yellow, red, blue, green.
    pub fn spectra6() -> Self {
        let bytes = SPECTRA6.to_vec();
        let colors = bytes.iter().map(|&b| Srgb::from_bytes(b)).collect();
        Self { colors, bytes }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Srgb {
        self.colors[idx]
    }

    /// 8-bit value of the color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn bytes(&self, idx: usize) -> [u8; 3] {
        self.bytes[idx]
    }

    #[inline]
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Index of the entry nearest to `pixel` under `metric`.
    ///
    /// Linear scan with strict less-than: on a tie the lowest index wins.
    /// Metrics that stop on an exact match return as soon as a score is 0.0.
    ///
    /// ```
    /// use epd_raster::{DistanceMetric, Palette};
    ///
    /// let palette = Palette::spectra6();
    /// assert_eq!(palette.closest([250, 10, 5], &DistanceMetric::Euclidean), 3);
    /// ```
    #[inline]
    pub fn closest<M: ColorDistance + ?Sized>(&self, pixel: [u8; 3], metric: &M) -> usize {
        let stop_early = metric.stops_on_exact_match();
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, &color) in self.colors.iter().enumerate() {
            let dist = metric.distance(pixel, color);
            if stop_early && dist == 0.0 {
                return i;
            }
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// Hex strings of every entry, in index order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::spectra6()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DistanceMetric, NormalizedEuclidean, WeightedLuma};

    fn bw() -> Palette {
        Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap()
    }

    #[test]
    fn test_palette_basic_construction() {
        let colors = [
            Srgb::from_u8(0, 0, 0),
            Srgb::from_u8(255, 255, 255),
            Srgb::from_u8(255, 0, 0),
        ];
        let palette = Palette::new(&colors).unwrap();
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
        assert_eq!(palette.bytes(2), [255, 0, 0]);
    }

    #[test]
    fn test_palette_empty_error() {
        assert!(matches!(Palette::new(&[]), Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_palette_duplicate_reports_second_index() {
        let colors = [
            Srgb::from_u8(255, 0, 0),
            Srgb::from_u8(0, 255, 0),
            Srgb::from_u8(255, 0, 0),
        ];
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::DuplicateColor { index: 2 })
        );
    }

    #[test]
    fn test_palette_too_many_colors() {
        let colors: Vec<Srgb> = (0..257u32)
            .map(|i| Srgb::from_u8((i % 256) as u8, (i / 256) as u8, 0))
            .collect();
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::TooManyColors { len: 257 })
        );
        assert_eq!(Palette::new(&colors[..256]).unwrap().len(), 256);
    }

    #[test]
    fn test_from_hex_errors() {
        assert!(matches!(
            Palette::from_hex(&["#000000", "#nothex"]),
            Err(PaletteError::ParseColor(_))
        ));
        assert!(matches!(
            Palette::from_hex(&["#FFF", "#FFFFFF"]),
            Err(PaletteError::DuplicateColor { index: 1 })
        ));
    }

    #[test]
    fn test_spectra6_order() {
        let p = Palette::default();
        assert_eq!(
            p.to_hex(),
            vec!["#000000", "#FFFFFF", "#FFFF00", "#FF0000", "#0000FF", "#00FF00"]
        );
        assert_eq!(
            Palette::from_hex(&p.to_hex()).unwrap(),
            p,
            "validated and built-in palette must agree"
        );
    }

    #[test]
    fn test_closest_exact_match_every_entry() {
        let p = Palette::spectra6();
        for metric in [
            DistanceMetric::Euclidean,
            DistanceMetric::WeightedLuma,
            DistanceMetric::WeightedLumaLinear,
        ] {
            for i in 0..p.len() {
                assert_eq!(p.closest(p.bytes(i), &metric), i, "{metric} entry {i}");
            }
        }
    }

    #[test]
    fn test_closest_tie_prefers_lowest_index() {
        // 127.5 is not representable, so build an exact tie on one channel:
        // (0,0,0) and (2,0,0) are equally far from (1,0,0)
        let p = Palette::new(&[Srgb::from_u8(2, 0, 0), Srgb::from_u8(0, 0, 0)]).unwrap();
        assert_eq!(p.closest([1, 0, 0], &NormalizedEuclidean), 0);

        let p = Palette::new(&[Srgb::from_u8(0, 0, 0), Srgb::from_u8(2, 0, 0)]).unwrap();
        assert_eq!(p.closest([1, 0, 0], &NormalizedEuclidean), 0);
    }

    #[test]
    fn test_closest_grays_on_black_white() {
        let p = bw();
        assert_eq!(p.closest([64, 64, 64], &NormalizedEuclidean), 0);
        assert_eq!(p.closest([192, 192, 192], &NormalizedEuclidean), 1);
        assert_eq!(p.closest([127, 127, 127], &NormalizedEuclidean), 0);
        assert_eq!(p.closest([128, 128, 128], &NormalizedEuclidean), 1);
    }

    #[test]
    fn test_weighted_luma_prefers_green_accuracy() {
        // (0,100,0) vs black: off by 100 in green only.
        // (0,100,0) vs olive: off by 150 in red and 50 in green.
        // Plain distance picks black; the luma weights forgive the red error.
        let p = Palette::from_hex(&["#000000", "#969600"]).unwrap();
        assert_eq!(p.closest([0, 100, 0], &NormalizedEuclidean), 0);
        assert_eq!(p.closest([0, 100, 0], &WeightedLuma::new()), 1);
    }

    #[test]
    fn test_closest_accepts_trait_objects() {
        let metric: Box<dyn ColorDistance> = Box::new(WeightedLuma::new());
        assert_eq!(bw().closest([10, 10, 10], metric.as_ref()), 0);
    }
}
