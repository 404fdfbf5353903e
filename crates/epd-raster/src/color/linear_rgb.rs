//! Linear RGB color type
//!
//! Used by the gamma-aware distance metric. Conversion is exact (no lookup
//! table): palettes are tiny and converted once per comparison at most.

use super::Srgb;

/// Linearization threshold of the sRGB transfer function.
const SRGB_THRESHOLD: f32 = 0.04045;

/// Convert a single gamma-encoded sRGB channel to linear light.
///
/// Values at or below 0.04045 use the linear segment (`c / 12.92`), the rest
/// use the power curve `((c + 0.055) / 1.055) ^ 2.4`.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= SRGB_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A color in linear RGB, normalized to 0.0..=1.0 per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Srgb> for LinearRgb {
    #[inline]
    fn from(s: Srgb) -> Self {
        Self {
            r: srgb_to_linear(s.r),
            g: srgb_to_linear(s.g),
            b: srgb_to_linear(s.b),
        }
    }
}
