//! sRGB color type
//!
//! Palette entries are stored as gamma-encoded sRGB normalized to 0.0..=1.0.
//! Pixels in the canvas stay 8-bit; [`Srgb::from_u8`] is the single place
//! where a byte triple is normalized so distance math stays bit-identical
//! between palette entries and pixels.

use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in sRGB color space, normalized to 0.0..=1.0 per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-encoded, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-encoded, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-encoded, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use epd_raster::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an Srgb color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`, rounding and clamping to 0..=255.
    ///
    /// # Example
    /// ```
    /// use epd_raster::Srgb;
    /// let color = Srgb::new(1.0, 0.5, 0.0);
    /// assert_eq!(color.to_bytes(), [255, 128, 0]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as an uppercase `#RRGGBB` hex string.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace ignored.
    ///
    /// ```
    /// use epd_raster::Srgb;
    ///
    /// let yellow: Srgb = "#FF0".parse().unwrap();
    /// assert_eq!(yellow.to_bytes(), [255, 255, 0]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // #RGB expands each digit: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
