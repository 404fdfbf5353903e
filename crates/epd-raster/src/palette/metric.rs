//! Color distance strategies.
//!
//! A metric scores how far an 8-bit canvas pixel is from a palette entry.
//! [`Palette::closest`](super::Palette::closest) picks the entry with the
//! smallest score; metrics never see more than one pair at a time and hold
//! no state, so one instance can serve any number of threads.

use crate::color::{LinearRgb, Srgb};

/// Red weight of [`WeightedLuma`] (1063/5000).
pub const LUMA_WEIGHT_R: f64 = 1063.0 / 5000.0;
/// Green weight of [`WeightedLuma`] (447/625).
pub const LUMA_WEIGHT_G: f64 = 447.0 / 625.0;
/// Blue weight of [`WeightedLuma`] (361/5000).
pub const LUMA_WEIGHT_B: f64 = 361.0 / 5000.0;

/// A distance between a canvas pixel and a palette color.
///
/// Lower is closer. Implementations must be pure: the same inputs always
/// produce the same score.
pub trait ColorDistance: Send + Sync {
    /// Score `pixel` (8-bit RGB) against the palette entry `color`.
    fn distance(&self, pixel: [u8; 3], color: Srgb) -> f64;

    /// Whether a score of exactly zero ends the palette scan early.
    ///
    /// Only affects speed for palettes without duplicates, which
    /// [`Palette`](super::Palette) guarantees.
    fn stops_on_exact_match(&self) -> bool {
        false
    }
}

/// Squared Euclidean distance in normalized 0..=1 RGB.
///
/// The pixel is normalized exactly the way palette entries are
/// ([`Srgb::from_bytes`]), so a pixel equal to an entry scores 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedEuclidean;

impl ColorDistance for NormalizedEuclidean {
    #[inline]
    fn distance(&self, pixel: [u8; 3], color: Srgb) -> f64 {
        let p = Srgb::from_bytes(pixel).channels();
        let c = color.channels();
        (0..3)
            .map(|i| {
                let d = p[i] as f64 - c[i] as f64;
                d * d
            })
            .sum()
    }
}

/// Luma-weighted squared distance in 0..=255 space.
///
/// Green dominates, blue barely counts. With `linearize` set, the palette
/// entry goes through the sRGB transfer function before it is compared
/// against the (still gamma-encoded) pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedLuma {
    pub linearize: bool,
}

impl WeightedLuma {
    pub fn new() -> Self {
        Self { linearize: false }
    }

    pub fn linearized() -> Self {
        Self { linearize: true }
    }

    /// Palette entry in 0..=255 space. Without linearization this is the
    /// entry's integer byte value, so an exact pixel scores exactly 0.
    fn reference(&self, color: Srgb) -> [f64; 3] {
        if self.linearize {
            LinearRgb::from(color).channels().map(|v| v as f64 * 255.0)
        } else {
            color.to_bytes().map(f64::from)
        }
    }
}

impl ColorDistance for WeightedLuma {
    #[inline]
    fn distance(&self, pixel: [u8; 3], color: Srgb) -> f64 {
        let c = self.reference(color);
        let d = [
            pixel[0] as f64 - c[0],
            pixel[1] as f64 - c[1],
            pixel[2] as f64 - c[2],
        ];
        LUMA_WEIGHT_R * d[0] * d[0] + LUMA_WEIGHT_G * d[1] * d[1] + LUMA_WEIGHT_B * d[2] * d[2]
    }

    fn stops_on_exact_match(&self) -> bool {
        true
    }
}

/// Selectable distance metric.
///
/// The configuration-facing face of the strategies above: it can be named in
/// a config file or on the command line and dispatches to the matching
/// strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// [`NormalizedEuclidean`]
    #[default]
    Euclidean,
    /// [`WeightedLuma`] without gamma correction
    WeightedLuma,
    /// [`WeightedLuma`] with linearized palette entries
    WeightedLumaLinear,
}

impl DistanceMetric {
    /// Stable lowercase name, as accepted by [`str::parse`].
    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::WeightedLuma => "weighted-luma",
            DistanceMetric::WeightedLumaLinear => "weighted-luma-linear",
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "weighted-luma" | "weighted_luma" => Ok(DistanceMetric::WeightedLuma),
            "weighted-luma-linear" | "weighted_luma_linear" => {
                Ok(DistanceMetric::WeightedLumaLinear)
            }
            other => Err(format!(
                "unknown distance metric '{other}' (expected euclidean, weighted-luma or weighted-luma-linear)"
            )),
        }
    }
}

impl ColorDistance for DistanceMetric {
    #[inline]
    fn distance(&self, pixel: [u8; 3], color: Srgb) -> f64 {
        match self {
            DistanceMetric::Euclidean => NormalizedEuclidean.distance(pixel, color),
            DistanceMetric::WeightedLuma => WeightedLuma::new().distance(pixel, color),
            DistanceMetric::WeightedLumaLinear => WeightedLuma::linearized().distance(pixel, color),
        }
    }

    fn stops_on_exact_match(&self) -> bool {
        match self {
            DistanceMetric::Euclidean => NormalizedEuclidean.stops_on_exact_match(),
            DistanceMetric::WeightedLuma | DistanceMetric::WeightedLumaLinear => {
                WeightedLuma::new().stops_on_exact_match()
            }
        }
    }
}
