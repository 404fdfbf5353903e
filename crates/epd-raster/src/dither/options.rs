//! Dithering options and configuration.

use crate::palette::DistanceMetric;
use crate::RasterError;

/// Configuration options for error diffusion.
///
/// # Defaults
///
/// - Strength: 1.0 (classical Floyd-Steinberg)
/// - Metric: [`DistanceMetric::Euclidean`]
///
/// # Example
///
/// ```
/// use epd_raster::{DistanceMetric, DitherOptions};
///
/// let options = DitherOptions::new()
///     .strength(0.8)
///     .metric(DistanceMetric::WeightedLuma);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherOptions {
    /// Fraction of the quantization error that is diffused, 0.0..=1.0.
    ///
    /// 0.0 is plain nearest-color mapping.
    pub strength: f32,

    /// Metric used to pick the nearest palette entry.
    pub metric: DistanceMetric,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            strength: 1.0,
            metric: DistanceMetric::default(),
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn validate(&self) -> Result<(), RasterError> {
        validate_strength(self.strength)
    }
}

/// Strength must lie in 0.0..=1.0; NaN is rejected.
pub fn validate_strength(strength: f32) -> Result<(), RasterError> {
    if (0.0..=1.0).contains(&strength) {
        Ok(())
    } else {
        Err(RasterError::InvalidStrength(strength))
    }
}
