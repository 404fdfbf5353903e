//! Preprocessing options and configuration.

use image::{Rgb, RgbImage};

use super::enhance::{adjust_contrast, saturate, validate_factor};
use super::fit::{fit_with_background, DisplayMode, WHITE};
use crate::RasterError;

/// Everything that happens to a source before it is dithered.
///
/// # Defaults
///
/// - Rotation: 0 degrees
/// - Mode: [`DisplayMode::Fill`]
/// - Background: white
/// - Saturation and contrast: 1.0 (untouched)
///
/// # Example
///
/// ```
/// use epd_raster::{DisplayMode, PreprocessOptions};
///
/// let options = PreprocessOptions::new()
///     .rotation(270.0)
///     .mode(DisplayMode::Fit)
///     .saturation(1.5);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Counter-clockwise rotation in degrees, applied before scaling.
    pub rotation: f32,

    /// How the rotated source is mapped onto the target canvas.
    pub mode: DisplayMode,

    /// Padding and rotation-corner color.
    pub background: Rgb<u8>,

    /// Saturation multiplier.
    ///
    /// - 1.0 = no change
    /// - 1.5 = 50% boost (typical for photos)
    /// - 0.0 = grayscale
    pub saturation: f32,

    /// Contrast multiplier around the mean luma.
    ///
    /// - 1.0 = no change
    /// - 0.0 = flat gray
    pub contrast: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            mode: DisplayMode::default(),
            background: WHITE,
            saturation: 1.0,
            contrast: 1.0,
        }
    }
}

impl PreprocessOptions {
    /// Create new preprocessing options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn background(mut self, color: Rgb<u8>) -> Self {
        self.background = color;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    /// Check every option that does not depend on the source image.
    pub fn validate(&self) -> Result<(), RasterError> {
        if !self.rotation.is_finite() {
            return Err(RasterError::InvalidRotation(self.rotation));
        }
        validate_factor("saturation", self.saturation)?;
        validate_factor("contrast", self.contrast)?;
        Ok(())
    }

    /// Whether enhancement would change any pixel.
    #[inline]
    pub fn enhances(&self) -> bool {
        self.saturation != 1.0 || self.contrast != 1.0
    }

    /// Fit `source` into `width`×`height`, then enhance it.
    pub fn apply(&self, source: &RgbImage, width: u32, height: u32) -> Result<RgbImage, RasterError> {
        self.validate()?;
        let mut canvas =
            fit_with_background(source, width, height, self.rotation, self.mode, self.background)?;
        if self.enhances() {
            saturate(&mut canvas, self.saturation)?;
            adjust_contrast(&mut canvas, self.contrast)?;
        }
        Ok(canvas)
    }
}
