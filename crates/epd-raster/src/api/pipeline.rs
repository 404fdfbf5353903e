//! Pipeline builder -- the primary entry point for the crate.
//!
//! [`Pipeline`] threads one set of settings through fit, enhance and dither.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::dither::{dither, DitherOptions};
use crate::output::QuantizedImage;
use crate::palette::{DistanceMetric, Palette};
use crate::preprocess::{validate_dimensions, DisplayMode, PreprocessOptions};
use crate::RasterError;

/// Image-to-panel conversion with fixed target size and palette.
///
/// # Design
///
/// - Constructor requires the target size; everything else has a default
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one pipeline can serve
///   many images and many threads
/// - Every parameter is checked before any buffer is allocated
///
/// # Example
///
/// ```
/// use epd_raster::{DisplayMode, Palette, Pipeline};
/// use image::{Rgb, RgbImage};
///
/// let pipeline = Pipeline::new(800, 480)
///     .palette(Palette::spectra6())
///     .mode(DisplayMode::Fit)
///     .strength(0.8);
///
/// let source = RgbImage::from_pixel(100, 100, Rgb([255, 0, 0]));
/// let result = pipeline.convert(&source).unwrap();
///
/// assert_eq!(result.dimensions(), (800, 480));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    width: u32,
    height: u32,
    palette: Palette,
    preprocess: PreprocessOptions,
    dither_opts: DitherOptions,
}

impl Pipeline {
    /// Create a pipeline for a `width`×`height` panel.
    ///
    /// Defaults: six-color palette, fill mode, no rotation, white background,
    /// full-strength diffusion with the Euclidean metric, no enhancement.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette: Palette::default(),
            preprocess: PreprocessOptions::default(),
            dither_opts: DitherOptions::default(),
        }
    }

    #[inline]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Counter-clockwise rotation in degrees.
    #[inline]
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.preprocess = self.preprocess.rotation(degrees);
        self
    }

    #[inline]
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.preprocess = self.preprocess.mode(mode);
        self
    }

    #[inline]
    pub fn background(mut self, color: Rgb<u8>) -> Self {
        self.preprocess = self.preprocess.background(color);
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.saturation(factor);
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.contrast(factor);
        self
    }

    /// Fraction of quantization error to diffuse, 0.0..=1.0.
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.dither_opts = self.dither_opts.strength(strength);
        self
    }

    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.dither_opts = self.dither_opts.metric(metric);
        self
    }

    /// Target size as `(width, height)`.
    #[inline]
    pub fn target(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn active_palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn preprocess_options(&self) -> &PreprocessOptions {
        &self.preprocess
    }

    #[inline]
    pub fn dither_options(&self) -> &DitherOptions {
        &self.dither_opts
    }

    /// Check every setting that does not depend on a source image.
    pub fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidTarget {
                width: self.width,
                height: self.height,
            });
        }
        self.preprocess.validate()?;
        self.dither_opts.validate()?;
        Ok(())
    }

    /// Convert `source` into a quantized raster of the target size.
    ///
    /// Fails fast: nothing is resampled unless every parameter is valid.
    pub fn convert(&self, source: &RgbImage) -> Result<QuantizedImage, RasterError> {
        validate_dimensions(source.dimensions(), self.target())?;
        self.validate()?;

        debug!(
            src_w = source.width(),
            src_h = source.height(),
            width = self.width,
            height = self.height,
            mode = %self.preprocess.mode,
            rotation = self.preprocess.rotation,
            metric = %self.dither_opts.metric,
            "converting"
        );

        let canvas = self.preprocess.apply(source, self.width, self.height)?;
        dither(canvas, &self.palette, &self.dither_opts)
    }
}
