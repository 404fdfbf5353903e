//! Unified error type for the epd-raster public API.
//!
//! [`RasterError`] covers every way a conversion can be rejected. All of them
//! are raised while validating parameters, before any buffer is allocated.

use thiserror::Error;

use crate::palette::PaletteError;

/// Unified error type for the epd-raster public API.
///
/// # Example
///
/// ```
/// use epd_raster::{Palette, RasterError};
///
/// fn create_palette() -> Result<Palette, RasterError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// Source image has a zero dimension
    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
    /// Target canvas has a zero dimension
    #[error("invalid target size {width}x{height}, both dimensions must be at least 1")]
    InvalidTarget { width: u32, height: u32 },
    /// Dithering strength is NaN or outside 0.0..=1.0
    #[error("dither strength must be within 0.0..=1.0, got {0}")]
    InvalidStrength(f32),
    /// Rotation angle is NaN or infinite
    #[error("rotation must be a finite number of degrees, got {0}")]
    InvalidRotation(f32),
    /// Enhancement factor is negative or not finite
    #[error("{name} factor must be a finite value >= 0, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },
    /// Palette validation error (empty, duplicate, too large or parse error)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
