//! Image preprocessing: everything between the decoded source and the
//! ditherer.
//!
//! 1. **Rotate** counter-clockwise, expanding the canvas
//! 2. **Fit** into the target with [`DisplayMode::Fit`] (pad) or
//!    [`DisplayMode::Fill`] (crop), resampling with Lanczos3
//! 3. **Enhance** saturation, then contrast (skipped at 1.0)
//!
//! Rotation happens first so the display mode sees the final orientation.
//!
//! ```
//! use epd_raster::{DisplayMode, PreprocessOptions};
//! use image::{Rgb, RgbImage};
//!
//! let src = RgbImage::from_pixel(480, 800, Rgb([40, 80, 120]));
//! let canvas = PreprocessOptions::new()
//!     .rotation(90.0)
//!     .mode(DisplayMode::Fit)
//!     .apply(&src, 800, 480)
//!     .unwrap();
//! assert_eq!(canvas.dimensions(), (800, 480));
//! ```

mod enhance;
mod fit;
mod options;
mod rotate;

pub use enhance::{adjust_contrast, luma, saturate};
pub use fit::{fit, fit_with_background, validate_dimensions, DisplayMode, WHITE};
pub use options::PreprocessOptions;
pub use rotate::{normalize_degrees, rotate_expand, rotated_bounds};
