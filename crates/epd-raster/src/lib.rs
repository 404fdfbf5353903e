#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! epd-raster: fixed-size, fixed-palette rasters for e-paper panels
//!
//! Turns an arbitrary bitmap into the exact canvas a low-color
//! electrophoretic display can show: rotated, scaled, cropped or padded to
//! the panel resolution, then quantized to the panel inks with
//! Floyd-Steinberg error diffusion.
//!
//! # Quick Start
//!
//! The [`Pipeline`] builder is the primary entry point:
//!
//! ```
//! use epd_raster::{DisplayMode, Pipeline};
//! use image::{Rgb, RgbImage};
//!
//! let source = RgbImage::from_pixel(1600, 480, Rgb([120, 140, 160]));
//! let pipeline = Pipeline::new(800, 480).mode(DisplayMode::Fill);
//!
//! let result = pipeline.convert(&source).unwrap();
//! assert_eq!(result.dimensions(), (800, 480));
//! assert_eq!(result.histogram().iter().sum::<usize>(), 800 * 480);
//! ```
//!
//! # Stages
//!
//! ```text
//! RgbImage (any size)
//!     |
//!     v
//! rotate (counter-clockwise, expanded canvas)
//!     |
//!     v
//! fit / fill (Lanczos3) ----> canvas, exactly W x H
//!     |
//!     v
//! saturation, contrast        (skipped at 1.0)
//!     |
//!     v
//! ╔═══════════════════════════════════════════╗
//! ║  Dither loop, row-major                   ║
//! ║                                           ║
//! ║  working pixel  --closest()-->  index     ║
//! ║      |                                    ║
//! ║  error = pixel/255 - palette[index]       ║
//! ║      |                                    ║
//! ║  error * strength * 255 -> 7/16 3/16 ...  ║
//! ╚═══════════════════════════════════════════╝
//!     |
//!     v
//! QuantizedImage (indices + palette-colored RgbImage)
//! ```
//!
//! # Color Matching
//!
//! Nearest-color search is a linear scan over the palette; the first
//! (lowest) index wins a tie. The distance is a [`ColorDistance`] strategy:
//!
//! - [`NormalizedEuclidean`] (default): squared distance in 0..=1 RGB
//! - [`WeightedLuma`]: squared distance in 0..=255 weighted by
//!   1063/5000, 447/625 and 361/5000, optionally against linearized
//!   palette entries
//!
//! [`DistanceMetric`] names them for configuration files.
//!
//! # Error Diffusion
//!
//! Diffusion works on the 8-bit working canvas itself. Every neighbor update
//! is rounded and saturated to 0..=255, so error that would push a channel
//! past the ends is dropped rather than carried. Strength 0.0 turns the
//! ditherer into plain nearest-color mapping.
//!
//! # Threads
//!
//! [`Palette`], the metrics and [`Pipeline`] are immutable once built and
//! `Send + Sync`. Each conversion owns its buffers.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;


pub use api::{Pipeline, RasterError};
pub use color::{LinearRgb, Srgb};
pub use dither::{dither, dither_with_metric, DitherOptions, Kernel, FLOYD_STEINBERG};
pub use output::QuantizedImage;
pub use palette::{
    ColorDistance, DistanceMetric, NormalizedEuclidean, Palette, PaletteError, ParseColorError,
    WeightedLuma,
};
pub use preprocess::{fit, fit_with_background, DisplayMode, PreprocessOptions};
