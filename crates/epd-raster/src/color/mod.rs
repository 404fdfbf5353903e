//! Color types and conversion utilities
//!
//! - **Srgb**: gamma-encoded, normalized to 0.0..=1.0. Palette storage and
//!   the space the default distance metric works in.
//! - **LinearRgb**: linear light, used only when a metric asks for it.
//!
//! # Example
//!
//! ```
//! use epd_raster::{LinearRgb, Srgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let linear = LinearRgb::from(srgb);
//! assert!(linear.r < srgb.r);
//! ```

mod linear_rgb;
mod srgb;

pub use linear_rgb::{srgb_to_linear, LinearRgb};
pub use srgb::Srgb;
