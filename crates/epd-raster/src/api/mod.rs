//! Public API for the epd-raster crate.
//!
//! [`Pipeline`] builder and the [`RasterError`] unified error type.

mod error;
mod pipeline;

pub use error::RasterError;
pub use pipeline::Pipeline;
