//! Output types for the pipeline.
//!
//! [`QuantizedImage`] carries the index plane (for device encoders) and the
//! palette-colored raster (for previews) side by side.

mod quantized_image;

pub use quantized_image::QuantizedImage;
