//! inkframe - photo and dashboard raster converter for 6-color e-paper frames.
//!
//! The raster core lives in the `epd-raster` crate. This crate adds YAML
//! configuration, source image loading and the indexed PNG preview writer.
//! It is exposed as a library for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
