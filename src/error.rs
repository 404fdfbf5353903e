use std::path::PathBuf;

use epd_raster::{PaletteError, RasterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source image error: {0}")]
    Source(#[from] SourceError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    #[error("Conversion error: {0}")]
    Raster(#[from] RasterError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
