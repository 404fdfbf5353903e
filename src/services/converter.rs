//! File-to-file conversion: load, convert, write preview.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use epd_raster::{Pipeline, QuantizedImage};
use image::RgbImage;

use crate::error::AppError;
use crate::models::AppConfig;
use crate::rendering::write_preview;
use crate::services::source::load_source;

/// Result of one conversion, printed by the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub source_size: (u32, u32),
    pub target_size: (u32, u32),
    pub palette: Vec<String>,
    /// Pixel count per palette index
    pub histogram: Vec<usize>,
}

impl ConversionSummary {
    pub fn new(source: &RgbImage, result: &QuantizedImage) -> Self {
        Self {
            source_size: source.dimensions(),
            target_size: result.dimensions(),
            palette: result.palette().to_hex(),
            histogram: result.histogram(),
        }
    }
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sw, sh) = self.source_size;
        let (tw, th) = self.target_size;
        write!(f, "{sw}x{sh} -> {tw}x{th}, {} colors:", self.palette.len())?;
        for (idx, (hex, count)) in self.palette.iter().zip(&self.histogram).enumerate() {
            write!(f, " {idx}:{hex}={count}")?;
        }
        Ok(())
    }
}

/// Convert one already-loaded image with a prepared pipeline.
pub fn convert_image(
    pipeline: &Pipeline,
    source: &RgbImage,
) -> Result<(QuantizedImage, ConversionSummary), AppError> {
    let start = Instant::now();
    let result = pipeline.convert(source)?;
    let summary = ConversionSummary::new(source, &result);
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Converted image");
    Ok((result, summary))
}

/// Load `input`, convert it with `config` and write an indexed PNG to `output`.
pub fn convert_file(
    config: &AppConfig,
    input: &Path,
    output: &Path,
) -> Result<ConversionSummary, AppError> {
    // Validate before decoding so a bad config never pays for a large image.
    let pipeline = config.pipeline()?;
    let source = load_source(input)?;
    let (result, summary) = convert_image(&pipeline, &source)?;
    write_preview(&result, output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = summary.target_size.0,
        height = summary.target_size.1,
        "Wrote preview"
    );
    Ok(summary)
}
