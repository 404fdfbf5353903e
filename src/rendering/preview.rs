//! Indexed PNG output for quantized rasters.
//!
//! The PNG palette (PLTE) is built from the conversion palette in index
//! order, so pixel values in the file are the same indices the panel
//! driver consumes.

use std::io::Cursor;
use std::path::Path;

use epd_raster::{Palette, QuantizedImage};

use crate::error::PreviewError;

/// Encode a quantized raster as an indexed PNG.
pub fn encode_preview(image: &QuantizedImage) -> Result<Vec<u8>, PreviewError> {
    let bits = bits_for_palette(image.palette().len());
    let plte = palette_bytes(image.palette());
    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth(bits));
        encoder.set_compression(png::Compression::Fast);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
    }

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        bits,
        bytes = buf.get_ref().len(),
        "Encoded preview"
    );
    Ok(buf.into_inner())
}

/// Encode and write the preview to `path`.
pub fn write_preview(image: &QuantizedImage, path: &Path) -> Result<(), PreviewError> {
    let bytes = encode_preview(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Smallest PNG bit depth able to hold every palette index.
fn bits_for_palette(len: usize) -> u8 {
    match len {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

fn bit_depth(bits: u8) -> png::BitDepth {
    match bits {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    }
}

fn palette_bytes(palette: &Palette) -> Vec<u8> {
    (0..palette.len()).flat_map(|i| palette.bytes(i)).collect()
}

/// Pack indices into N-bit PNG rows (1, 2 or 4 bits per pixel), MSB first.
/// Each row starts on a byte boundary.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let per_byte = 8 / bits as usize;
    let row_len = width as usize;
    let row_bytes = row_len.div_ceil(per_byte);
    let mask = (1u8 << bits) - 1;
    let mut packed = vec![0u8; row_bytes * (indices.len() / row_len.max(1))];

    for (row, out) in indices
        .chunks(row_len.max(1))
        .zip(packed.chunks_mut(row_bytes.max(1)))
    {
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % per_byte) as u8 * bits;
            out[i / per_byte] |= (idx & mask) << shift;
        }
    }

    packed
}
