//! Assertion helpers for decoded preview files.

use std::io::Cursor;

use pretty_assertions::assert_eq;

/// An indexed PNG decoded without palette expansion.
#[derive(Debug)]
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    /// PLTE entries as RGB triples
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
}

impl IndexedPng {
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    pub fn hex_palette(&self) -> Vec<String> {
        self.palette
            .iter()
            .map(|[r, g, b]| format!("#{r:02X}{g:02X}{b:02X}"))
            .collect()
    }
}

/// Decode PNG bytes keeping raw palette indices.
pub fn decode_indexed_png(bytes: &[u8]) -> IndexedPng {
    assert_png_signature(bytes);

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();

    assert_eq!(frame.color_type, png::ColorType::Indexed, "Expected indexed PNG");

    let bits = frame.bit_depth as u8;
    let palette = reader
        .info()
        .palette
        .as_ref()
        .expect("Indexed PNG without PLTE chunk")
        .chunks(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let per_byte = 8 / bits as usize;
    let mask = ((1u16 << bits) - 1) as u8;
    let mut indices = Vec::with_capacity((frame.width * frame.height) as usize);
    for row in buf[..frame.line_size * frame.height as usize].chunks(frame.line_size) {
        for x in 0..frame.width as usize {
            let byte = row[x / per_byte];
            let shift = (8 - bits) - (x % per_byte) as u8 * bits;
            indices.push((byte >> shift) & mask);
        }
    }

    IndexedPng {
        width: frame.width,
        height: frame.height,
        bit_depth: bits,
        palette,
        indices,
    }
}

pub fn assert_png_signature(bytes: &[u8]) {
    assert!(
        bytes.len() > 8 && &bytes[..8] == b"\x89PNG\r\n\x1a\n",
        "Expected PNG data, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every index is a valid palette position.
pub fn assert_indices_in_palette(png: &IndexedPng) {
    let len = png.palette.len();
    if let Some(bad) = png.indices.iter().find(|&&i| i as usize >= len) {
        panic!("Index {bad} outside palette of {len} colors");
    }
}
