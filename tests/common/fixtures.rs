//! Test fixtures: source images and config files on disk.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// Six-color palette in index order.
pub const SPECTRA6: [&str; 6] = [
    "#000000", "#FFFFFF", "#FFFF00", "#FF0000", "#0000FF", "#00FF00",
];

/// Solid red square, the classic letterbox scenario.
pub fn red_square(size: u32) -> RgbImage {
    RgbImage::from_pixel(size, size, Rgb([255, 0, 0]))
}

/// Horizontal black-to-white ramp.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = (x as f32 / (width - 1).max(1) as f32 * 255.0).round() as u8;
        Rgb([v, v, v])
    })
}

/// Save `image` as a PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

pub fn write_rgba_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Half-transparent left column, fully transparent right column.
pub fn translucent_black(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Encode an RGB image as PNG bytes carrying an eXIf chunk with the given
/// orientation tag value.
pub fn png_with_orientation(image: &RgbImage, orientation: u16) -> Vec<u8> {
    let [hi, lo] = orientation.to_be_bytes();
    // Big-endian TIFF header, one IFD entry: tag 0x0112 (Orientation), SHORT, count 1
    let exif: Vec<u8> = vec![
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // header
        0x00, 0x01, // entry count
        0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, hi, lo, 0x00, 0x00, // entry
        0x00, 0x00, 0x00, 0x00, // next IFD
    ];

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_chunk(png::chunk::ChunkType(*b"eXIf"), &exif)
            .unwrap();
        writer.write_image_data(image.as_raw()).unwrap();
    }
    buf.into_inner()
}

/// Write a YAML config file under `dir`.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("inkframe.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
