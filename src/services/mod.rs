pub mod converter;
pub mod source;

pub use converter::{convert_file, convert_image, ConversionSummary};
pub use source::{decode_source, load_source};
