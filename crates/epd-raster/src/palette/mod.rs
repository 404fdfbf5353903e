//! Palette types, color distance metrics and their errors.

mod error;
mod metric;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use metric::{
    ColorDistance, DistanceMetric, NormalizedEuclidean, WeightedLuma, LUMA_WEIGHT_B,
    LUMA_WEIGHT_G, LUMA_WEIGHT_R,
};
pub use palette::{Palette, MAX_PALETTE_LEN};
