//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: an offset to a neighbor that has not
/// been visited yet in row-major order, and its share of the error as a
/// numerator over `divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// `dy` is never negative and `dx` is positive whenever `dy` is zero, so
    /// diffusion never reaches an already-quantized pixel.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error the kernel passes on (1.0 for full propagation).
    pub fn propagation(&self) -> f32 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        total as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
