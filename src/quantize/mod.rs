//! Palette quantization module
//!
//! Reduces a set of sampled colours to a small palette and maps every
//! colour onto one palette entry.

pub mod median_cut;
pub mod palette;

pub use self::median_cut::MedianCutQuantizer;
pub use self::palette::{Palette, PaletteMapper};

use crate::color::RgbTriple;
use crate::Result;

/// Output of one quantization run
#[derive(Debug, Clone)]
pub struct Quantized {
    /// Representative colours, in generation order
    pub palette: Palette,
    /// Lookup from any colour to its palette entry
    pub mapper: PaletteMapper,
}

/// Builds a palette of at most `max_colors` entries from `samples`
///
/// Implementations must be deterministic: the same input always yields the
/// same palette in the same order.
pub trait Quantizer {
    /// # Errors
    ///
    /// `EmptyInput` if `samples` is empty, `InvalidParameter` if
    /// `max_colors` is zero
    fn quantize(&self, samples: &[RgbTriple], max_colors: usize) -> Result<Quantized>;
}
