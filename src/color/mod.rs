//! Colour value types and conversions
//!
//! This module holds the 8-bit RGB triple that flows through the pipeline
//! and its `#rrggbb` encoding.

pub mod conversion;
pub mod rgb;

pub use conversion::{is_hex_token, lightness, parse_hex};
pub use rgb::RgbTriple;
