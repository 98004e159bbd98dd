//! Colour conversion utilities
//!
//! - `#rrggbb` parsing
//! - CIE L* lightness for ordering palette entries dark to light

use palette::{FromColor, Lab, Srgb};

use crate::color::RgbTriple;
use crate::constants::hex;
use crate::{GridError, Result};

/// Parse a hexadecimal colour string (`#ff0000` or `ff0000`)
///
/// # Errors
///
/// Returns `InvalidParameter` if the string is not six hex digits
pub fn parse_hex(token: &str) -> Result<RgbTriple> {
    let digits = token.strip_prefix(hex::PREFIX).unwrap_or(token);
    if digits.len() != hex::TOKEN_LEN - 1 || !digits.is_ascii() {
        return Err(GridError::invalid_parameter("hex", token));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| GridError::invalid_parameter("hex", token))
    };

    Ok(RgbTriple::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// CIE L* (0 = black, 100 = white) of an sRGB colour under D65
pub fn lightness(color: RgbTriple) -> f32 {
    let srgb: Srgb<f32> = Srgb::<u8>::from(color).into_format();
    let lab: Lab = Lab::from_color(srgb);
    lab.l
}

/// True if `token` is exactly a lowercase `#rrggbb` string
pub fn is_hex_token(token: &str) -> bool {
    token.len() == hex::TOKEN_LEN
        && token.starts_with(hex::PREFIX)
        && token[1..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
