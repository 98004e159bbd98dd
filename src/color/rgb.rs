//! 8-bit RGB triple

use serde::{Deserialize, Serialize};
use std::fmt;

/// One colour, three 8-bit channels, no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RgbTriple {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbTriple {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in R, G, B order
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel by index (0 = R, 1 = G, 2 = B)
    pub fn channel(&self, axis: usize) -> u8 {
        self.channels()[axis]
    }

    /// Lowercase `#rrggbb` token
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance over (r, g, b)
    pub fn distance_squared(&self, other: &RgbTriple) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for RgbTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 3]> for RgbTriple {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<image::Rgb<u8>> for RgbTriple {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<RgbTriple> for image::Rgb<u8> {
    fn from(color: RgbTriple) -> Self {
        image::Rgb(color.channels())
    }
}

impl From<RgbTriple> for palette::Srgb<u8> {
    fn from(color: RgbTriple) -> Self {
        palette::Srgb::new(color.r, color.g, color.b)
    }
}

impl From<palette::Srgb<u8>> for RgbTriple {
    fn from(color: palette::Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}
