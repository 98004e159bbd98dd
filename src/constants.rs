//! Default policy values for grid generation
//!
//! These bound the cost of a single generation request: at most
//! `MAX_GRID_DIMENSION²` cells are sampled and quantized.

/// Palette size used when the caller does not choose one
pub const DEFAULT_MAX_COLORS: usize = 40;

/// Grid dimension limits
pub mod grid {
    /// Smallest allowed grid side
    pub const MIN_DIMENSION: u32 = 1;

    /// Largest allowed grid side
    pub const MAX_DIMENSION: u32 = 200;

    /// Grid side suggested before the user picks one
    pub const DEFAULT_DIMENSION: u32 = 50;
}

/// Hex colour encoding
pub mod hex {
    /// Length of a `#rrggbb` token
    pub const TOKEN_LEN: usize = 7;

    /// Prefix of every token
    pub const PREFIX: char = '#';
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        assert!(grid::MIN_DIMENSION >= 1);
        assert!(grid::MIN_DIMENSION <= grid::DEFAULT_DIMENSION);
        assert!(grid::DEFAULT_DIMENSION <= grid::MAX_DIMENSION);
    }

    #[test]
    fn test_default_palette_size() {
        assert_eq!(DEFAULT_MAX_COLORS, 40);
    }
}
