//! Palette and colour-to-palette mapping

use std::collections::HashMap;

use crate::color::RgbTriple;

/// Ordered list of representative colours
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<RgbTriple>,
}

impl Palette {
    pub fn new(colors: Vec<RgbTriple>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[RgbTriple] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RgbTriple> {
        self.colors.get(index).copied()
    }

    /// `#rrggbb` code of every entry, palette order
    pub fn hex_codes(&self) -> Vec<String> {
        self.colors.iter().map(RgbTriple::to_hex).collect()
    }

    /// Index of the entry closest to `color` (Euclidean RGB), first index on
    /// ties. `None` for an empty palette.
    pub fn nearest_index(&self, color: RgbTriple) -> Option<usize> {
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(i, entry)| (entry.distance_squared(&color), *i))
            .map(|(i, _)| i)
    }
}

/// Maps colours to palette entries.
///
/// Colours that were part of the quantized samples resolve to the
/// representative of the box that held them. Anything else falls back to the
/// nearest palette entry.
#[derive(Debug, Clone)]
pub struct PaletteMapper {
    palette: Palette,
    assignments: HashMap<RgbTriple, usize>,
}

impl PaletteMapper {
    /// `assignments` values must be valid indices into `palette`
    pub fn new(palette: Palette, assignments: HashMap<RgbTriple, usize>) -> Self {
        debug_assert!(assignments.values().all(|&i| i < palette.len()));
        Self {
            palette,
            assignments,
        }
    }

    /// Mapper with no box assignments; every lookup is a nearest search
    pub fn nearest(palette: Palette) -> Self {
        Self::new(palette, HashMap::new())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index for `color`
    pub fn map_index(&self, color: RgbTriple) -> usize {
        match self.assignments.get(&color) {
            Some(&index) => index,
            None => self.palette.nearest_index(color).unwrap_or(0),
        }
    }

    /// Palette colour for `color`; `color` itself if the palette is empty
    pub fn map(&self, color: RgbTriple) -> RgbTriple {
        self.palette.get(self.map_index(color)).unwrap_or(color)
    }

    pub fn map_hex(&self, color: RgbTriple) -> String {
        self.map(color).to_hex()
    }

    pub fn map_all(&self, colors: &[RgbTriple]) -> Vec<RgbTriple> {
        colors.iter().map(|&c| self.map(c)).collect()
    }
}
