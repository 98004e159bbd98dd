//! Grid assembly and the paint-by-numbers legend
//!
//! The mapped colours come in the sampler's row-major order; cell `i` lands
//! at row `i / width`, column `i % width`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::color::{lightness, parse_hex, RgbTriple};
use crate::quantize::Palette;
use crate::sampling::GridDimensions;
use crate::{GridError, Result};

/// Finished template: `height` rows of `width` `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemGrid {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<String>>,
    /// Palette the cells were drawn from, generation order
    pub palette: Vec<String>,
}

/// One colour of the legend printed next to a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Number written into the cells of this colour, from 1
    pub number: usize,
    pub hex: String,
    /// Cells using this colour
    pub count: usize,
}

/// Reshape row-major mapped colours into a grid
///
/// # Errors
///
/// Returns `InvalidParameter` if `mapped` does not hold exactly
/// `dims.cell_count()` colours
pub fn assemble(mapped: &[RgbTriple], dims: &GridDimensions, palette: &Palette) -> Result<GemGrid> {
    if mapped.len() != dims.cell_count() {
        return Err(GridError::invalid_parameter("cell count", mapped.len()));
    }

    let rows = mapped
        .chunks(dims.width() as usize)
        .map(|row| row.iter().map(RgbTriple::to_hex).collect())
        .collect();

    Ok(GemGrid {
        width: dims.width(),
        height: dims.height(),
        rows,
        palette: palette.hex_codes(),
    })
}

impl GemGrid {
    /// Colour at `row`, `col`
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    /// Number of different colours actually used
    pub fn distinct_colors(&self) -> usize {
        self.cells().collect::<BTreeSet<_>>().len()
    }

    /// Used palette colours, darkest first, numbered from 1
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cell in self.cells() {
            *counts.entry(cell).or_default() += 1;
        }

        let mut used: Vec<(f32, usize, &str)> = self
            .palette
            .iter()
            .enumerate()
            .filter(|(_, hex)| counts.contains_key(hex.as_str()))
            .filter_map(|(index, hex)| {
                let color = parse_hex(hex).ok()?;
                Some((lightness(color), index, hex.as_str()))
            })
            .collect();
        used.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        used.into_iter()
            .enumerate()
            .map(|(i, (_, _, hex))| LegendEntry {
                number: i + 1,
                hex: hex.to_string(),
                count: counts[hex],
            })
            .collect()
    }

    /// The grid as legend numbers instead of colours
    pub fn numbered_rows(&self) -> Vec<Vec<usize>> {
        let numbers: HashMap<String, usize> = self
            .legend()
            .into_iter()
            .map(|entry| (entry.hex, entry.number))
            .collect();

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|hex| numbers.get(hex).copied().unwrap_or(0))
                    .collect()
            })
            .collect()
    }
}
