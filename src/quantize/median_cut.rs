//! Median-cut quantization over the RGB cube
//!
//! Distinct sample colours are grouped into boxes. Each round splits the
//! most populated box along its widest channel at the pixel-weighted
//! median, so colours covering many cells end up with more palette entries.
//! A box's representative is the weighted mean of its colours.
//!
//! Splits happen at integer channel boundaries (lower box `<= m`, upper box
//! `> m`) so two boxes never round to the same representative, and raising
//! `max_colors` only appends splits to the sequence a smaller value produces.

use std::collections::{BTreeMap, HashMap};

use crate::color::RgbTriple;
use crate::quantize::{Palette, PaletteMapper, Quantized, Quantizer};
use crate::{GridError, Result};

/// A set of distinct colours with their pixel counts
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<(RgbTriple, u64)>,
    population: u64,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(entries: Vec<(RgbTriple, u64)>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut population = 0;
        for (color, count) in &entries {
            for (axis, value) in color.channels().into_iter().enumerate() {
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
            population += count;
        }
        Self {
            entries,
            population,
            min,
            max,
        }
    }

    fn range(&self, axis: usize) -> u8 {
        self.max[axis] - self.min[axis]
    }

    /// Channel with the greatest range; R before G before B on ties
    fn widest_axis(&self) -> usize {
        (0..3).fold(0, |best, axis| {
            if self.range(axis) > self.range(best) {
                axis
            } else {
                best
            }
        })
    }

    fn can_split(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Split at the weighted median of the widest channel. Only called on
    /// boxes with at least two distinct colours, so both halves are non-empty.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let axis = self.widest_axis();
        self.entries.sort_by_key(|(color, _)| color.channel(axis));

        let mut cumulative = 0;
        let median_index = self
            .entries
            .iter()
            .position(|(_, count)| {
                cumulative += count;
                cumulative * 2 >= self.population
            })
            .unwrap_or(self.entries.len() - 1);
        let median = self.entries[median_index].0.channel(axis);

        let mut cut = self.entries.partition_point(|(c, _)| c.channel(axis) <= median);
        if cut == self.entries.len() {
            // Median sits on the top value; cut just below it instead
            cut = self.entries.partition_point(|(c, _)| c.channel(axis) < median);
        }

        let upper = self.entries.split_off(cut);
        tracing::trace!(
            axis,
            median,
            lower = self.entries.len(),
            upper = upper.len(),
            "split colour box"
        );
        (ColorBox::new(self.entries), ColorBox::new(upper))
    }

    /// Pixel-weighted mean, rounded half up
    fn representative(&self) -> RgbTriple {
        let mut sum = [0u64; 3];
        for (color, count) in &self.entries {
            for (acc, value) in sum.iter_mut().zip(color.channels()) {
                *acc += value as u64 * count;
            }
        }
        let population = self.population.max(1);
        let [r, g, b] = sum.map(|acc| ((2 * acc + population) / (2 * population)) as u8);
        RgbTriple::new(r, g, b)
    }
}

/// Median-cut [`Quantizer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCutQuantizer;

impl MedianCutQuantizer {
    pub fn new() -> Self {
        Self
    }

    /// Partition the histogram into at most `max_colors` boxes
    fn partition(histogram: Vec<(RgbTriple, u64)>, max_colors: usize) -> Vec<ColorBox> {
        let mut boxes = vec![ColorBox::new(histogram)];

        while boxes.len() < max_colors {
            // Most populated splittable box, then widest, then earliest
            let candidate = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.can_split())
                .fold(None, |best: Option<(usize, (u64, u8))>, (i, b)| {
                    let key = (b.population, b.range(b.widest_axis()));
                    match best {
                        Some((_, best_key)) if best_key >= key => best,
                        _ => Some((i, key)),
                    }
                });

            let Some((index, _)) = candidate else {
                break;
            };

            let (lower, upper) = boxes.remove(index).split();
            boxes.insert(index, lower);
            boxes.push(upper);
        }
        boxes
    }
}

impl Quantizer for MedianCutQuantizer {
    fn quantize(&self, samples: &[RgbTriple], max_colors: usize) -> Result<Quantized> {
        if samples.is_empty() {
            return Err(GridError::EmptyInput);
        }
        if max_colors == 0 {
            return Err(GridError::invalid_parameter("max_colors", max_colors));
        }

        let mut counts: BTreeMap<RgbTriple, u64> = BTreeMap::new();
        for &color in samples {
            *counts.entry(color).or_default() += 1;
        }
        let distinct = counts.len();

        let boxes = Self::partition(counts.into_iter().collect(), max_colors);

        let mut assignments = HashMap::with_capacity(distinct);
        let mut colors = Vec::with_capacity(boxes.len());
        for (index, color_box) in boxes.iter().enumerate() {
            colors.push(color_box.representative());
            for (color, _) in &color_box.entries {
                assignments.insert(*color, index);
            }
        }

        let palette = Palette::new(colors);
        tracing::debug!(
            samples = samples.len(),
            distinct,
            max_colors,
            palette_size = palette.len(),
            "median cut finished"
        );

        Ok(Quantized {
            mapper: PaletteMapper::new(palette.clone(), assignments),
            palette,
        })
    }
}
