//! Region-to-grid resampling
//!
//! Area mode weighs every source pixel by how much of it falls under the
//! cell. Coverage is computed in integer units of `1 / (cells)` source
//! pixels, so the average of a uniform region is exactly its colour.

use crate::color::RgbTriple;
use crate::config::ResampleFilter;
use crate::image_loader::Bitmap;
use crate::sampling::{ClampedRegion, GridDimensions, RegionOfInterest};
use crate::Result;

/// Source pixel index and its coverage weight for one output cell
type Span = Vec<(u32, u64)>;

/// Samples one colour per grid cell from a region of a bitmap
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelSampler {
    filter: ResampleFilter,
}

impl PixelSampler {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    /// Resample `roi` of `bitmap` onto a `dims` raster
    ///
    /// # Returns
    ///
    /// `dims.cell_count()` triples, row-major (top to bottom, left to right)
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if `roi` is empty after clamping to the bitmap
    pub fn sample(
        &self,
        bitmap: &Bitmap,
        roi: &RegionOfInterest,
        dims: &GridDimensions,
    ) -> Result<Vec<RgbTriple>> {
        let region = roi.clamp_to(bitmap.width(), bitmap.height())?;

        let samples = match self.filter {
            ResampleFilter::Area => sample_area(bitmap, &region, dims),
            ResampleFilter::Nearest => sample_nearest(bitmap, &region, dims),
        };

        tracing::debug!(
            region_width = region.width,
            region_height = region.height,
            grid_width = dims.width(),
            grid_height = dims.height(),
            filter = ?self.filter,
            "sampled region"
        );
        Ok(samples)
    }
}

/// Coverage of each source pixel by each of `cells` equal slices of a
/// `src_len` long axis. Weights of one slice sum to `src_len`.
fn axis_spans(src_len: u32, cells: u32) -> Vec<Span> {
    let (src_len, cells) = (src_len as u64, cells as u64);
    (0..cells)
        .map(|c| {
            let start = c * src_len;
            let end = (c + 1) * src_len;
            let first = start / cells;
            let last = (end - 1) / cells;
            (first..=last)
                .filter_map(|i| {
                    let lo = start.max(i * cells);
                    let hi = end.min((i + 1) * cells);
                    (hi > lo).then_some((i as u32, hi - lo))
                })
                .collect()
        })
        .collect()
}

fn sample_area(bitmap: &Bitmap, region: &ClampedRegion, dims: &GridDimensions) -> Vec<RgbTriple> {
    let columns = axis_spans(region.width, dims.width());
    let rows = axis_spans(region.height, dims.height());
    let total = region.width as u64 * region.height as u64;

    let mut samples = Vec::with_capacity(dims.cell_count());
    for row in &rows {
        for column in &columns {
            let mut sum = [0u64; 3];
            for &(sy, wy) in row {
                for &(sx, wx) in column {
                    let pixel = bitmap.get_pixel(region.x + sx, region.y + sy);
                    let weight = wx * wy;
                    for (acc, channel) in sum.iter_mut().zip(pixel.channels()) {
                        *acc += channel as u64 * weight;
                    }
                }
            }
            let [r, g, b] = sum.map(|acc| ((acc + total / 2) / total) as u8);
            samples.push(RgbTriple::new(r, g, b));
        }
    }
    samples
}

fn sample_nearest(
    bitmap: &Bitmap,
    region: &ClampedRegion,
    dims: &GridDimensions,
) -> Vec<RgbTriple> {
    // Source index under the centre of cell c: floor((c + 0.5) * len / cells)
    let centre = |c: u32, len: u32, cells: u32| {
        ((2 * c as u64 + 1) * len as u64 / (2 * cells as u64)) as u32
    };

    let mut samples = Vec::with_capacity(dims.cell_count());
    for row in 0..dims.height() {
        let sy = centre(row, region.height, dims.height());
        for col in 0..dims.width() {
            let sx = centre(col, region.width, dims.width());
            samples.push(bitmap.get_pixel(region.x + sx, region.y + sy));
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridError;

    fn dims(w: u32, h: u32) -> GridDimensions {
        GridDimensions::new(w, h, 200).unwrap()
    }

    fn gradient(width: u32, height: u32) -> Bitmap {
        let pixels: Vec<RgbTriple> = (0..height)
            .flat_map(|y| (0..width).map(move |x| RgbTriple::new((x * 10) as u8, (y * 10) as u8, 0)))
            .collect();
        Bitmap::from_pixels(width, height, &pixels).unwrap()
    }

    #[test]
    fn test_axis_spans_cover_source() {
        let spans = axis_spans(5, 2);
        assert_eq!(spans.len(), 2);
        for span in &spans {
            let total: u64 = span.iter().map(|&(_, w)| w).sum();
            assert_eq!(total, 5);
        }
        // Pixel 2 straddles both cells
        assert_eq!(spans[0], vec![(0, 2), (1, 2), (2, 1)]);
        assert_eq!(spans[1], vec![(2, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_axis_spans_upsampling() {
        let spans = axis_spans(2, 4);
        let sources: Vec<u32> = spans.iter().map(|s| s[0].0).collect();
        assert_eq!(sources, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_identity_sampling() {
        let bitmap = gradient(4, 3);
        let roi = RegionOfInterest::whole(4, 3);
        for filter in [ResampleFilter::Area, ResampleFilter::Nearest] {
            let samples = PixelSampler::new(filter).sample(&bitmap, &roi, &dims(4, 3)).unwrap();
            assert_eq!(samples.len(), 12);
            assert_eq!(samples[0], RgbTriple::new(0, 0, 0));
            assert_eq!(samples[5], RgbTriple::new(10, 10, 0));
            assert_eq!(samples[11], RgbTriple::new(30, 20, 0));
        }
    }

    #[test]
    fn test_area_averages_block() {
        // 2x2 checker of black and white averages to mid grey
        let pixels = [
            RgbTriple::new(0, 0, 0),
            RgbTriple::new(255, 255, 255),
            RgbTriple::new(255, 255, 255),
            RgbTriple::new(0, 0, 0),
        ];
        let bitmap = Bitmap::from_pixels(2, 2, &pixels).unwrap();
        let samples = PixelSampler::default()
            .sample(&bitmap, &RegionOfInterest::whole(2, 2), &dims(1, 1))
            .unwrap();
        assert_eq!(samples, vec![RgbTriple::new(128, 128, 128)]);
    }

    #[test]
    fn test_uniform_region_is_exact() {
        let color = RgbTriple::new(17, 99, 201);
        let bitmap = Bitmap::from_pixels(7, 5, &vec![color; 35]).unwrap();
        let samples = PixelSampler::default()
            .sample(&bitmap, &RegionOfInterest::whole(7, 5), &dims(3, 4))
            .unwrap();
        assert_eq!(samples.len(), 12);
        assert!(samples.iter().all(|&s| s == color));
    }

    #[test]
    fn test_region_offset() {
        let bitmap = gradient(6, 6);
        let roi = RegionOfInterest::new(2, 3, 1, 1);
        let samples = PixelSampler::default().sample(&bitmap, &roi, &dims(2, 2)).unwrap();
        assert_eq!(samples, vec![RgbTriple::new(20, 30, 0); 4]);
    }

    #[test]
    fn test_clamped_region_shape() {
        let bitmap = gradient(5, 5);
        let roi = RegionOfInterest::new(-100, -100, 1000, 1000);
        let samples = PixelSampler::default().sample(&bitmap, &roi, &dims(7, 2)).unwrap();
        assert_eq!(samples.len(), 14);
    }

    #[test]
    fn test_invalid_region() {
        let bitmap = gradient(5, 5);
        let roi = RegionOfInterest::new(10, 10, 3, 3);
        let result = PixelSampler::default().sample(&bitmap, &roi, &dims(2, 2));
        assert!(matches!(result, Err(GridError::InvalidRegion { .. })));
    }
}
