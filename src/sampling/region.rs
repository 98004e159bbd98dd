//! Region of interest and grid dimension value types

use serde::{Deserialize, Serialize};

use crate::constants::grid;
use crate::{GridError, Result};

/// Axis-aligned rectangle in source-pixel coordinates, as handed over by the
/// crop selector. May extend past the image; see [`RegionOfInterest::clamp_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Region guaranteed to be non-empty and inside its image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionOfInterest {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering an entire `width` x `height` image
    pub fn whole(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Intersect with the image bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if the region has a zero side or does not
    /// overlap the image at all
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Result<ClampedRegion> {
        let invalid = |reason: &str| GridError::InvalidRegion {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            reason: reason.to_string(),
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid("width and height must be positive"));
        }

        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(self.width as i64).min(image_width as i64);
        let y1 = self.y.saturating_add(self.height as i64).min(image_height as i64);

        if x1 <= x0 || y1 <= y0 {
            return Err(invalid("region does not overlap the image"));
        }

        Ok(ClampedRegion {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Grid width (columns) and height (rows), each in `1..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            width: grid::DEFAULT_DIMENSION,
            height: grid::DEFAULT_DIMENSION,
        }
    }
}

impl GridDimensions {
    /// Strict constructor
    ///
    /// # Errors
    ///
    /// Returns `InvalidGridSize` if either side is outside `1..=max`
    pub fn new(width: u32, height: u32, max: u32) -> Result<Self> {
        let in_range = |v: u32| (grid::MIN_DIMENSION..=max).contains(&v);
        if !in_range(width) || !in_range(height) {
            return Err(GridError::InvalidGridSize { width, height, max });
        }
        Ok(Self { width, height })
    }

    /// Clamp user input into `1..=max`, as the grid size inputs do
    pub fn clamped(width: u32, height: u32, max: u32) -> Self {
        let max = max.max(grid::MIN_DIMENSION);
        Self {
            width: width.clamp(grid::MIN_DIMENSION, max),
            height: height.clamp(grid::MIN_DIMENSION, max),
        }
    }

    /// Dimensions with the given width and a height that keeps the region's
    /// aspect ratio
    pub fn fit_aspect(width: u32, region: &ClampedRegion, max: u32) -> Self {
        let width = width.clamp(grid::MIN_DIMENSION, max.max(grid::MIN_DIMENSION));
        let height = (width as f64 * region.height as f64 / region.width as f64).round();
        Self::clamped(width, height as u32, max)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells, `width * height`
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
