//! # Gem Template
//!
//! Turns a photograph into a gem painting template: a small grid where
//! every cell holds one colour from a reduced palette.
//!
//! The pipeline:
//! - Sample the selected region of the image down to one colour per cell
//! - Build a palette of at most `max_colors` entries with median cut
//! - Replace every cell colour with its palette entry, encoded as `#rrggbb`
//!
//! ## Example
//!
//! ```rust,no_run
//! use gem_template::{generate_grid, GeneratorConfig, GridDimensions, RegionOfInterest};
//! use gem_template::image_loader::load_image;
//! use std::path::Path;
//!
//! let bitmap = load_image(Path::new("photo.jpg"))?;
//! let roi = RegionOfInterest::whole(bitmap.width(), bitmap.height());
//! let dims = GridDimensions::new(60, 40, 200)?;
//! let grid = generate_grid(&bitmap, &roi, &dims, &GeneratorConfig::default())?;
//! println!("{} colours, first cell {}", grid.distinct_colors(), grid.rows[0][0]);
//! # Ok::<(), gem_template::GridError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod image_loader;
pub mod quantize;
pub mod sampling;
pub mod state;

pub use color::RgbTriple;
pub use config::{GeneratorConfig, ResampleFilter};
pub use error::{GridError, Result};
pub use grid::{GemGrid, LegendEntry};
pub use image_loader::Bitmap;
pub use quantize::{MedianCutQuantizer, Palette, PaletteMapper, Quantized, Quantizer};
pub use sampling::{GridDimensions, PixelSampler, RegionOfInterest};
pub use state::{GenerationRequest, GeneratorState};

/// Generate a template grid with the median-cut quantizer
///
/// # Errors
///
/// Returns `GridError` if:
/// - the configuration is invalid
/// - `dims` exceeds `config.max_grid_dimension`
/// - `roi` does not overlap the bitmap
pub fn generate_grid(
    bitmap: &Bitmap,
    roi: &RegionOfInterest,
    dims: &GridDimensions,
    config: &GeneratorConfig,
) -> Result<GemGrid> {
    generate_grid_with(bitmap, roi, dims, config, &MedianCutQuantizer::new())
}

/// Generate a template grid with any [`Quantizer`]
pub fn generate_grid_with<Q: Quantizer>(
    bitmap: &Bitmap,
    roi: &RegionOfInterest,
    dims: &GridDimensions,
    config: &GeneratorConfig,
    quantizer: &Q,
) -> Result<GemGrid> {
    config.validate()?;
    if dims.width() > config.max_grid_dimension || dims.height() > config.max_grid_dimension {
        return Err(GridError::InvalidGridSize {
            width: dims.width(),
            height: dims.height(),
            max: config.max_grid_dimension,
        });
    }

    let samples = PixelSampler::new(config.resample).sample(bitmap, roi, dims)?;
    let quantized = quantizer.quantize(&samples, config.max_colors)?;
    let mapped = quantized.mapper.map_all(&samples);
    let grid = grid::assemble(&mapped, dims, &quantized.palette)?;

    tracing::debug!(
        width = grid.width,
        height = grid.height,
        palette_size = quantized.palette.len(),
        "generated grid"
    );
    Ok(grid)
}
