//! Caller-owned generation state
//!
//! Holds what the single-screen tool keeps between user actions: the
//! uploaded image, the crop box, the grid size and the last good grid. The
//! library itself is stateless; this is the object a front end keeps around.

use crate::image_loader::{Bitmap, ImageCrateSource, ImageSource};
use crate::sampling::{GridDimensions, RegionOfInterest};
use crate::{generate_grid, GemGrid, GeneratorConfig, GridError, Result};

/// State of one template editing session
#[derive(Debug, Clone, Default)]
pub struct GeneratorState {
    config: GeneratorConfig,
    image: Option<Bitmap>,
    region: Option<RegionOfInterest>,
    dimensions: GridDimensions,
    generating: bool,
    grid: Option<GemGrid>,
}

impl GeneratorState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Decode an uploaded file with the default decoder
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.load_with(&ImageCrateSource, bytes)
    }

    /// Decode an uploaded file with `source`. On failure the current image
    /// and grid are kept.
    pub fn load_with<S: ImageSource>(&mut self, source: &S, bytes: &[u8]) -> Result<()> {
        let bitmap = source.decode(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "image upload rejected");
        })?;
        self.set_image(bitmap);
        Ok(())
    }

    /// Replace the source image; the crop box resets to the whole image
    pub fn set_image(&mut self, bitmap: Bitmap) {
        tracing::debug!(width = bitmap.width(), height = bitmap.height(), "source image set");
        self.image = Some(bitmap);
        self.region = None;
    }

    pub fn set_region(&mut self, region: RegionOfInterest) {
        self.region = Some(region);
    }

    /// Set the grid size, clamped into `1..=max_grid_dimension`
    pub fn set_grid_size(&mut self, width: u32, height: u32) {
        self.dimensions = GridDimensions::clamped(width, height, self.config.max_grid_dimension);
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// Crop box in effect; the whole image if none was chosen
    pub fn region(&self) -> Option<RegionOfInterest> {
        self.region.or_else(|| {
            self.image
                .as_ref()
                .map(|img| RegionOfInterest::whole(img.width(), img.height()))
        })
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// True between [`begin_generation`](Self::begin_generation) and
    /// [`finish_generation`](Self::finish_generation)
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Last successfully generated grid
    pub fn grid(&self) -> Option<&GemGrid> {
        self.grid.as_ref()
    }

    /// Run the pipeline on the current inputs.
    ///
    /// On success the new grid replaces the old one. On failure the previous
    /// grid is left untouched and the error is returned for display.
    pub fn generate(&mut self) -> Result<&GemGrid> {
        let outcome = self.begin_generation().and_then(|request| request.run());
        self.finish_generation(outcome)
    }

    /// Snapshot the current inputs and mark the state as generating.
    ///
    /// The returned request owns its inputs, so a front end can run it off
    /// the UI thread and hand the outcome back to
    /// [`finish_generation`](Self::finish_generation).
    pub fn begin_generation(&mut self) -> Result<GenerationRequest> {
        let image = self.image.clone().ok_or_else(|| GridError::ImageLoadError {
            message: "No image loaded".to_string(),
            source: None,
        })?;
        let region = self
            .region
            .unwrap_or_else(|| RegionOfInterest::whole(image.width(), image.height()));

        self.generating = true;
        Ok(GenerationRequest {
            image,
            region,
            dimensions: self.dimensions,
            config: self.config.clone(),
        })
    }

    /// Store the outcome of a request and clear the generating flag
    pub fn finish_generation(&mut self, outcome: Result<GemGrid>) -> Result<&GemGrid> {
        self.generating = false;

        match outcome {
            Ok(grid) => Ok(&*self.grid.insert(grid)),
            Err(e) => {
                tracing::warn!(error = %e, "grid generation failed");
                Err(e)
            }
        }
    }
}

/// Inputs of one generation, detached from the state that produced them
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    image: Bitmap,
    region: RegionOfInterest,
    dimensions: GridDimensions,
    config: GeneratorConfig,
}

impl GenerationRequest {
    pub fn run(&self) -> Result<GemGrid> {
        generate_grid(&self.image, &self.region, &self.dimensions, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbTriple;

    fn solid(color: RgbTriple) -> Bitmap {
        Bitmap::from_pixels(4, 4, &[color; 16]).unwrap()
    }

    struct FailingSource;

    impl ImageSource for FailingSource {
        fn decode(&self, _bytes: &[u8]) -> Result<Bitmap> {
            Err(GridError::ImageLoadError {
                message: "corrupt".into(),
                source: None,
            })
        }
    }

    #[test]
    fn test_generate_without_image() {
        let mut state = GeneratorState::default();
        let result = state.generate();
        assert!(matches!(result, Err(GridError::ImageLoadError { .. })));
        assert!(!state.is_generating());
        assert!(state.grid().is_none());
    }

    #[test]
    fn test_generate_stores_grid() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(1, 2, 3)));
        state.set_grid_size(3, 2);

        let grid = state.generate().unwrap();
        assert_eq!((grid.width, grid.height), (3, 2));
        assert!(grid.cells().all(|c| c == "#010203"));
        assert!(!state.is_generating());
        assert!(state.grid().is_some());
    }

    #[test]
    fn test_failure_keeps_previous_grid() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(9, 9, 9)));
        state.set_grid_size(2, 2);
        let before = state.generate().unwrap().clone();

        state.set_region(RegionOfInterest::new(100, 100, 5, 5));
        let result = state.generate();
        assert!(matches!(result, Err(GridError::InvalidRegion { .. })));
        assert_eq!(state.grid(), Some(&before));
        assert!(!state.is_generating());
    }

    #[test]
    fn test_failed_upload_keeps_image() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(5, 5, 5)));
        assert!(state.load_with(&FailingSource, b"junk").is_err());
        assert_eq!(state.image().map(|img| img.width()), Some(4));
    }

    #[test]
    fn test_generating_flag_spans_request() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(7, 7, 7)));
        state.set_grid_size(2, 2);

        let request = state.begin_generation().unwrap();
        assert!(state.is_generating());
        assert!(state.grid().is_none());

        // Inputs changed mid-flight do not affect the running request
        state.set_region(RegionOfInterest::new(100, 100, 1, 1));
        let outcome = request.run();
        let grid = state.finish_generation(outcome).unwrap().clone();
        assert!(!state.is_generating());
        assert!(grid.cells().all(|c| c == "#070707"));
    }

    #[test]
    fn test_failed_request_clears_flag_and_keeps_grid() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(1, 1, 1)));
        state.set_grid_size(1, 1);
        let before = state.generate().unwrap().clone();

        state.begin_generation().unwrap();
        assert!(state.is_generating());
        let result = state.finish_generation(Err(GridError::EmptyInput));
        assert!(matches!(result, Err(GridError::EmptyInput)));
        assert!(!state.is_generating());
        assert_eq!(state.grid(), Some(&before));
    }

    #[test]
    fn test_begin_without_image_does_not_set_flag() {
        let mut state = GeneratorState::default();
        assert!(state.begin_generation().is_err());
        assert!(!state.is_generating());
    }

    #[test]
    fn test_grid_size_is_clamped() {
        let mut state = GeneratorState::new(GeneratorConfig::default());
        state.set_grid_size(0, 1000);
        assert_eq!(state.dimensions().width(), 1);
        assert_eq!(state.dimensions().height(), 200);
    }

    #[test]
    fn test_new_image_resets_region() {
        let mut state = GeneratorState::default();
        state.set_image(solid(RgbTriple::new(0, 0, 0)));
        state.set_region(RegionOfInterest::new(1, 1, 2, 2));
        state.set_image(Bitmap::from_pixels(6, 3, &[RgbTriple::default(); 18]).unwrap());
        assert_eq!(state.region(), Some(RegionOfInterest::whole(6, 3)));
    }
}
