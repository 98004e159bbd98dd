//! Configuration for the grid generation pipeline.
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use gem_template::GeneratorConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = GeneratorConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = GeneratorConfig::default();
//! # Ok::<(), gem_template::GridError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{grid, DEFAULT_MAX_COLORS};
use crate::{GridError, Result};

/// How a grid cell's colour is taken from its source sub-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Coverage-weighted average of every source pixel under the cell
    #[default]
    Area,
    /// The single source pixel under the cell centre
    Nearest,
}

/// Tunable parameters for one generator.
///
/// Can be serialized to/from JSON so a template can be reproduced later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Upper bound on palette size
    pub max_colors: usize,

    /// Upper bound on grid width and height
    pub max_grid_dimension: u32,

    /// Resampling policy for the pixel sampler
    pub resample: ResampleFilter,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            max_grid_dimension: grid::MAX_DIMENSION,
            resample: ResampleFilter::Area,
        }
    }
}

impl GeneratorConfig {
    /// Config with a different palette size and defaults otherwise
    pub fn with_max_colors(max_colors: usize) -> Self {
        Self {
            max_colors,
            ..Self::default()
        }
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_colors == 0 {
            return Err(GridError::invalid_parameter("max_colors", self.max_colors));
        }
        if self.max_grid_dimension < grid::MIN_DIMENSION {
            return Err(GridError::invalid_parameter(
                "max_grid_dimension",
                self.max_grid_dimension,
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GridError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            GridError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GridError::config("Failed to serialize config", e))?;
        std::fs::write(path, json).map_err(|e| {
            GridError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
