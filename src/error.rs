//! Error types for the gem_template library

use thiserror::Error;

/// Result type alias for gem_template operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Error types for grid generation
#[derive(Error, Debug)]
pub enum GridError {
    /// Source image could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File extension does not name a known image format
    #[error("Unknown image format for file: {path}")]
    UnsupportedFormat { path: String },

    /// Region of interest is empty once clamped to the image bounds
    #[error("Invalid region ({x}, {y}, {width}x{height}): {reason}")]
    InvalidRegion {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        reason: String,
    },

    /// Grid dimensions outside 1..=max
    #[error("Invalid grid size {width}x{height} (each side must be in 1..={max})")]
    InvalidGridSize { width: u32, height: u32, max: u32 },

    /// Quantizer was handed no samples
    #[error("Cannot quantize an empty sample set")]
    EmptyInput,

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GridError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if the caller can fix this by adjusting its inputs and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GridError::InvalidRegion { .. }
                | GridError::InvalidGridSize { .. }
                | GridError::InvalidParameter { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            GridError::ImageLoadError { .. } | GridError::UnsupportedFormat { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            GridError::InvalidRegion { .. } => {
                "The selected area is outside the image. Please adjust the crop box.".to_string()
            }
            GridError::InvalidGridSize { max, .. } => {
                format!("Grid width and height must be between 1 and {}.", max)
            }
            _ => "Could not generate the template. Please try again.".to_string(),
        }
    }
}
