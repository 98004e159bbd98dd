//! Pixel sampling module
//!
//! This module turns a region of a source bitmap into exactly one RGB
//! triple per grid cell, row-major.

pub mod region;
pub mod sampler;

pub use region::{ClampedRegion, GridDimensions, RegionOfInterest};
pub use sampler::PixelSampler;
