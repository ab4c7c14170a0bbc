//! Configuration types for the tiled cost map.

use serde::{Deserialize, Serialize};

use crate::error::{CostMapError, Result};

/// Largest tile raster edge (pixels).
pub const MAX_IMAGE_SIZE: usize = 8192;

/// Largest falloff radius (pixels).
///
/// Builds work on a raster padded by the falloff on each side, so the
/// working edge stays below `MAX_IMAGE_SIZE + 2 * MAX_FALLOFF_PIXELS`.
pub const MAX_FALLOFF_PIXELS: u32 = 1024;

/// Cost map configuration.
///
/// Covers the tiling resolution, the eviction threshold, and how
/// reference geometry is rasterized into each tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostMapConfig {
    /// Tile edge length in world units.
    #[serde(default = "default_unit_length")]
    pub unit_length: f32,

    /// Pixels per tile edge.
    #[serde(default = "default_image_size")]
    pub image_size: usize,

    /// Resident tiles kept before the oldest is evicted.
    #[serde(default = "default_max_tile_count")]
    pub max_tile_count: usize,

    /// Intensity correction exponent applied when tiles are read.
    #[serde(default = "default_gamma")]
    pub gamma: f32,

    /// Intensity written on pixels hit by a line feature.
    #[serde(default = "default_peak_intensity")]
    pub peak_intensity: u8,

    /// Pixel distance at which intensity decays to zero.
    #[serde(default = "default_falloff_pixels")]
    pub falloff_pixels: u32,

    /// Step along each feature when rasterizing (world units).
    #[serde(default = "default_rasterize_step")]
    pub rasterize_step: f32,

    /// Maximum elevation difference from the configured height for a
    /// feature to be rasterized (world units).
    #[serde(default = "default_height_tolerance")]
    pub height_tolerance: f32,
}

fn default_unit_length() -> f32 {
    40.0
}
fn default_image_size() -> usize {
    800
}
fn default_max_tile_count() -> usize {
    10
}
fn default_gamma() -> f32 {
    4.0
}
fn default_peak_intensity() -> u8 {
    255
}
fn default_falloff_pixels() -> u32 {
    100
}
fn default_rasterize_step() -> f32 {
    0.1
}
fn default_height_tolerance() -> f32 {
    4.0
}

impl Default for CostMapConfig {
    fn default() -> Self {
        Self {
            unit_length: default_unit_length(),
            image_size: default_image_size(),
            max_tile_count: default_max_tile_count(),
            gamma: default_gamma(),
            peak_intensity: default_peak_intensity(),
            falloff_pixels: default_falloff_pixels(),
            rasterize_step: default_rasterize_step(),
            height_tolerance: default_height_tolerance(),
        }
    }
}

impl CostMapConfig {
    /// Configuration with a specific tiling and defaults elsewhere.
    pub fn with_tiling(unit_length: f32, image_size: usize) -> Self {
        Self {
            unit_length,
            image_size,
            ..Default::default()
        }
    }

    /// Validated tiling parameters.
    pub fn tiling(&self) -> Result<Tiling> {
        Tiling::new(self.unit_length, self.image_size)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        self.tiling()?;
        if self.max_tile_count == 0 {
            return Err(CostMapError::Configuration(
                "max_tile_count must be at least 1".to_string(),
            ));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(CostMapError::Configuration(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        if self.falloff_pixels == 0 || self.falloff_pixels > MAX_FALLOFF_PIXELS {
            return Err(CostMapError::Configuration(format!(
                "falloff_pixels must be in 1..={}, got {}",
                MAX_FALLOFF_PIXELS, self.falloff_pixels
            )));
        }
        if !(self.rasterize_step.is_finite() && self.rasterize_step > 0.0) {
            return Err(CostMapError::Configuration(format!(
                "rasterize_step must be positive, got {}",
                self.rasterize_step
            )));
        }
        if self.height_tolerance.is_nan() || self.height_tolerance < 0.0 {
            return Err(CostMapError::Configuration(format!(
                "height_tolerance must be non-negative, got {}",
                self.height_tolerance
            )));
        }
        Ok(())
    }
}

/// Validated tiling resolution.
///
/// One per cache, fixed at construction and copied into every component
/// that builds Areas or tiles. The only constructor rejects non-positive
/// edge lengths and empty rasters, so any `Tiling` in hand is usable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tiling {
    unit_length: f32,
    image_size: usize,
}

impl Tiling {
    /// Validate tiling parameters.
    pub fn new(unit_length: f32, image_size: usize) -> Result<Self> {
        if !(unit_length.is_finite() && unit_length > 0.0) {
            return Err(CostMapError::Configuration(format!(
                "unit_length must be positive, got {}",
                unit_length
            )));
        }
        if image_size == 0 || image_size > MAX_IMAGE_SIZE {
            return Err(CostMapError::Configuration(format!(
                "image_size must be in 1..={}, got {}",
                MAX_IMAGE_SIZE, image_size
            )));
        }
        Ok(Self {
            unit_length,
            image_size,
        })
    }

    /// Tile edge length in world units.
    #[inline]
    pub fn unit_length(&self) -> f32 {
        self.unit_length
    }

    /// Pixels per tile edge.
    #[inline]
    pub fn image_size(&self) -> usize {
        self.image_size
    }

    /// World size of one pixel.
    #[inline]
    pub fn pixel_size(&self) -> f32 {
        self.unit_length / self.image_size as f32
    }
}
