//! Immutable tile rasters.
//!
//! Uses Structure-of-Arrays (SoA) layout, one `Vec<u8>` per channel.

use super::area::Area;
use super::config::Tiling;
use crate::core::WorldPoint;

/// Quantize a bearing in degrees into the direction channel.
///
/// 0–255 covers 0–360°; bearings wrap.
#[inline]
pub fn encode_direction(degrees: f32) -> u8 {
    let wrapped = degrees.rem_euclid(360.0);
    ((wrapped / 360.0 * 256.0).round() as u32 % 256) as u8
}

/// Bearing in degrees for a direction channel value.
#[inline]
pub fn decode_direction(value: u8) -> f32 {
    value as f32 * 360.0 / 256.0
}

/// Value returned by the scoring lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostSample {
    /// Gamma-corrected intensity (0 = no nearby marking)
    pub intensity: u8,
    /// Quantized bearing of the nearest marking
    pub direction: u8,
}

impl CostSample {
    /// Bearing of the nearest marking in degrees.
    #[inline]
    pub fn direction_degrees(&self) -> f32 {
        decode_direction(self.direction)
    }
}

/// Three-channel debug value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugPixel {
    /// Gamma-corrected intensity
    pub b: u8,
    /// Quantized direction
    pub g: u8,
    /// Drivable mask (255 = drivable)
    pub r: u8,
}

/// Raw stored channels of one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawPixel {
    /// Intensity before gamma correction
    pub intensity: u8,
    /// Quantized direction
    pub direction: u8,
    /// Drivable mask (255 = drivable, 0 = masked)
    pub mask: u8,
}

/// Rasterized cost map of one [`Area`].
///
/// Pixel `(col, row)` covers the world square starting at
/// `origin + (col, row) * pixel_size`; row 0 is the bottom edge of the tile.
/// Tiles are never modified after the builder hands them out.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    area: Area,
    origin: WorldPoint,
    pixel_size: f32,
    size: usize,
    intensity: Vec<u8>,
    direction: Vec<u8>,
    mask: Vec<u8>,
}

impl Tile {
    /// All-zero tile with every pixel drivable.
    pub fn blank(area: Area, tiling: &Tiling) -> Self {
        let size = tiling.image_size();
        Self {
            area,
            origin: area.min_corner(tiling),
            pixel_size: tiling.pixel_size(),
            size,
            intensity: vec![0; size * size],
            direction: vec![0; size * size],
            mask: vec![255; size * size],
        }
    }

    /// Assemble a tile from finished channels.
    pub(crate) fn from_channels(
        area: Area,
        tiling: &Tiling,
        intensity: Vec<u8>,
        direction: Vec<u8>,
        mask: Vec<u8>,
    ) -> Self {
        let size = tiling.image_size();
        debug_assert_eq!(intensity.len(), size * size);
        debug_assert_eq!(direction.len(), size * size);
        debug_assert_eq!(mask.len(), size * size);
        Self {
            area,
            origin: area.min_corner(tiling),
            pixel_size: tiling.pixel_size(),
            size,
            intensity,
            direction,
            mask,
        }
    }

    /// Key of this tile.
    #[inline]
    pub fn area(&self) -> Area {
        self.area
    }

    /// Pixels per edge.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// World position of the bottom-left corner.
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// World size of one pixel.
    #[inline]
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// Raw intensity channel (row-major, row 0 at the bottom).
    pub fn intensity(&self) -> &[u8] {
        &self.intensity
    }

    /// Direction channel.
    pub fn direction(&self) -> &[u8] {
        &self.direction
    }

    /// Drivable mask channel.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Pixel holding a world point, clamped to the tile.
    ///
    /// Points on or just past the tile edge (floating rounding, or a
    /// caller reading a neighbouring tile) map to the nearest edge pixel.
    #[inline]
    pub fn pixel_of(&self, point: WorldPoint) -> (usize, usize) {
        let max = (self.size - 1) as f32;
        let col = ((point.x - self.origin.x) / self.pixel_size).floor();
        let row = ((point.y - self.origin.y) / self.pixel_size).floor();
        // NaN clamps to NaN and casts to 0.
        (col.clamp(0.0, max) as usize, row.clamp(0.0, max) as usize)
    }

    /// Stored channels at a pixel. Out-of-range indices are clamped.
    #[inline]
    pub fn raw(&self, col: usize, row: usize) -> RawPixel {
        let col = col.min(self.size - 1);
        let row = row.min(self.size - 1);
        let index = row * self.size + col;
        RawPixel {
            intensity: self.intensity[index],
            direction: self.direction[index],
            mask: self.mask[index],
        }
    }

    /// Stored channels at a world point.
    #[inline]
    pub fn sample(&self, point: WorldPoint) -> RawPixel {
        let (col, row) = self.pixel_of(point);
        self.raw(col, row)
    }

    /// True if no pixel carries intensity.
    pub fn is_blank(&self) -> bool {
        self.intensity.iter().all(|&v| v == 0)
    }

    /// Number of masked pixels.
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m == 0).count()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.intensity.len() + self.direction.len() + self.mask.len()
    }
}
