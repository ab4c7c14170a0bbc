//! Tile raster export to images.
//!
//! Tiles store row 0 at the bottom (minimum y); images put row 0 at the
//! top, so rows are flipped on export.

use std::path::Path;

use image::{Rgb, RgbImage};

use super::color::{blue_red, hsv_to_rgb};
use crate::costmap::{GammaLut, Tile, decode_direction};
use crate::scoring::ScoredSample;

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Image encoding or file error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// How the tile channels map to colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TileImageStyle {
    /// Hue from direction, brightness from intensity.
    #[default]
    Direction,
    /// Grey from intensity only.
    Intensity,
}

/// Masked pixels in the Direction style.
const MASKED: Rgb<u8> = Rgb([48, 0, 48]);

/// Render a tile. Intensity is gamma-corrected the same way lookups see it.
pub fn tile_to_image(tile: &Tile, gamma: &GammaLut, style: TileImageStyle) -> RgbImage {
    let size = tile.size();
    let mut image = RgbImage::new(size as u32, size as u32);

    for row in 0..size {
        let y = (size - 1 - row) as u32;
        for col in 0..size {
            let raw = tile.raw(col, row);
            let intensity = gamma.apply(raw.intensity);
            let pixel = match style {
                TileImageStyle::Intensity => Rgb([intensity; 3]),
                TileImageStyle::Direction if raw.mask == 0 => MASKED,
                TileImageStyle::Direction => Rgb(hsv_to_rgb(
                    decode_direction(raw.direction),
                    1.0,
                    intensity as f32 / 255.0,
                )
                .to_rgb8()),
            };
            image.put_pixel(col as u32, y, pixel);
        }
    }
    image
}

/// Render a tile and write it as PNG.
pub fn save_tile_png(
    path: &Path,
    tile: &Tile,
    gamma: &GammaLut,
    style: TileImageStyle,
) -> Result<(), ExportError> {
    tile_to_image(tile, gamma, style).save(path)?;
    log::debug!("Saved tile {} to {}", tile.area(), path.display());
    Ok(())
}

/// Paint scored samples onto an image rendered from `tile`.
///
/// Colour runs red (most negative) through white to blue (most positive),
/// saturating at `max_abs_score`. Samples outside the tile are skipped.
/// Returns how many were painted.
pub fn overlay_scored_samples(
    image: &mut RgbImage,
    tile: &Tile,
    samples: &[ScoredSample],
    max_abs_score: f32,
) -> usize {
    let size = tile.size();
    let origin = tile.origin();
    let scale = if max_abs_score > 0.0 { max_abs_score } else { 1.0 };
    let mut painted = 0;

    for sample in samples {
        let col = ((sample.point.x - origin.x) / tile.pixel_size()).floor();
        let row = ((sample.point.y - origin.y) / tile.pixel_size()).floor();
        if !(col >= 0.0 && row >= 0.0 && col < size as f32 && row < size as f32) {
            continue;
        }
        let (col, row) = (col as u32, row as usize);
        let y = (size - 1 - row) as u32;
        if col >= image.width() || y >= image.height() {
            continue;
        }
        let color = blue_red(0.5 + 0.5 * sample.score / scale);
        image.put_pixel(col, y, Rgb(color.to_rgb8()));
        painted += 1;
    }
    painted
}
