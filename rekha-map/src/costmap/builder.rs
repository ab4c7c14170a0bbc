//! Tile rasterization from reference geometry.
//!
//! ## Pipeline
//!
//! ```text
//! line features ──▶ height gate ──▶ coarse reject ──▶ seed pixels
//!                                                         │
//!                                                         ▼
//!                                              nearest-seed propagation
//!                                              (two-pass, 8-neighbour)
//!                                                         │
//!                                                         ▼
//!                                     intensity = peak · (1 − d / falloff)
//!                                     direction = bearing of nearest seed
//!                                                         │
//! polygons ──────────────────────────────▶ drivable mask ─┴──▶ Tile
//! ```
//!
//! Seeding and propagation run on a working raster that extends the tile by
//! `falloff_pixels` on every side, so a marking just across a tile seam still
//! shades the pixels next to it.

use super::area::Area;
use super::config::{CostMapConfig, Tiling};
use super::tile::{Tile, encode_direction};
use crate::core::{AreaKind, AreaPolygon, LineFeature, WorldPoint};

const NO_SEED: u32 = u32::MAX;

/// Pixel hit directly by a line feature.
#[derive(Clone, Copy, Debug)]
struct Seed {
    col: i32,
    row: i32,
    direction: u8,
}

/// Rasterizes single tiles.
#[derive(Clone, Debug)]
pub struct TileBuilder {
    tiling: Tiling,
    peak_intensity: u8,
    falloff_pixels: u32,
    rasterize_step: f32,
    height_tolerance: f32,
}

impl TileBuilder {
    /// Create a builder. `config` is expected to be validated.
    pub fn new(tiling: Tiling, config: &CostMapConfig) -> Self {
        Self {
            tiling,
            peak_intensity: config.peak_intensity,
            falloff_pixels: config.falloff_pixels.max(1),
            rasterize_step: config.rasterize_step,
            height_tolerance: config.height_tolerance,
        }
    }

    /// Tiling this builder rasterizes for.
    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    /// Build the tile for `area`.
    ///
    /// With `height` set, features whose mean elevation is further than the
    /// tolerance from it are ignored. With polygons loaded, pixels outside
    /// every drivable polygon (or inside an excluded one) are masked and
    /// zeroed. Empty geometry gives an all-zero tile.
    pub fn build(
        &self,
        area: Area,
        features: &[LineFeature],
        polygons: &[AreaPolygon],
        height: Option<f32>,
    ) -> Tile {
        let size = self.tiling.image_size();
        let margin = self.falloff_pixels as usize;
        let work = size + 2 * margin;
        let pixel_size = self.tiling.pixel_size();

        let (tile_min, tile_max) = area.to_world_bounds(&self.tiling);
        let margin_world = margin as f32 * pixel_size;
        let work_min = tile_min - WorldPoint::new(margin_world, margin_world);
        let work_max = tile_max + WorldPoint::new(margin_world, margin_world);

        // === Seeding ===
        let mut nearest = vec![NO_SEED; work * work];
        let mut seeds: Vec<Seed> = Vec::new();
        let mut features_used = 0usize;

        for feature in features {
            if feature.is_degenerate() {
                continue;
            }
            if let Some(h) = height {
                if (feature.mean_elevation() - h).abs() > self.height_tolerance {
                    continue;
                }
            }
            let (f_min, f_max) = feature.bounds();
            if f_max.x < work_min.x
                || f_min.x > work_max.x
                || f_max.y < work_min.y
                || f_min.y > work_max.y
            {
                continue;
            }

            features_used += 1;
            let direction = encode_direction(feature.bearing_degrees());
            let points = feature
                .samples(self.rasterize_step)
                .chain(std::iter::once(feature.end.xy()));

            for p in points {
                let col = ((p.x - work_min.x) / pixel_size).floor();
                let row = ((p.y - work_min.y) / pixel_size).floor();
                if col < 0.0 || row < 0.0 || col >= work as f32 || row >= work as f32 {
                    continue;
                }
                let (col, row) = (col as i32, row as i32);
                let index = row as usize * work + col as usize;

                match nearest[index] {
                    NO_SEED => {
                        nearest[index] = seeds.len() as u32;
                        seeds.push(Seed {
                            col,
                            row,
                            direction,
                        });
                    }
                    // Later features overwrite the direction of a shared pixel.
                    existing => seeds[existing as usize].direction = direction,
                }
            }
        }

        // === Distance falloff ===
        let mut intensity = vec![0u8; size * size];
        let mut directions = vec![0u8; size * size];

        if !seeds.is_empty() {
            propagate_nearest(&mut nearest, &seeds, work);

            let falloff = self.falloff_pixels as f32;
            let peak = self.peak_intensity as f32;
            for row in 0..size {
                for col in 0..size {
                    let (wc, wr) = (col + margin, row + margin);
                    let s = nearest[wr * work + wc];
                    if s == NO_SEED {
                        continue;
                    }
                    let seed = seeds[s as usize];
                    let dc = wc as f32 - seed.col as f32;
                    let dr = wr as f32 - seed.row as f32;
                    let d = (dc * dc + dr * dr).sqrt();
                    if d >= falloff {
                        continue;
                    }
                    let value = (peak * (1.0 - d / falloff)).round() as u8;
                    if value > 0 {
                        intensity[row * size + col] = value;
                        directions[row * size + col] = seed.direction;
                    }
                }
            }
        }

        // === Drivable mask ===
        let mask = self.drivable_mask(tile_min, tile_max, polygons);
        for ((m, i), d) in mask.iter().zip(intensity.iter_mut()).zip(directions.iter_mut()) {
            if *m == 0 {
                *i = 0;
                *d = 0;
            }
        }

        log::debug!(
            "Built tile {}: {} features, {} seed pixels, {} polygons",
            area,
            features_used,
            seeds.len(),
            polygons.len()
        );

        Tile::from_channels(area, &self.tiling, intensity, directions, mask)
    }

    /// Mask channel: 255 for drivable pixels, 0 for masked ones.
    fn drivable_mask(
        &self,
        tile_min: WorldPoint,
        tile_max: WorldPoint,
        polygons: &[AreaPolygon],
    ) -> Vec<u8> {
        let size = self.tiling.image_size();
        if polygons.is_empty() {
            return vec![255; size * size];
        }

        let nearby: Vec<&AreaPolygon> = polygons
            .iter()
            .filter(|p| p.overlaps(tile_min, tile_max))
            .collect();
        if !nearby.iter().any(|p| p.kind() == AreaKind::Drivable) {
            return vec![0; size * size];
        }

        let pixel_size = self.tiling.pixel_size();
        let mut mask = vec![0u8; size * size];
        for row in 0..size {
            let y = tile_min.y + (row as f32 + 0.5) * pixel_size;
            for col in 0..size {
                let center = WorldPoint::new(tile_min.x + (col as f32 + 0.5) * pixel_size, y);
                let mut drivable = false;
                for polygon in &nearby {
                    if !polygon.contains(center) {
                        continue;
                    }
                    match polygon.kind() {
                        AreaKind::Drivable => drivable = true,
                        AreaKind::Excluded => {
                            drivable = false;
                            break;
                        }
                    }
                }
                if drivable {
                    mask[row * size + col] = 255;
                }
            }
        }
        mask
    }
}

/// Give every pixel the index of its (approximately) nearest seed.
///
/// Two row sweeps in each direction, 8SSEDT style. The downward pass pulls
/// from the row above and the left neighbour, then re-sweeps the row from
/// the right. The upward pass mirrors it. The result can differ from the
/// true nearest seed by a fraction of a pixel.
fn propagate_nearest(nearest: &mut [u32], seeds: &[Seed], width: usize) {
    const DOWN: [(i32, i32); 4] = [(-1, -1), (0, -1), (1, -1), (-1, 0)];
    const UP: [(i32, i32); 4] = [(1, 1), (0, 1), (-1, 1), (1, 0)];
    const LEFT: [(i32, i32); 1] = [(1, 0)];
    const RIGHT: [(i32, i32); 1] = [(-1, 0)];

    let w = width as i32;
    let dist2 = |seed: u32, col: i32, row: i32| -> i64 {
        let s = seeds[seed as usize];
        let dc = (col - s.col) as i64;
        let dr = (row - s.row) as i64;
        dc * dc + dr * dr
    };

    let relax = |nearest: &mut [u32], col: i32, row: i32, offsets: &[(i32, i32)]| {
        let index = (row * w + col) as usize;
        let mut best = nearest[index];
        let mut best_d2 = if best == NO_SEED {
            i64::MAX
        } else {
            dist2(best, col, row)
        };
        for &(dc, dr) in offsets {
            let (nc, nr) = (col + dc, row + dr);
            if nc < 0 || nr < 0 || nc >= w || nr >= w {
                continue;
            }
            let candidate = nearest[(nr * w + nc) as usize];
            if candidate == NO_SEED || candidate == best {
                continue;
            }
            let d2 = dist2(candidate, col, row);
            if d2 < best_d2 {
                best = candidate;
                best_d2 = d2;
            }
        }
        nearest[index] = best;
    };

    for row in 0..w {
        for col in 0..w {
            relax(&mut *nearest, col, row, &DOWN[..]);
        }
        for col in (0..w).rev() {
            relax(&mut *nearest, col, row, &LEFT[..]);
        }
    }
    for row in (0..w).rev() {
        for col in (0..w).rev() {
            relax(&mut *nearest, col, row, &UP[..]);
        }
        for col in 0..w {
            relax(&mut *nearest, col, row, &RIGHT[..]);
        }
    }
}
