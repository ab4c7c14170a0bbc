//! Lock-guarded cost map for parallel particle weighting.
//!
//! Resident tiles are read under a shared lock. Builds and geometry updates
//! take the exclusive lock, so many workers can look up concurrently while
//! two workers never build the same Area twice.
//!
//! ```text
//!   worker ──► SharedQuery ──(same Area)──► cached Arc<Tile>
//!                  │
//!                  └──(new Area)──► read lock ──hit──► Arc<Tile>
//!                                      │
//!                                     miss
//!                                      ▼
//!                                  write lock ──► get-or-build
//! ```

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::area::Area;
use super::cache::CostMapCache;
use super::config::{CostMapConfig, Tiling};
use super::gamma::GammaLut;
use super::query::CostQuery;
use super::tile::{CostSample, DebugPixel, Tile};
use crate::core::{AreaPolygon, LineFeature, WorldPoint};
use crate::error::Result;

/// [`CostMapCache`] behind a `parking_lot::RwLock`.
#[derive(Debug)]
pub struct SharedCostMap {
    inner: RwLock<CostMapCache>,
    tiling: Tiling,
    gamma: GammaLut,
}

impl SharedCostMap {
    /// Wrap an existing cache.
    pub fn new(cache: CostMapCache) -> Self {
        Self {
            tiling: *cache.tiling(),
            gamma: cache.gamma().clone(),
            inner: RwLock::new(cache),
        }
    }

    /// Create an empty shared cache.
    pub fn from_config(config: CostMapConfig) -> Result<Self> {
        CostMapCache::new(config).map(Self::new)
    }

    /// Tile for an Area, built under the write lock on a miss.
    pub fn tile_at(&self, area: Area) -> Arc<Tile> {
        let resident = self.inner.read().resident(area);
        if let Some(tile) = resident {
            return tile;
        }
        // Another worker may have built it between the two locks;
        // tile_at rechecks before building.
        self.inner.write().tile_at(area)
    }

    /// Tile containing a world point.
    pub fn tile_for(&self, point: WorldPoint) -> Arc<Tile> {
        self.tile_at(Area::from_point(point, &self.tiling))
    }

    /// Gamma-corrected intensity and direction at a world point.
    pub fn lookup2(&self, point: WorldPoint) -> CostSample {
        let raw = self.tile_for(point).sample(point);
        CostSample {
            intensity: self.gamma.apply(raw.intensity),
            direction: raw.direction,
        }
    }

    /// Debug lookup with the mask channel.
    pub fn lookup3(&self, point: WorldPoint) -> DebugPixel {
        let raw = self.tile_for(point).sample(point);
        DebugPixel {
            b: self.gamma.apply(raw.intensity),
            g: raw.direction,
            r: raw.mask,
        }
    }

    /// Per-worker lookup handle. Keeps the last tile so consecutive samples
    /// in one Area skip the lock entirely.
    pub fn query(&self) -> SharedQuery<'_> {
        SharedQuery {
            map: self,
            last: None,
        }
    }

    /// Replace the line features.
    pub fn set_line_features(&self, features: Vec<LineFeature>) -> usize {
        self.inner.write().set_line_features(features)
    }

    /// Replace the area polygons.
    pub fn set_polygons(&self, polygons: Vec<AreaPolygon>) {
        self.inner.write().set_polygons(polygons);
    }

    /// Set or clear the elevation filter.
    pub fn set_height(&self, height: Option<f32>) {
        self.inner.write().set_height(height);
    }

    /// Drop the oldest tiles beyond the limit.
    pub fn evict(&self) -> usize {
        self.inner.write().evict()
    }

    /// Shared access to the wrapped cache.
    pub fn read(&self) -> RwLockReadGuard<'_, CostMapCache> {
        self.inner.read()
    }

    /// Exclusive access to the wrapped cache.
    pub fn write(&self) -> RwLockWriteGuard<'_, CostMapCache> {
        self.inner.write()
    }

    /// Unwrap the cache.
    pub fn into_inner(self) -> CostMapCache {
        self.inner.into_inner()
    }
}

/// Lookup handle borrowed from a [`SharedCostMap`].
#[derive(Debug)]
pub struct SharedQuery<'a> {
    map: &'a SharedCostMap,
    last: Option<Arc<Tile>>,
}

impl CostQuery for SharedQuery<'_> {
    fn query(&mut self, point: WorldPoint) -> CostSample {
        let area = Area::from_point(point, &self.map.tiling);
        let raw = match &self.last {
            Some(tile) if tile.area() == area => tile.sample(point),
            _ => {
                let tile = self.map.tile_at(area);
                let raw = tile.sample(point);
                self.last = Some(tile);
                raw
            }
        };
        CostSample {
            intensity: self.map.gamma.apply(raw.intensity),
            direction: raw.direction,
        }
    }
}
