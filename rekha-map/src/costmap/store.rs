//! Tile storage with creation-order eviction.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::area::Area;
use super::tile::Tile;
use crate::error::{CostMapError, Result};

/// Area → tile map plus the order in which tiles were created.
///
/// Eviction is count-based and follows creation order, not access order:
/// a tile built long ago but read every frame is still the first to go
/// once enough newer tiles exist. Tiles are cheap to rebuild.
///
/// ```text
/// history:  [oldest] (0,0) → (3,1) → (7,7) [newest]
/// evict_obsolete(2)  ──▶  drops (0,0)
/// ```
#[derive(Debug, Default)]
pub struct TileStore {
    tiles: HashMap<Area, Arc<Tile>>,
    history: VecDeque<Area>,
}

impl TileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is a tile resident for this Area?
    #[inline]
    pub fn contains(&self, area: Area) -> bool {
        self.tiles.contains_key(&area)
    }

    /// Resident tile for an Area.
    pub fn get(&self, area: Area) -> Result<Arc<Tile>> {
        self.tiles
            .get(&area)
            .cloned()
            .ok_or(CostMapError::NotFound(area))
    }

    /// Borrow a resident tile without touching the reference count.
    #[inline]
    pub(crate) fn peek(&self, area: Area) -> Option<&Arc<Tile>> {
        self.tiles.get(&area)
    }

    /// Store a tile.
    ///
    /// Returns `true` when the Area is new; it is then appended to the
    /// history. Re-inserting a resident Area overwrites its raster but keeps
    /// its creation slot, and returns `false`.
    pub fn insert(&mut self, area: Area, tile: Arc<Tile>) -> bool {
        let is_new = self.tiles.insert(area, tile).is_none();
        if is_new {
            self.history.push_back(area);
        }
        is_new
    }

    /// Drop the oldest tiles until at most `max_count` remain.
    ///
    /// Returns the evicted Areas, oldest first.
    pub fn evict_obsolete(&mut self, max_count: usize) -> Vec<Area> {
        let mut evicted = Vec::new();
        while self.history.len() > max_count {
            let Some(oldest) = self.history.pop_front() else {
                break;
            };
            self.tiles.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    /// Number of resident tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if no tile is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Resident Areas, oldest first.
    pub fn areas(&self) -> impl Iterator<Item = Area> + '_ {
        self.history.iter().copied()
    }

    /// Drop every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.history.clear();
    }
}
