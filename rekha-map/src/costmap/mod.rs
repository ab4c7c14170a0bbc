//! Tiled cost map.
//!
//! The plane is cut into square Areas of `unit_length` meters. Each Area gets
//! a raster tile the first time it is looked up:
//!
//! ```text
//!   WorldPoint ──► Area (floor(p / unit_length)) ──► TileStore
//!                                                      │
//!                                            hit ◄─────┴────► miss
//!                                             │                 │
//!                                             │           TileBuilder
//!                                             │        (lines, polygons,
//!                                             │          height filter)
//!                                             ▼                 │
//!                                        pixel sample ◄─────────┘
//!                                             │
//!                                        GammaLut ──► CostSample
//! ```
//!
//! Each tile holds three u8 channels: intensity (255 on a line, falling off
//! with distance), direction (bearing of the nearest line, 0..360° in
//! 0..256) and mask (255 where drivable).
//!
//! [`CostMapCache`] is the single-owner façade. [`SharedCostMap`] wraps it in
//! a read/write lock for parallel weighting.

mod area;
mod builder;
mod cache;
mod config;
mod gamma;
mod query;
mod shared;
mod store;
mod tile;

pub use area::Area;
pub use builder::TileBuilder;
pub use cache::{CostMapCache, TileBounds};
pub use config::{CostMapConfig, MAX_FALLOFF_PIXELS, MAX_IMAGE_SIZE, Tiling};
pub use gamma::GammaLut;
pub use query::CostQuery;
pub use shared::{SharedCostMap, SharedQuery};
pub use store::TileStore;
pub use tile::{CostSample, DebugPixel, RawPixel, Tile, decode_direction, encode_direction};
