//! # RekhaMap
//!
//! Tiled line-feature cost map for weighting localization particles.
//!
//! ## Overview
//!
//! The known map is a set of 3D line features (lane markings, curbs, wall
//! edges) and optional area polygons. RekhaMap rasterizes that geometry on
//! demand into square tiles around wherever it is queried, and scores
//! observed features against them:
//!
//! ```text
//!   line features ─┐                     ┌─► lookup2 / lookup3
//!   area polygons ─┼─► CostMapCache ─────┤
//!   height ────────┘   (lazy tiles,      └─► LineScorer ──► particle weights
//!                       FIFO eviction)             │
//!                                          ParticleCorrector (mean gate)
//! ```
//!
//! ## Features
//!
//! - **Lazy tiling**: one raster per square Area, built on first lookup
//! - **Bounded memory**: creation-order eviction past `max_tile_count`
//! - **Distance falloff**: intensity decays linearly away from lines, and
//!   each pixel carries the bearing of its nearest line
//! - **Drivable masking**: polygons mask out everything off the road
//! - **Parallel weighting**: [`SharedCostMap`] with one lookup handle per
//!   rayon worker
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_map::{CostMapCache, CostMapConfig, LineScorer, Particle, ScorerConfig};
//!
//! let mut cache = CostMapCache::new(CostMapConfig::default())?;
//! cache.set_line_features(map_lines);
//!
//! let scorer = LineScorer::new(ScorerConfig::default())?;
//! scorer.weight_particles(&mut particles, &observed_lines, &mut cache);
//! ```
//!
//! ## Coordinate System
//!
//! - World plane in meters, X east, Y north
//! - Theta in radians, CCW positive from +X
//! - Directions stored in tiles are bearings in degrees, [0, 360)

#![warn(missing_docs)]

// Core geometry
pub mod core;

// Tiles, cache and shared cache
pub mod costmap;

// Particle scoring
pub mod scoring;

// Unified configuration
pub mod config;

// Debug image export
pub mod io;

pub mod error;

pub use self::core::{
    AreaKind, AreaPolygon, LabeledPoint, LineFeature, Point3, Pose2D, WorldPoint, normalize_angle,
};

pub use costmap::{
    Area, CostMapCache, CostMapConfig, CostQuery, CostSample, DebugPixel, GammaLut, SharedCostMap,
    SharedQuery, Tile, TileBounds, Tiling,
};

pub use scoring::{
    CorrectionOutcome, CorrectorConfig, LineScorer, Particle, ParticleCorrector, ScoredSample,
    ScorerConfig, mean_pose,
};

pub use config::{ConfigLoadError, RekhaConfig};

pub use error::{CostMapError, Result};
