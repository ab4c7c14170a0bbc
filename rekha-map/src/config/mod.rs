//! Unified configuration loading for RekhaMap.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_map::config::RekhaConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = RekhaConfig::load_default()?;
//!
//! let mut cache = config.to_cache()?;
//! let mut corrector = config.to_corrector()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`CostMapConfig`](crate::costmap::CostMapConfig) | Tiling, falloff, gamma, eviction |
//! | [`ScorerConfig`](crate::scoring::ScorerConfig) | Score offset, weight curve, sampling |
//! | [`CorrectorConfig`](crate::scoring::CorrectorConfig) | Mean displacement gate |
//!
//! ## Example YAML
//!
//! ```yaml
//! cost_map:
//!   unit_length: 40.0     # meters per tile edge
//!   image_size: 800       # 5cm pixels
//!   max_tile_count: 10
//!   gamma: 4.0
//!
//! scorer:
//!   score_offset: -64.0
//!   max_raw_score: 5000.0
//!   min_prob: 0.01
//!
//! corrector:
//!   min_mean_displacement: 1.0
//! ```

mod error;
mod rekha;

pub use error::ConfigLoadError;
pub use rekha::RekhaConfig;
