//! Error types for RekhaMap

use crate::costmap::Area;

/// Result type alias
pub type Result<T> = std::result::Result<T, CostMapError>;

/// Cost map error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostMapError {
    /// Tiling or scoring parameters unset or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Tile requested from the store that was never built or was evicted
    #[error("Tile not found: {0}")]
    NotFound(Area),

    /// Polygon with fewer than 3 vertices, or a zero-length segment
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
