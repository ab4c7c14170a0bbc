//! Configuration loading errors.

use crate::error::CostMapError;

/// Config load error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// File parsed but a value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CostMapError),
}
