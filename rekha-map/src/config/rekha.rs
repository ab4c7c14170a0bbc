//! Main RekhaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;
use crate::costmap::{CostMapCache, CostMapConfig, SharedCostMap};
use crate::error::Result;
use crate::scoring::{CorrectorConfig, LineScorer, ParticleCorrector, ScorerConfig};

/// Full RekhaMap configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RekhaConfig {
    /// Tiling and rasterization
    #[serde(default)]
    pub cost_map: CostMapConfig,

    /// Line scoring
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Weighting gate
    #[serde(default)]
    pub corrector: CorrectorConfig,
}

impl RekhaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> std::result::Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string. Every section is validated.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.cost_map.validate()?;
        self.scorer.validate()?;
        self.corrector.validate()
    }

    /// Empty cache for this configuration
    pub fn to_cache(&self) -> Result<CostMapCache> {
        CostMapCache::new(self.cost_map.clone())
    }

    /// Empty shared cache for this configuration
    pub fn to_shared_cache(&self) -> Result<SharedCostMap> {
        SharedCostMap::from_config(self.cost_map.clone())
    }

    /// Scorer for this configuration
    pub fn to_scorer(&self) -> Result<LineScorer> {
        LineScorer::new(self.scorer.clone())
    }

    /// Corrector for this configuration
    pub fn to_corrector(&self) -> Result<ParticleCorrector> {
        ParticleCorrector::new(self.corrector.clone(), self.to_scorer()?)
    }
}
