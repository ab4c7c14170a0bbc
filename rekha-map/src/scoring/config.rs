//! Scorer and corrector configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CostMapError, Result};

/// Line scoring parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Added to every sample's aligned intensity. Negative values penalize
    /// samples that land on empty map.
    #[serde(default = "default_score_offset")]
    pub score_offset: f32,

    /// Raw scores are clamped to ±this before rescaling.
    #[serde(default = "default_max_raw_score")]
    pub max_raw_score: f32,

    /// Weight given to a raw score of `-max_raw_score`.
    #[serde(default = "default_min_prob")]
    pub min_prob: f32,

    /// Exponential attenuation of samples far from the pose, per squared
    /// world unit.
    #[serde(default = "default_far_weight_gain")]
    pub far_weight_gain: f32,

    /// Walk spacing along each feature (world units).
    #[serde(default = "default_sample_step")]
    pub sample_step: f32,
}

fn default_score_offset() -> f32 {
    -64.0
}
fn default_max_raw_score() -> f32 {
    5000.0
}
fn default_min_prob() -> f32 {
    0.01
}
fn default_far_weight_gain() -> f32 {
    0.001
}
fn default_sample_step() -> f32 {
    0.1
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            score_offset: default_score_offset(),
            max_raw_score: default_max_raw_score(),
            min_prob: default_min_prob(),
            far_weight_gain: default_far_weight_gain(),
            sample_step: default_sample_step(),
        }
    }
}

impl ScorerConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        if !self.score_offset.is_finite() {
            return Err(CostMapError::Configuration(format!(
                "score_offset must be finite, got {}",
                self.score_offset
            )));
        }
        if !(self.max_raw_score.is_finite() && self.max_raw_score > 0.0) {
            return Err(CostMapError::Configuration(format!(
                "max_raw_score must be positive, got {}",
                self.max_raw_score
            )));
        }
        if !(self.min_prob > 0.0 && self.min_prob < 1.0) {
            return Err(CostMapError::Configuration(format!(
                "min_prob must be in (0, 1), got {}",
                self.min_prob
            )));
        }
        if !self.far_weight_gain.is_finite() {
            return Err(CostMapError::Configuration(format!(
                "far_weight_gain must be finite, got {}",
                self.far_weight_gain
            )));
        }
        if !(self.sample_step.is_finite() && self.sample_step > 0.0) {
            return Err(CostMapError::Configuration(format!(
                "sample_step must be positive, got {}",
                self.sample_step
            )));
        }
        Ok(())
    }
}

/// Particle corrector parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Weights are written back only once the weighted mean has moved more
    /// than this from the last applied mean (world units).
    #[serde(default = "default_min_mean_displacement")]
    pub min_mean_displacement: f32,
}

fn default_min_mean_displacement() -> f32 {
    1.0
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            min_mean_displacement: default_min_mean_displacement(),
        }
    }
}

impl CorrectorConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        if self.min_mean_displacement.is_nan() || self.min_mean_displacement < 0.0 {
            return Err(CostMapError::Configuration(format!(
                "min_mean_displacement must be non-negative, got {}",
                self.min_mean_displacement
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
        assert!(CorrectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_prob_bounds() {
        for min_prob in [0.0, 1.0, -0.5, f32::NAN] {
            let config = ScorerConfig {
                min_prob,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "min_prob {min_prob} accepted");
        }
    }

    #[test]
    fn test_non_positive_max_raw_score() {
        let config = ScorerConfig {
            max_raw_score: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CostMapError::Configuration(_))
        ));
    }

    #[test]
    fn test_negative_displacement() {
        let config = CorrectorConfig {
            min_mean_displacement: -1.0,
        };
        assert!(config.validate().is_err());
    }
}
