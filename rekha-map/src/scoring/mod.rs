//! Particle weighting against the cost map.
//!
//! - [`LineScorer`]: raw alignment score of observed features and the
//!   score-to-weight curve
//! - [`ParticleCorrector`]: one gated weighting step over a batch

mod config;
mod corrector;
mod particle;
mod scorer;

pub use config::{CorrectorConfig, ScorerConfig};
pub use corrector::{CorrectionOutcome, ParticleCorrector};
pub use particle::{Particle, mean_pose};
pub use scorer::{LineScorer, ScoredSample};
