//! One weighting step over a particle batch.
//!
//! ```text
//!   particles ──► scratch copy ──► LineScorer ──► cache evict
//!                                                    │
//!                                               mean_pose
//!                                                    │
//!                          moved > min_mean_displacement (or first batch)?
//!                                 yes │                    │ no
//!                          write weights back        leave particles
//! ```

use super::config::CorrectorConfig;
use super::particle::{Particle, mean_pose};
use super::scorer::LineScorer;
use crate::core::{LineFeature, Pose2D};
use crate::costmap::{CostMapCache, SharedCostMap};
use crate::error::Result;

/// Result of [`ParticleCorrector::correct`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectionOutcome {
    /// Weights were written back.
    Applied {
        /// Weighted mean of the new weights.
        mean: Pose2D,
    },
    /// The mean has not moved far enough since the last applied batch;
    /// particles were left untouched.
    Skipped {
        /// Weighted mean the new weights would have given.
        mean: Pose2D,
    },
    /// Nothing to weight.
    Empty,
}

impl CorrectionOutcome {
    /// Were the weights written back?
    pub fn is_applied(&self) -> bool {
        matches!(self, CorrectionOutcome::Applied { .. })
    }
}

/// Weights particle batches and gates updates on mean displacement.
#[derive(Debug, Clone)]
pub struct ParticleCorrector {
    config: CorrectorConfig,
    scorer: LineScorer,
    last_mean: Option<Pose2D>,
}

impl ParticleCorrector {
    /// Create a corrector.
    pub fn new(config: CorrectorConfig, scorer: LineScorer) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer,
            last_mean: None,
        })
    }

    /// Scorer used for weighting.
    pub fn scorer(&self) -> &LineScorer {
        &self.scorer
    }

    /// Mean of the last applied batch.
    pub fn last_mean(&self) -> Option<Pose2D> {
        self.last_mean
    }

    /// Forget the last applied mean so the next batch is always applied.
    pub fn reset(&mut self) {
        self.last_mean = None;
    }

    /// Weight `particles` against an exclusively owned cache.
    pub fn correct(
        &mut self,
        particles: &mut [Particle],
        features: &[LineFeature],
        cache: &mut CostMapCache,
    ) -> CorrectionOutcome {
        let mut scratch = particles.to_vec();
        self.scorer.weight_particles(&mut scratch, features, cache);
        cache.evict();
        self.finish(particles, &scratch)
    }

    /// Weight `particles` in parallel against a shared cache.
    pub fn correct_shared(
        &mut self,
        particles: &mut [Particle],
        features: &[LineFeature],
        shared: &SharedCostMap,
    ) -> CorrectionOutcome {
        let mut scratch = particles.to_vec();
        self.scorer.weight_particles_parallel(&mut scratch, features, shared);
        shared.evict();
        self.finish(particles, &scratch)
    }

    fn finish(&mut self, particles: &mut [Particle], scratch: &[Particle]) -> CorrectionOutcome {
        let Some(mean) = mean_pose(scratch) else {
            return CorrectionOutcome::Empty;
        };

        if let Some(last) = self.last_mean {
            let threshold = self.config.min_mean_displacement;
            let moved = mean.position().distance_squared(&last.position());
            if moved <= threshold * threshold {
                log::warn!(
                    "Mean pose moved {:.3} since last correction, skipping weights",
                    moved.sqrt()
                );
                return CorrectionOutcome::Skipped { mean };
            }
        }

        for (particle, weighted) in particles.iter_mut().zip(scratch) {
            particle.weight = weighted.weight;
        }
        self.last_mean = Some(mean);
        CorrectionOutcome::Applied { mean }
    }
}
