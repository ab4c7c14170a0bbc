//! Line feature scoring against the cost map.
//!
//! Each observed feature is moved into the world frame of a candidate pose
//! and walked at `sample_step`. Every sample reads the map and contributes
//!
//! ```text
//!   exp(-far_weight_gain · |p - pose|²) · (|cos(bearing - direction)| · intensity + score_offset)
//! ```
//!
//! The sum is the raw score. [`LineScorer::score_to_weight`] squashes it into
//! `[min_prob, 1]`.

use rayon::prelude::*;

use super::config::ScorerConfig;
use super::particle::Particle;
use crate::core::{LineFeature, Pose2D, WorldPoint};
use crate::costmap::{CostQuery, SharedCostMap};
use crate::error::Result;

/// One sample of the walk and what it added to the raw score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSample {
    /// Sample position in the world frame.
    pub point: WorldPoint,
    /// Contribution of this sample.
    pub score: f32,
}

/// Scores observed line features against a [`CostQuery`].
#[derive(Debug, Clone)]
pub struct LineScorer {
    config: ScorerConfig,
    /// `-ln(min_prob) / 2`
    k: f32,
}

impl LineScorer {
    /// Create a scorer. The configuration is validated once here.
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        let k = -config.min_prob.ln() / 2.0;
        Ok(Self { config, k })
    }

    /// Get configuration.
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Raw alignment score of sensor-frame `features` seen from `pose`.
    ///
    /// Zero-length features contribute nothing.
    pub fn score<Q: CostQuery + ?Sized>(
        &self,
        features: &[LineFeature],
        pose: &Pose2D,
        cache: &mut Q,
    ) -> f32 {
        let mut raw = 0.0;
        self.walk(features, pose, cache, |_, contribution| raw += contribution);
        raw
    }

    /// Per-sample breakdown of [`score`](Self::score), for debug display.
    pub fn evaluate<Q: CostQuery + ?Sized>(
        &self,
        features: &[LineFeature],
        pose: &Pose2D,
        cache: &mut Q,
    ) -> Vec<ScoredSample> {
        let mut samples = Vec::new();
        self.walk(features, pose, cache, |point, score| {
            samples.push(ScoredSample { point, score })
        });
        samples
    }

    fn walk<Q, F>(&self, features: &[LineFeature], pose: &Pose2D, cache: &mut Q, mut visit: F)
    where
        Q: CostQuery + ?Sized,
        F: FnMut(WorldPoint, f32),
    {
        let origin = pose.position();
        for feature in features {
            let world = feature.transformed(pose);
            let bearing = world.bearing_degrees();
            for point in world.samples(self.config.sample_step) {
                let gain = (-self.config.far_weight_gain * point.distance_squared(&origin)).exp();
                let sample = cache.query(point);
                let alignment = (bearing - sample.direction_degrees()).to_radians().cos().abs();
                let contribution =
                    gain * (alignment * sample.intensity as f32 + self.config.score_offset);
                visit(point, contribution);
            }
        }
    }

    /// Map a raw score to a weight in `[min_prob, 1]`.
    ///
    /// `-max_raw_score` (or below) gives `min_prob`, `+max_raw_score` (or
    /// above) gives 1, and the curve is exponential in between.
    pub fn score_to_weight(&self, raw: f32) -> f32 {
        let max = self.config.max_raw_score;
        let clamped = if raw.is_nan() { -max } else { raw.clamp(-max, max) };
        self.config.min_prob * (self.k * (clamped / max + 1.0)).exp()
    }

    /// Overwrite every particle weight from its score.
    pub fn weight_particles<Q: CostQuery + ?Sized>(
        &self,
        particles: &mut [Particle],
        features: &[LineFeature],
        cache: &mut Q,
    ) {
        for particle in particles.iter_mut() {
            let raw = self.score(features, &particle.pose, cache);
            particle.weight = self.score_to_weight(raw);
        }
    }

    /// [`weight_particles`](Self::weight_particles) spread over the rayon
    /// pool, one lookup handle per particle.
    pub fn weight_particles_parallel(
        &self,
        particles: &mut [Particle],
        features: &[LineFeature],
        shared: &SharedCostMap,
    ) {
        particles.par_iter_mut().for_each(|particle| {
            let mut query = shared.query();
            let raw = self.score(features, &particle.pose, &mut query);
            particle.weight = self.score_to_weight(raw);
        });
    }
}
