//! Weighted pose hypotheses.

use crate::core::Pose2D;

/// A single particle representing a possible robot pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Hypothesized robot pose.
    pub pose: Pose2D,
    /// Importance weight (unnormalized).
    pub weight: f32,
}

impl Particle {
    /// Create a new particle with unit weight.
    pub fn new(pose: Pose2D) -> Self {
        Self { pose, weight: 1.0 }
    }

    /// Create a new particle with specified weight.
    pub fn with_weight(pose: Pose2D, weight: f32) -> Self {
        Self { pose, weight }
    }
}

/// Weighted mean pose: weighted x and y, circular mean of theta.
///
/// `None` for an empty batch or when the weights sum to (nearly) zero.
pub fn mean_pose(particles: &[Particle]) -> Option<Pose2D> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_sin = 0.0;
    let mut sum_cos = 0.0;
    let mut total_weight = 0.0;

    for p in particles {
        let w = p.weight;
        sum_x += w * p.pose.x;
        sum_y += w * p.pose.y;
        sum_sin += w * p.pose.theta.sin();
        sum_cos += w * p.pose.theta.cos();
        total_weight += w;
    }

    if total_weight > 1e-10 {
        Some(Pose2D::new(
            sum_x / total_weight,
            sum_y / total_weight,
            sum_sin.atan2(sum_cos),
        ))
    } else {
        None
    }
}
