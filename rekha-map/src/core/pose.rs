//! Planar pose.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::{Point3, WorldPoint};

/// Normalize an angle to [-π, π].
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Pose hypothesis in the world frame.
///
/// Position (x, y) in world units and heading (theta) in radians,
/// normalized to [-π, π]. Applied as a planar rigid transform; elevation
/// passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Heading in radians
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose with theta normalized to [-π, π].
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Identity pose.
    #[inline]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Translation part.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Transform a planar point from the pose frame to the world frame.
    ///
    /// ```text
    ///   x' = x + px * cos(θ) - py * sin(θ)
    ///   y' = y + px * sin(θ) + py * cos(θ)
    /// ```
    #[inline]
    pub fn transform_point(&self, point: &WorldPoint) -> WorldPoint {
        let (sin_t, cos_t) = self.theta.sin_cos();
        WorldPoint::new(
            self.x + point.x * cos_t - point.y * sin_t,
            self.y + point.x * sin_t + point.y * cos_t,
        )
    }

    /// Transform a point with elevation; z is carried through.
    #[inline]
    pub fn transform_point3(&self, point: &Point3) -> Point3 {
        let xy = self.transform_point(&point.xy());
        Point3::new(xy.x, xy.y, point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_angle() {
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(-3.0 * PI / 2.0), FRAC_PI_2, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose2D::new(1.0, 2.0, FRAC_PI_2);
        let p = pose.transform_point(&WorldPoint::new(1.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_keeps_elevation() {
        let pose = Pose2D::new(5.0, 0.0, 0.0);
        let p = pose.transform_point3(&Point3::new(1.0, 1.0, 2.5));
        assert_eq!(p, Point3::new(6.0, 1.0, 2.5));
    }
}
