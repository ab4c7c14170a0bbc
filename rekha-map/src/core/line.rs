//! Oriented line features.

use serde::{Deserialize, Serialize};

use super::{Point3, Pose2D, WorldPoint};
use crate::error::{CostMapError, Result};

/// Segments shorter than this are treated as zero-length.
const MIN_FEATURE_LENGTH: f32 = 1e-6;

/// An oriented line segment stored as a point-normal pair.
///
/// `start` is the segment origin and `end` is the direction-bearing
/// endpoint; the bearing of the feature points from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineFeature {
    /// Segment origin
    pub start: Point3,
    /// Direction-bearing endpoint
    pub end: Point3,
}

impl LineFeature {
    /// Create a feature without validation.
    #[inline]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Create a feature, rejecting zero-length or non-finite segments.
    pub fn checked(start: Point3, end: Point3) -> Result<Self> {
        let feature = Self::new(start, end);
        if feature.is_degenerate() {
            return Err(CostMapError::DegenerateGeometry(format!(
                "line feature ({:.3}, {:.3}) -> ({:.3}, {:.3}) has no length",
                start.x, start.y, end.x, end.y
            )));
        }
        Ok(feature)
    }

    /// Planar feature from two world points at zero elevation.
    pub fn planar(start: WorldPoint, end: WorldPoint) -> Self {
        Self::new(start.into(), end.into())
    }

    /// Planar length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.xy().distance(&self.end.xy())
    }

    /// True for zero-length or non-finite segments.
    pub fn is_degenerate(&self) -> bool {
        let length = self.length();
        !length.is_finite() || length < MIN_FEATURE_LENGTH
    }

    /// Unit tangent from start to end, or zero for degenerate features.
    pub fn tangent(&self) -> WorldPoint {
        let length = self.length();
        if !length.is_finite() || length < MIN_FEATURE_LENGTH {
            return WorldPoint::ZERO;
        }
        (self.end.xy() - self.start.xy()) * (1.0 / length)
    }

    /// Bearing in degrees, in [0, 360).
    pub fn bearing_degrees(&self) -> f32 {
        let d = self.end.xy() - self.start.xy();
        let deg = d.y.atan2(d.x).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }

    /// Mean elevation of both endpoints.
    #[inline]
    pub fn mean_elevation(&self) -> f32 {
        0.5 * (self.start.z + self.end.z)
    }

    /// Axis-aligned planar bounding box: (min, max).
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        (
            WorldPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            WorldPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    /// Feature moved into the world frame of `pose`.
    pub fn transformed(&self, pose: &Pose2D) -> LineFeature {
        LineFeature::new(pose.transform_point3(&self.start), pose.transform_point3(&self.end))
    }

    /// Points along the feature at `step` spacing.
    ///
    /// Yields `start + tangent * d` for `d = 0, step, 2*step, ...` while
    /// `d < length`. The end point itself is not included. A non-positive
    /// step yields nothing.
    pub fn samples(&self, step: f32) -> LineSamples {
        let length = self.length();
        let valid = step > 0.0 && length.is_finite() && length >= MIN_FEATURE_LENGTH;
        LineSamples {
            origin: self.start.xy(),
            tangent: self.tangent(),
            step,
            length: if valid { length } else { 0.0 },
            index: 0,
        }
    }
}

/// Iterator over evenly spaced points of a [`LineFeature`].
#[derive(Debug, Clone)]
pub struct LineSamples {
    origin: WorldPoint,
    tangent: WorldPoint,
    step: f32,
    length: f32,
    index: u32,
}

impl Iterator for LineSamples {
    type Item = WorldPoint;

    fn next(&mut self) -> Option<WorldPoint> {
        // Distance from the index keeps long segments free of drift.
        let distance = self.index as f32 * self.step;
        if distance >= self.length {
            return None;
        }
        self.index += 1;
        Some(self.origin + self.tangent * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing() {
        let east = LineFeature::planar(WorldPoint::ZERO, WorldPoint::new(1.0, 0.0));
        let north = LineFeature::planar(WorldPoint::ZERO, WorldPoint::new(0.0, 1.0));
        let south = LineFeature::planar(WorldPoint::ZERO, WorldPoint::new(0.0, -1.0));
        assert_relative_eq!(east.bearing_degrees(), 0.0);
        assert_relative_eq!(north.bearing_degrees(), 90.0, epsilon = 1e-4);
        assert_relative_eq!(south.bearing_degrees(), 270.0, epsilon = 1e-4);
    }

    #[test]
    fn test_checked_rejects_zero_length() {
        let p = Point3::new(1.0, 1.0, 0.0);
        assert!(matches!(
            LineFeature::checked(p, p),
            Err(CostMapError::DegenerateGeometry(_))
        ));
        assert!(LineFeature::checked(p, Point3::new(2.0, 1.0, 0.0)).is_ok());
    }

    #[test]
    fn test_samples_exclude_end() {
        let feature = LineFeature::planar(WorldPoint::ZERO, WorldPoint::new(1.0, 0.0));
        let samples: Vec<_> = feature.samples(0.25).collect();
        assert_eq!(samples.len(), 4);
        assert_relative_eq!(samples[3].x, 0.75);
    }

    #[test]
    fn test_samples_degenerate() {
        let feature = LineFeature::planar(WorldPoint::ZERO, WorldPoint::ZERO);
        assert_eq!(feature.samples(0.1).count(), 0);
        assert_eq!(feature.tangent(), WorldPoint::ZERO);

        let ok = LineFeature::planar(WorldPoint::ZERO, WorldPoint::new(1.0, 0.0));
        assert_eq!(ok.samples(0.0).count(), 0);
    }

    #[test]
    fn test_bounds() {
        let feature = LineFeature::planar(WorldPoint::new(3.0, -1.0), WorldPoint::new(1.0, 2.0));
        let (min, max) = feature.bounds();
        assert_eq!(min, WorldPoint::new(1.0, -1.0));
        assert_eq!(max, WorldPoint::new(3.0, 2.0));
    }
}
