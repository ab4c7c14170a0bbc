//! Area polygons used to mask tiles.

use serde::{Deserialize, Serialize};

use super::WorldPoint;
use crate::error::{CostMapError, Result};

/// Labels below this value mark drivable polygons in a labeled stream.
pub const DRIVABLE_LABEL_LIMIT: u32 = 512;

/// Whether a polygon adds or removes drivable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    /// Pixels inside are drivable (unless also inside an excluded polygon)
    Drivable,
    /// Pixels inside are never drivable
    Excluded,
}

impl AreaKind {
    /// Kind for a stream label.
    #[inline]
    pub fn from_label(label: u32) -> Self {
        if label < DRIVABLE_LABEL_LIMIT {
            AreaKind::Drivable
        } else {
            AreaKind::Excluded
        }
    }
}

/// One vertex of a labeled polygon stream.
///
/// Consecutive points sharing a label form one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Ring label
    pub label: u32,
}

impl LabeledPoint {
    /// Create a new labeled point.
    pub fn new(x: f32, y: f32, label: u32) -> Self {
        Self { x, y, label }
    }
}

/// A closed polygon ring with a drivable/excluded label.
///
/// The ring is implicitly closed; the last vertex connects to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPolygon {
    vertices: Vec<WorldPoint>,
    kind: AreaKind,
    min: WorldPoint,
    max: WorldPoint,
}

impl AreaPolygon {
    /// Create a polygon.
    ///
    /// Fails with `DegenerateGeometry` for fewer than 3 vertices or any
    /// non-finite vertex.
    pub fn new(vertices: Vec<WorldPoint>, kind: AreaKind) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(CostMapError::DegenerateGeometry(format!(
                "polygon has {} vertices, need at least 3",
                vertices.len()
            )));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(CostMapError::DegenerateGeometry(
                "polygon has a non-finite vertex".to_string(),
            ));
        }

        let mut min = WorldPoint::new(f32::MAX, f32::MAX);
        let mut max = WorldPoint::new(f32::MIN, f32::MIN);
        for v in &vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }

        Ok(Self {
            vertices,
            kind,
            min,
            max,
        })
    }

    /// Rebuild polygons from a labeled point stream.
    ///
    /// A label change closes the current ring and starts the next one.
    /// Each ring is validated on its own, so one degenerate ring does not
    /// prevent the others from loading.
    pub fn from_labeled_points(points: &[LabeledPoint]) -> Vec<Result<AreaPolygon>> {
        points
            .chunk_by(|a, b| a.label == b.label)
            .map(|ring| {
                let kind = AreaKind::from_label(ring[0].label);
                let vertices = ring.iter().map(|p| WorldPoint::new(p.x, p.y)).collect();
                AreaPolygon::new(vertices, kind)
            })
            .collect()
    }

    /// Ring vertices.
    pub fn vertices(&self) -> &[WorldPoint] {
        &self.vertices
    }

    /// Polygon label.
    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    /// Axis-aligned bounding box: (min, max).
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        (self.min, self.max)
    }

    /// Does the bounding box overlap the rectangle [min, max]?
    pub fn overlaps(&self, min: WorldPoint, max: WorldPoint) -> bool {
        self.min.x <= max.x && self.max.x >= min.x && self.min.y <= max.y && self.max.y >= min.y
    }

    /// Crossing-number point-in-polygon test.
    pub fn contains(&self, point: WorldPoint) -> bool {
        if point.x < self.min.x
            || point.x > self.max.x
            || point.y < self.min.y
            || point.y > self.max.y
        {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let cross_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
