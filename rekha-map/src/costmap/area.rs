//! Tile keys.

use std::fmt;

use super::config::{CostMapConfig, Tiling};
use crate::core::WorldPoint;
use crate::error::Result;

/// Discrete key of one square tile.
///
/// Tile `(x, y)` covers the world rectangle
/// `[x * unit_length, (x + 1) * unit_length) × [y * unit_length, (y + 1) * unit_length)`.
///
/// ```text
///        y
///        ▲
///    1   │ (-1,1) │ (0,1) │ (1,1)
///        ├────────┼───────┼──────
///    0   │ (-1,0) │ (0,0) │ (1,0)
///        ├────────┼───────┼──────
///   -1   │(-1,-1) │(0,-1) │(1,-1)
///        └────────┴───────┴──────▶ x
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Area {
    /// Tile column
    pub x: i32,
    /// Tile row
    pub y: i32,
}

impl Area {
    /// Create an Area from tile indices.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Area containing a world point.
    #[inline]
    pub fn from_point(point: WorldPoint, tiling: &Tiling) -> Self {
        let u = tiling.unit_length();
        Self {
            x: (point.x / u).floor() as i32,
            y: (point.y / u).floor() as i32,
        }
    }

    /// Area containing a world point, validating the tiling first.
    ///
    /// Fails with `Configuration` when `unit_length` or `image_size` are
    /// not usable.
    pub fn try_from_point(point: WorldPoint, config: &CostMapConfig) -> Result<Self> {
        let tiling = config.tiling()?;
        Ok(Self::from_point(point, &tiling))
    }

    /// World corner with the smallest coordinates.
    #[inline]
    pub fn min_corner(&self, tiling: &Tiling) -> WorldPoint {
        let u = tiling.unit_length();
        WorldPoint::new(self.x as f32 * u, self.y as f32 * u)
    }

    /// World rectangle covered by this tile: (min_corner, max_corner).
    pub fn to_world_bounds(&self, tiling: &Tiling) -> (WorldPoint, WorldPoint) {
        let min = self.min_corner(tiling);
        let u = tiling.unit_length();
        (min, min + WorldPoint::new(u, u))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tiling() -> Tiling {
        Tiling::new(10.0, 100).unwrap()
    }

    #[test]
    fn test_from_point() {
        let t = tiling();
        assert_eq!(Area::from_point(WorldPoint::new(5.0, 0.0), &t), Area::new(0, 0));
        assert_eq!(Area::from_point(WorldPoint::new(15.0, 25.0), &t), Area::new(1, 2));
        assert_eq!(Area::from_point(WorldPoint::new(10.0, 10.0), &t), Area::new(1, 1));
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let t = tiling();
        assert_eq!(Area::from_point(WorldPoint::new(-0.01, -9.99), &t), Area::new(-1, -1));
        assert_eq!(Area::from_point(WorldPoint::new(-10.0, -10.01), &t), Area::new(-1, -2));
    }

    #[test]
    fn test_same_cell_same_area() {
        let t = tiling();
        let a = Area::from_point(WorldPoint::new(0.0, 0.0), &t);
        let b = Area::from_point(WorldPoint::new(9.999, 9.999), &t);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_world_bounds() {
        let t = tiling();
        let (min, max) = Area::new(-2, 3).to_world_bounds(&t);
        assert_eq!(min, WorldPoint::new(-20.0, 30.0));
        assert_eq!(max, WorldPoint::new(-10.0, 40.0));
    }

    #[test]
    fn test_try_from_point_requires_valid_tiling() {
        let bad = CostMapConfig::with_tiling(0.0, 100);
        assert!(Area::try_from_point(WorldPoint::ZERO, &bad).is_err());

        let good = CostMapConfig::with_tiling(10.0, 100);
        assert_eq!(
            Area::try_from_point(WorldPoint::new(-5.0, 5.0), &good),
            Ok(Area::new(-1, 0))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Area::new(3, -4).to_string(), "(3, -4)");
    }
}
