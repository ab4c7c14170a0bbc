//! The cost map façade.

use std::sync::Arc;

use super::area::Area;
use super::builder::TileBuilder;
use super::config::{CostMapConfig, Tiling};
use super::gamma::GammaLut;
use super::query::CostQuery;
use super::store::TileStore;
use super::tile::{CostSample, DebugPixel, RawPixel, Tile};
use crate::core::{AreaPolygon, LabeledPoint, LineFeature, Pose2D, WorldPoint};
use crate::error::Result;

/// World rectangle of one resident tile, for visualization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileBounds {
    /// Tile key
    pub area: Area,
    /// Corner with the smallest coordinates
    pub min: WorldPoint,
    /// Corner with the largest coordinates
    pub max: WorldPoint,
}

impl TileBounds {
    /// Closed outline (counter-clockwise, first point repeated).
    pub fn line_strip(&self) -> [WorldPoint; 5] {
        [
            self.min,
            WorldPoint::new(self.max.x, self.min.y),
            self.max,
            WorldPoint::new(self.min.x, self.max.y),
            self.min,
        ]
    }

    /// Center of the rectangle.
    pub fn center(&self) -> WorldPoint {
        (self.min + self.max) * 0.5
    }
}

/// Tiled cost map over an unbounded plane.
///
/// Tiles are built lazily the first time a point inside them is looked up
/// and live until evicted. Eviction follows creation order and runs as soon
/// as a new tile pushes the resident count past `max_tile_count`, so the
/// bound holds after every lookup.
///
/// Replacing reference geometry or height does not touch tiles that already
/// exist; they keep the old content until evicted or cleared with
/// [`CostMapCache::clear_tiles`].
///
/// # Example
///
/// ```rust
/// use rekha_map::{CostMapCache, CostMapConfig, LineFeature, WorldPoint};
///
/// let mut cache = CostMapCache::new(CostMapConfig::with_tiling(10.0, 100)).unwrap();
/// cache.set_line_features(vec![LineFeature::planar(
///     WorldPoint::new(0.0, 0.0),
///     WorldPoint::new(10.0, 0.0),
/// )]);
///
/// let sample = cache.lookup2(WorldPoint::new(5.0, 0.0));
/// assert!(sample.intensity > 0);
/// assert_eq!(cache.build_count(), 1);
/// ```
#[derive(Debug)]
pub struct CostMapCache {
    config: CostMapConfig,
    tiling: Tiling,
    builder: TileBuilder,
    store: TileStore,
    gamma: GammaLut,
    line_features: Vec<LineFeature>,
    polygons: Vec<AreaPolygon>,
    height: Option<f32>,
    builds: usize,
}

impl CostMapCache {
    /// Create an empty cache. The configuration is validated once here.
    pub fn new(config: CostMapConfig) -> Result<Self> {
        config.validate()?;
        let tiling = config.tiling()?;
        Ok(Self {
            builder: TileBuilder::new(tiling, &config),
            gamma: GammaLut::new(config.gamma),
            tiling,
            config,
            store: TileStore::new(),
            line_features: Vec::new(),
            polygons: Vec::new(),
            height: None,
            builds: 0,
        })
    }

    // =========================================================================
    // REFERENCE GEOMETRY
    // =========================================================================

    /// Replace the line features. Zero-length or non-finite features are
    /// dropped.
    ///
    /// Returns the number of features kept.
    pub fn set_line_features(&mut self, mut features: Vec<LineFeature>) -> usize {
        let before = features.len();
        features.retain(|f| match LineFeature::checked(f.start, f.end) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Skipping line feature: {}", e);
                false
            }
        });
        let dropped = before - features.len();
        if dropped > 0 {
            log::warn!("Skipped {} degenerate line features", dropped);
        }
        log::info!("Loaded {} line features into cost map", features.len());
        self.line_features = features;
        self.line_features.len()
    }

    /// Replace the area polygons.
    pub fn set_polygons(&mut self, polygons: Vec<AreaPolygon>) {
        log::info!("Loaded {} area polygons into cost map", polygons.len());
        self.polygons = polygons;
    }

    /// Replace the area polygons from a labeled point stream.
    ///
    /// Degenerate rings are skipped with a warning. Returns the number of
    /// polygons loaded.
    pub fn set_polygons_from_labeled(&mut self, points: &[LabeledPoint]) -> usize {
        let mut polygons = Vec::new();
        for result in AreaPolygon::from_labeled_points(points) {
            match result {
                Ok(polygon) => polygons.push(polygon),
                Err(e) => log::warn!("Skipping area polygon: {}", e),
            }
        }
        let count = polygons.len();
        self.set_polygons(polygons);
        count
    }

    /// Set or clear the elevation used to gate features in later builds.
    pub fn set_height(&mut self, height: Option<f32>) {
        self.height = height;
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Gamma-corrected intensity and direction at a world point.
    ///
    /// Builds the containing tile on a miss.
    pub fn lookup2(&mut self, point: WorldPoint) -> CostSample {
        let raw = self.raw_at(point);
        CostSample {
            intensity: self.gamma.apply(raw.intensity),
            direction: raw.direction,
        }
    }

    /// Debug variant of [`lookup2`](Self::lookup2) that also returns the mask.
    pub fn lookup3(&mut self, point: WorldPoint) -> DebugPixel {
        let raw = self.raw_at(point);
        DebugPixel {
            b: self.gamma.apply(raw.intensity),
            g: raw.direction,
            r: raw.mask,
        }
    }

    /// Tile containing a world point, built if needed.
    pub fn tile_for(&mut self, point: WorldPoint) -> Arc<Tile> {
        let area = Area::from_point(point, &self.tiling);
        self.tile_at(area)
    }

    /// Tile at the position of a pose, for debug display.
    pub fn build_image_for(&mut self, pose: &Pose2D) -> Arc<Tile> {
        self.tile_for(pose.position())
    }

    fn raw_at(&mut self, point: WorldPoint) -> RawPixel {
        let area = Area::from_point(point, &self.tiling);
        if let Some(tile) = self.store.peek(area) {
            return tile.sample(point);
        }
        self.tile_at(area).sample(point)
    }

    /// Get-or-build for one Area.
    pub(crate) fn tile_at(&mut self, area: Area) -> Arc<Tile> {
        if let Some(tile) = self.store.peek(area) {
            return Arc::clone(tile);
        }

        log::trace!("Cost map miss at {}", area);
        let tile = Arc::new(self.builder.build(
            area,
            &self.line_features,
            &self.polygons,
            self.height,
        ));
        self.builds += 1;
        self.store.insert(area, Arc::clone(&tile));
        self.evict();
        tile
    }

    /// Resident tile without building.
    pub(crate) fn resident(&self, area: Area) -> Option<Arc<Tile>> {
        self.store.peek(area).cloned()
    }

    // =========================================================================
    // EVICTION
    // =========================================================================

    /// Drop the oldest tiles beyond `max_tile_count`. Returns how many went.
    pub fn evict(&mut self) -> usize {
        let evicted = self.store.evict_obsolete(self.config.max_tile_count);
        if !evicted.is_empty() {
            log::debug!(
                "Evicted {} tiles, {} resident",
                evicted.len(),
                self.store.len()
            );
        }
        evicted.len()
    }

    /// Drop every tile so the next lookups rebuild from current geometry.
    pub fn clear_tiles(&mut self) {
        self.store.clear();
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// World rectangles of resident tiles, oldest first.
    pub fn render_active_tiles(&self) -> Vec<TileBounds> {
        self.store
            .areas()
            .map(|area| {
                let (min, max) = area.to_world_bounds(&self.tiling);
                TileBounds { area, min, max }
            })
            .collect()
    }

    /// Is a tile resident for this Area?
    pub fn contains(&self, area: Area) -> bool {
        self.store.contains(area)
    }

    /// Number of resident tiles.
    pub fn resident_tiles(&self) -> usize {
        self.store.len()
    }

    /// Number of tiles built since creation.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    /// Area containing a world point.
    pub fn area_of(&self, point: WorldPoint) -> Area {
        Area::from_point(point, &self.tiling)
    }

    /// Tiling resolution.
    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    /// Configuration.
    pub fn config(&self) -> &CostMapConfig {
        &self.config
    }

    /// Read-time gamma table.
    pub fn gamma(&self) -> &GammaLut {
        &self.gamma
    }

    /// Elevation filter for new builds.
    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// Loaded line features.
    pub fn line_feature_count(&self) -> usize {
        self.line_features.len()
    }

    /// Loaded polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }
}

impl CostQuery for CostMapCache {
    #[inline]
    fn query(&mut self, point: WorldPoint) -> CostSample {
        self.lookup2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AreaKind, Point3};
    use crate::error::CostMapError;

    fn cache(max_tile_count: usize) -> CostMapCache {
        CostMapCache::new(CostMapConfig {
            max_tile_count,
            falloff_pixels: 20,
            ..CostMapConfig::with_tiling(10.0, 100)
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = CostMapCache::new(CostMapConfig::with_tiling(-1.0, 100));
        assert!(matches!(result, Err(CostMapError::Configuration(_))));
    }

    #[test]
    fn test_empty_geometry_lookup() {
        let mut cache = cache(4);
        for p in [
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(-35.0, 12.0),
            WorldPoint::new(5.0, 5.0),
        ] {
            assert_eq!(cache.lookup2(p), CostSample::default());
        }
    }

    #[test]
    fn test_build_once_per_area() {
        let mut cache = cache(4);
        cache.set_line_features(vec![LineFeature::planar(
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(10.0, 0.0),
        )]);

        for i in 0..50 {
            cache.lookup2(WorldPoint::new(i as f32 * 0.19, 3.0));
        }
        assert_eq!(cache.build_count(), 1);

        cache.lookup2(WorldPoint::new(12.0, 3.0));
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn test_eviction_on_insert() {
        let mut cache = cache(2);
        let a = WorldPoint::new(5.0, 5.0);
        cache.lookup2(a);
        cache.lookup2(WorldPoint::new(105.0, 5.0));
        cache.lookup2(WorldPoint::new(205.0, 5.0));

        assert_eq!(cache.resident_tiles(), 2);
        assert!(!cache.contains(cache.area_of(a)));
        assert_eq!(cache.evict(), 0);
    }

    #[test]
    fn test_eviction_ignores_reads() {
        let mut cache = cache(2);
        let a = WorldPoint::new(5.0, 5.0);
        let b = WorldPoint::new(15.0, 5.0);
        cache.lookup2(a);
        cache.lookup2(b);
        // Reading A again does not move it behind B.
        cache.lookup2(a);
        cache.lookup3(a);
        cache.lookup2(WorldPoint::new(25.0, 5.0));

        assert!(!cache.contains(Area::new(0, 0)));
        assert!(cache.contains(Area::new(1, 0)));
        assert!(cache.contains(Area::new(2, 0)));
        assert_eq!(cache.build_count(), 3);
    }

    #[test]
    fn test_degenerate_features_dropped() {
        let mut cache = cache(2);
        let p = Point3::new(1.0, 1.0, 0.0);
        let kept = cache.set_line_features(vec![
            LineFeature::new(p, p),
            LineFeature::new(p, Point3::new(2.0, 1.0, 0.0)),
            LineFeature::new(p, Point3::new(f32::NAN, 1.0, 0.0)),
        ]);
        assert_eq!(kept, 1);
        assert_eq!(cache.line_feature_count(), 1);
        assert!(matches!(
            LineFeature::checked(p, p),
            Err(CostMapError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_labeled_polygons() {
        let mut cache = cache(2);
        let points = [
            LabeledPoint::new(0.0, 0.0, 1),
            LabeledPoint::new(10.0, 0.0, 1),
            LabeledPoint::new(10.0, 10.0, 1),
            LabeledPoint::new(0.0, 10.0, 1),
            LabeledPoint::new(50.0, 50.0, 700),
        ];
        assert_eq!(cache.set_polygons_from_labeled(&points), 1);
        assert_eq!(cache.polygon_count(), 1);
        assert_eq!(cache.lookup3(WorldPoint::new(5.0, 5.0)).r, 255);
    }

    #[test]
    fn test_stale_tiles_survive_geometry_change() {
        let mut cache = cache(4);
        let p = WorldPoint::new(5.0, 0.0);
        assert_eq!(cache.lookup2(p).intensity, 0);

        cache.set_line_features(vec![LineFeature::planar(
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(10.0, 0.0),
        )]);
        assert_eq!(cache.lookup2(p).intensity, 0);

        cache.clear_tiles();
        assert!(cache.lookup2(p).intensity > 0);
    }

    #[test]
    fn test_render_active_tiles() {
        let mut cache = cache(4);
        cache.lookup2(WorldPoint::new(5.0, 5.0));
        cache.lookup2(WorldPoint::new(-5.0, 15.0));

        let bounds = cache.render_active_tiles();
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0].area, Area::new(0, 0));
        assert_eq!(bounds[1].min, WorldPoint::new(-10.0, 10.0));
        assert_eq!(bounds[1].max, WorldPoint::new(0.0, 20.0));
        assert_eq!(bounds[0].center(), WorldPoint::new(5.0, 5.0));

        let strip = bounds[0].line_strip();
        assert_eq!(strip[0], strip[4]);
    }

    #[test]
    fn test_build_image_for_pose() {
        let mut cache = cache(4);
        let tile = cache.build_image_for(&Pose2D::new(25.0, -3.0, 1.0));
        assert_eq!(tile.area(), Area::new(2, -1));
        assert_eq!(tile.size(), 100);
        assert!(cache.contains(Area::new(2, -1)));
    }

    #[test]
    fn test_polygon_masks_lookup() {
        let mut cache = cache(4);
        cache.set_polygons(vec![
            AreaPolygon::new(
                vec![
                    WorldPoint::new(0.0, 0.0),
                    WorldPoint::new(10.0, 0.0),
                    WorldPoint::new(10.0, 10.0),
                    WorldPoint::new(0.0, 10.0),
                ],
                AreaKind::Drivable,
            )
            .unwrap(),
        ]);
        assert_eq!(cache.lookup3(WorldPoint::new(5.0, 5.0)).r, 255);
        assert_eq!(cache.lookup3(WorldPoint::new(15.0, 15.0)).r, 0);
    }

    #[test]
    fn test_height_accessor() {
        let mut cache = cache(2);
        assert_eq!(cache.height(), None);
        cache.set_height(Some(1.5));
        assert_eq!(cache.height(), Some(1.5));
    }
}
