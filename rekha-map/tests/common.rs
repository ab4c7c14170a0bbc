//! Test utilities for RekhaMap.
//!
//! Helpers for building small maps and observing them from a pose.

#![allow(dead_code)]

use rekha_map::{CostMapConfig, LineFeature, Point3, Pose2D, WorldPoint};

/// Install a logger once per test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 10m tiles at 10cm pixels with a 2m falloff.
pub fn small_config(max_tile_count: usize) -> CostMapConfig {
    CostMapConfig {
        max_tile_count,
        falloff_pixels: 20,
        ..CostMapConfig::with_tiling(10.0, 100)
    }
}

/// Horizontal line from (0,0) to (10,0).
pub fn horizontal_line() -> LineFeature {
    LineFeature::planar(WorldPoint::new(0.0, 0.0), WorldPoint::new(10.0, 0.0))
}

/// Axis-aligned square outline of `half` around `center`.
pub fn square_outline(center: WorldPoint, half: f32) -> Vec<LineFeature> {
    let a = WorldPoint::new(center.x - half, center.y - half);
    let b = WorldPoint::new(center.x + half, center.y - half);
    let c = WorldPoint::new(center.x + half, center.y + half);
    let d = WorldPoint::new(center.x - half, center.y + half);
    vec![
        LineFeature::planar(a, b),
        LineFeature::planar(b, c),
        LineFeature::planar(c, d),
        LineFeature::planar(d, a),
    ]
}

/// World features as seen by a sensor at `pose`.
pub fn to_sensor_frame(features: &[LineFeature], pose: &Pose2D) -> Vec<LineFeature> {
    let (sin, cos) = pose.theta.sin_cos();
    let inverse = |p: Point3| {
        let dx = p.x - pose.x;
        let dy = p.y - pose.y;
        Point3::new(cos * dx + sin * dy, -sin * dx + cos * dy, p.z)
    };
    features
        .iter()
        .map(|f| LineFeature::new(inverse(f.start), inverse(f.end)))
        .collect()
}
