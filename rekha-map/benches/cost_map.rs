//! Benchmark cost map lookups and particle weighting.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rekha_map::{
    CostMapCache, CostMapConfig, LineFeature, LineScorer, Particle, Pose2D, ScorerConfig,
    SharedCostMap, WorldPoint,
};

/// Grid of streets every `spacing` meters over a `extent` square.
fn street_grid(extent: f32, spacing: f32) -> Vec<LineFeature> {
    let mut features = Vec::new();
    let mut t = 0.0;
    while t <= extent {
        features.push(LineFeature::planar(
            WorldPoint::new(0.0, t),
            WorldPoint::new(extent, t),
        ));
        features.push(LineFeature::planar(
            WorldPoint::new(t, 0.0),
            WorldPoint::new(t, extent),
        ));
        t += spacing;
    }
    features
}

fn config() -> CostMapConfig {
    CostMapConfig {
        falloff_pixels: 40,
        ..CostMapConfig::with_tiling(20.0, 400)
    }
}

fn observed_lines() -> Vec<LineFeature> {
    vec![
        LineFeature::planar(WorldPoint::new(-5.0, 1.5), WorldPoint::new(5.0, 1.5)),
        LineFeature::planar(WorldPoint::new(-5.0, -1.5), WorldPoint::new(5.0, -1.5)),
    ]
}

fn particles(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            Particle::new(Pose2D::new(50.0 + t, 51.5 - t, 0.05 * t))
        })
        .collect()
}

fn bench_tile_build(c: &mut Criterion) {
    let features = street_grid(100.0, 10.0);
    c.bench_function("tile_build", |b| {
        b.iter(|| {
            let mut cache = CostMapCache::new(config()).unwrap();
            cache.set_line_features(features.clone());
            black_box(cache.tile_for(WorldPoint::new(50.0, 50.0)))
        })
    });
}

fn bench_lookup_hit(c: &mut Criterion) {
    let mut cache = CostMapCache::new(config()).unwrap();
    cache.set_line_features(street_grid(100.0, 10.0));
    cache.lookup2(WorldPoint::new(45.0, 45.0));

    c.bench_function("lookup2_hit", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let offset = (i % 1000) as f32 * 0.019;
            black_box(cache.lookup2(WorldPoint::new(41.0 + offset, 41.0 + offset)))
        })
    });
}

fn bench_weighting(c: &mut Criterion) {
    let mut group = c.benchmark_group("weight_particles");
    let scorer = LineScorer::new(ScorerConfig::default()).unwrap();
    let observed = observed_lines();

    for n in [100, 500].iter() {
        let mut cache = CostMapCache::new(config()).unwrap();
        cache.set_line_features(street_grid(100.0, 10.0));
        let mut batch = particles(*n);

        group.bench_with_input(BenchmarkId::new("sequential", n), n, |b, _| {
            b.iter(|| scorer.weight_particles(black_box(&mut batch), &observed, &mut cache))
        });

        let shared = SharedCostMap::from_config(config()).unwrap();
        shared.set_line_features(street_grid(100.0, 10.0));
        let mut batch = particles(*n);

        group.bench_with_input(BenchmarkId::new("parallel", n), n, |b, _| {
            b.iter(|| scorer.weight_particles_parallel(black_box(&mut batch), &observed, &shared))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tile_build, bench_lookup_hit, bench_weighting);
criterion_main!(benches);
