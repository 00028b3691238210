use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qtty::Degrees;
use skylux::algorithms::AtmosphereModel;
use skylux::astrometry::{AnalyticEphemeris, AstrometryProvider, Body, FixedAstrometry};
use skylux::{IlluminationScene, Observer, TimeInstant};

fn bench_atmosphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("atmosphere");
    let atmosphere = AtmosphereModel::new();

    group.bench_function("air_mass", |b| {
        b.iter(|| {
            for i in 0..900 {
                let alt = Degrees::new(f64::from(i) * 0.1);
                black_box(atmosphere.air_mass(black_box(alt)));
            }
        });
    });

    for turbidity in [2.0, 3.0, 20.0] {
        group.bench_with_input(
            BenchmarkId::new("transmittance", turbidity),
            &turbidity,
            |b, &turbidity| {
                b.iter(|| {
                    for i in 0..900 {
                        let alt = Degrees::new(f64::from(i) * 0.1);
                        black_box(atmosphere.transmittance(alt, black_box(turbidity)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_ephemeris(c: &mut Criterion) {
    let mut group = c.benchmark_group("ephemeris");
    let ephemeris = AnalyticEphemeris::new();
    let observer = Observer::new(50.0755, 14.4378, 200.0);
    let time = TimeInstant::new(2_460_600.5);

    group.bench_function("moon_position", |b| {
        b.iter(|| black_box(ephemeris.position_of(Body::Moon, &observer, black_box(&time))));
    });
    group.bench_function("vectors", |b| {
        b.iter(|| black_box(ephemeris.vectors_at(black_box(&time))));
    });

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    let observer = Observer::new(50.0755, 14.4378, 200.0);
    let time = TimeInstant::new(2_460_600.5);

    let fixed = IlluminationScene::new(Arc::new(FixedAstrometry::default()));
    group.bench_function("fixed_provider", |b| {
        b.iter(|| black_box(fixed.calculate_illumination(&observer, black_box(&time), 3.0)));
    });

    let analytic = IlluminationScene::with_analytic_ephemeris();
    group.bench_function("analytic_provider", |b| {
        b.iter(|| black_box(analytic.calculate_illumination(&observer, black_box(&time), 3.0)));
    });
    group.bench_function("analytic_presets", |b| {
        b.iter(|| black_box(analytic.calculate_for_presets(&observer, black_box(&time))));
    });

    group.finish();
}

criterion_group!(benches, bench_atmosphere, bench_ephemeris, bench_scene);
criterion_main!(benches);
