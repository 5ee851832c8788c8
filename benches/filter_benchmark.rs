use criterion::{criterion_group, criterion_main, Criterion};
use redline_map::models::{Feature, FeatureCollection, Geometry, Properties};
use redline_map::services::RedliningService;
use std::collections::HashMap;
use std::hint::black_box;

/// Synthetic dataset roughly the size of the full HOLC download.
fn synthetic_service(count: usize) -> RedliningService {
    let features = (0..count)
        .map(|i| {
            let lon = -125.0 + (i % 600) as f64 * 0.1;
            let lat = 25.0 + (i / 600) as f64 * 0.1;
            let mut description = HashMap::new();
            description.insert(
                "Description".to_string(),
                Some(format!("Area {} with frame houses and mixed industrial use", i)),
            );
            description.insert(
                "Inhabitants".to_string(),
                Some(if i % 7 == 0 { "railway workers" } else { "clerks and laborers" }.to_string()),
            );

            Some(Feature {
                kind: "Feature".to_string(),
                geometry: Some(Geometry {
                    kind: "MultiPolygon".to_string(),
                    coordinates: vec![vec![vec![
                        vec![lon, lat],
                        vec![lon + 0.05, lat],
                        vec![lon + 0.05, lat + 0.05],
                        vec![lon, lat],
                    ]]],
                }),
                properties: Some(Properties {
                    city: Some(format!("City {}", i % 200)),
                    holc_grade: Some(["A", "B", "C", "D"][i % 4].to_string()),
                    area_description_data: Some(description),
                }),
            })
        })
        .collect();

    RedliningService::new(FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features,
    })
}

fn benchmark_filters(c: &mut Criterion) {
    let service = synthetic_service(10_000);

    let mut group = c.benchmark_group("redlining_filters");

    group.bench_function("bounds_northeast", |b| {
        b.iter(|| service.filter_by_bounds(black_box(40.0), 45.0, -75.0, -69.0))
    });

    group.bench_function("keyword_rare", |b| {
        b.iter(|| service.filter_by_keyword(black_box("railway")))
    });

    group.bench_function("keyword_missing", |b| {
        b.iter(|| service.filter_by_keyword(black_box("tenement")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_filters);
criterion_main!(benches);
