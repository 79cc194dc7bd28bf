use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quadcell::prelude::*;
use std::collections::BTreeMap;

fn benchmark_cell_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_construction");

    group.bench_function("from_xy", |b| {
        let mut counter = 0u32;
        b.iter(|| {
            counter = counter.wrapping_add(7919);
            let x = counter & (CellId::<30>::MAX_COORD - 1);
            let y = counter.rotate_left(13) & (CellId::<30>::MAX_COORD - 1);
            CellId::<30>::from_xy(black_box(x), black_box(y))
        })
    });

    let cell = CellId::<30>::from_xy(123_456_789, 987_654_321 & (CellId::<30>::MAX_COORD - 1));
    group.bench_function("to_string", |b| b.iter(|| black_box(&cell).to_string()));

    let text = cell.to_string();
    group.bench_function("from_string", |b| {
        b.iter(|| CellId::<30>::from_string(black_box(&text)).unwrap())
    });

    group.bench_function("xy", |b| b.iter(|| black_box(&cell).xy()));

    group.finish();
}

fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let converter = CellIdConverter::<30>::new(MercatorBounds::bounds()).unwrap();

    group.bench_function("to_cell", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            let x = -180.0 + (counter % 3600) as f64 * 0.1;
            let y = -90.0 + (counter % 1800) as f64 * 0.1;
            converter.to_cell(black_box(x), black_box(y)).unwrap()
        })
    });

    for span in [0.001, 1.0, 90.0] {
        group.bench_with_input(BenchmarkId::new("cover", span), &span, |b, &span| {
            b.iter(|| {
                converter
                    .cover(black_box(10.0), black_box(10.0), 10.0 + span, 10.0 + span)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_bucketing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucketing");

    let features: Vec<SerializedFeature> = (0..1000)
        .map(|i| {
            let x = -170.0 + (i % 340) as f64;
            let y = -80.0 + (i % 160) as f64;
            SerializedFeature::new(
                [
                    geo::coord! { x: x, y: y },
                    geo::coord! { x: x + 0.01, y: y + 0.01 },
                ],
                &b"payload"[..],
            )
        })
        .collect();

    for level in [1usize, 5, 10] {
        group.bench_with_input(BenchmarkId::new("push_1000", level), &level, |b, &level| {
            b.iter(|| {
                let mut bucketer = BucketerBuilder::<19>::new()
                    .level(level)
                    .build(
                        BTreeMap::<String, Vec<SerializedFeature>>::new(),
                        PassThroughClipper,
                    )
                    .unwrap();
                bucketer.push_all(black_box(&features)).unwrap();
                bucketer.finish().1.len()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cell_construction,
    benchmark_conversion,
    benchmark_bucketing
);
criterion_main!(benches);
