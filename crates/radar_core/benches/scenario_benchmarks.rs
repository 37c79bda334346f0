//! Scenario scan benchmarks.
//!
//! Run with: cargo bench -p radar_core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use radar_core::{Asset, AssetBook, EnumerationPolicy, ScenarioScan};

fn book(n_assets: usize) -> AssetBook {
    let assets = (0..n_assets)
        .map(|i| Asset::new(format!("ASSET{}", i), 1.0, 10.0 + i as f64, 100.0 * (i + 1) as f64))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    AssetBook::from_assets(assets).unwrap()
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario_scan");

    for n_assets in [3_usize, 4, 5] {
        let book = book(n_assets);
        for policy in [EnumerationPolicy::Cartesian, EnumerationPolicy::Distinct] {
            let scan = ScenarioScan::new(50_000.0, 6).unwrap().with_policy(policy);
            group.bench_with_input(
                BenchmarkId::new(policy.name(), n_assets),
                &book,
                |b, book| b.iter(|| scan.run(black_box(book)).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
