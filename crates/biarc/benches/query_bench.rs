//! Criterion benches for the distance queries (groups "query/min_distance"
//! and "query/hausdorff").
//!
//! Uses replayed random curve pairs so runs are comparable across commits.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use biarc::api::*;

fn pair(index: u64) -> (CubicBezier, CubicBezier) {
    draw_pair(CurveCfg::default(), ReplayToken { seed: 2024, index })
}

fn bench_min_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/min_distance");
    let cfg = SearchCfg::default();
    let (c1, c2) = pair(0);
    for power in [3u32, 5, 7] {
        let h1 = Hierarchy::build(&c1, power).expect("power within range");
        let h2 = Hierarchy::build(&c2, power).expect("power within range");
        group.bench_with_input(BenchmarkId::new("power", power), &power, |b, _| {
            b.iter(|| min_distance(&h1, &h2, &cfg))
        });
    }
    group.finish();
}

fn bench_hausdorff(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/hausdorff");
    group.sample_size(20);
    let cfg = SearchCfg::default();
    let (c1, c2) = pair(1);
    for power in [0u32, 2] {
        group.bench_with_input(BenchmarkId::new("power", power), &power, |b, &p| {
            b.iter(|| hausdorff(&c1, &c2, p, &cfg))
        });
    }
    group.bench_function("project", |b| {
        b.iter(|| project(c1.eval(0.37), &c2, &cfg))
    });
    group.finish();
}

criterion_group!(benches, bench_min_distance, bench_hausdorff);
criterion_main!(benches);
