// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Navigation graph construction and per-algorithm query cost.
//!
//! ```sh
//! cargo bench --package quadnav-benches --bench routing
//! ```
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quadnav_benches::{corner_queries, disk_field};
use quadnav_nav::{build_graph_on_quadtree, Algorithm, BuildOptions, QuadPathfinder};
use std::{hint::black_box, time::Duration};

const SIZE: f64 = 256.0;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav_graph_build");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(6));
    for &n in &[10usize, 50, 200] {
        let world = disk_field(SIZE, n, 0x5eed).expect("world");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let nav = build_graph_on_quadtree(world.tree(), world.store(), &BuildOptions::default())
                    .expect("build");
                black_box(nav);
            });
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_find_path");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(6));
    let world = disk_field(SIZE, 50, 0x5eed).expect("world");
    let queries = corner_queries(SIZE, 0.5);
    for algorithm in Algorithm::ALL {
        let mut finder =
            QuadPathfinder::new(world.tree(), world.store(), algorithm, &BuildOptions::default())
                .expect("pathfinder");
        group.bench_function(BenchmarkId::from_parameter(algorithm.name()), |b| {
            b.iter(|| {
                for &(start, goal) in &queries {
                    let route = finder.find_path(start, goal).expect("query");
                    black_box(route);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
