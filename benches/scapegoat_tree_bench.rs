//! Benchmark for ScapegoatTree vs standard BTreeMap.
//!
//! Compares insertion, lookup, range and iteration against Rust's standard
//! BTreeMap, and measures how the balance factor trades rebuild work for
//! lookup depth.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use scapegoat::ScapegoatTree;
use std::collections::BTreeMap;

/// Visits every key in `0..size` exactly once in a scattered order.
fn scattered(size: i32) -> impl Iterator<Item = i32> {
    (0..size).map(move |index| (index * 7919) % size)
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert_ascending(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_ascending");

    for size in [100, 1000, 10000] {
        // ScapegoatTree insert
        group.bench_with_input(
            BenchmarkId::new("ScapegoatTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = ScapegoatTree::new();
                    for index in 0..size {
                        tree.put(black_box(index), black_box(index * 2));
                    }
                    black_box(tree)
                });
            },
        );

        // Standard BTreeMap insert
        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

fn benchmark_insert_scattered(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_scattered");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("ScapegoatTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = ScapegoatTree::new();
                    for key in scattered(size) {
                        tree.put(black_box(key), black_box(key * 2));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for key in scattered(size) {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        // Prepare data
        let tree: ScapegoatTree<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        // ScapegoatTree get
        group.bench_with_input(
            BenchmarkId::new("ScapegoatTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = tree.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        // Standard BTreeMap get
        group.bench_with_input(
            BenchmarkId::new("BTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = standard_map.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// range Benchmark
// =============================================================================

fn benchmark_range(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range");

    for size in [100, 1000, 10000] {
        // Prepare data
        let tree: ScapegoatTree<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        let range_start = size / 4;
        let range_end = size * 3 / 4;

        // ScapegoatTree range (inclusive on both ends)
        group.bench_with_input(
            BenchmarkId::new("ScapegoatTree", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let lower = black_box(range_start);
                    let upper = black_box(range_end);
                    let sum: i32 = tree.range(&lower, &upper).map(|(_, &value)| value).sum();
                    black_box(sum)
                });
            },
        );

        // Standard BTreeMap range
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = standard_map
                    .range(black_box(range_start)..=black_box(range_end))
                    .map(|(_, &value)| value)
                    .sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [100, 1000, 10000] {
        // Prepare data
        let tree: ScapegoatTree<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        // ScapegoatTree iteration
        group.bench_with_input(
            BenchmarkId::new("ScapegoatTree", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let sum: i32 = tree.values().sum();
                    black_box(sum)
                });
            },
        );

        // Standard BTreeMap iteration
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = standard_map.values().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// balance factor Benchmark
// =============================================================================

fn benchmark_balance_factor(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("balance_factor");
    let size = 10000;

    for alpha in [1.1, 1.5, 2.0, 3.0] {
        group.bench_with_input(
            BenchmarkId::new("insert_ascending", alpha),
            &alpha,
            |bencher, &alpha| {
                bencher.iter(|| {
                    let Ok(mut tree) = ScapegoatTree::with_alpha(alpha) else {
                        return;
                    };
                    for index in 0..size {
                        tree.put(black_box(index), black_box(index * 2));
                    }
                    black_box(tree);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert_ascending,
    benchmark_insert_scattered,
    benchmark_get,
    benchmark_range,
    benchmark_iteration,
    benchmark_balance_factor
);

criterion_main!(benches);
