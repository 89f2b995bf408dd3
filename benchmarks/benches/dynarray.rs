// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use dynarray::DynArray;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench dynarray
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn filled(size: usize) -> DynArray<u32> {
    let mut array = DynArray::new();
    let data: Vec<u32> = (0..size as u32).collect();
    array
        .extend_from_slice(&data)
        .expect("Failed to extend_from_slice(..)");
    array
}

// =============================================================================
// Vec vs DynArray
// =============================================================================

fn bench_push_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_individual");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u32);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            b.iter(|| {
                let mut array = DynArray::new();
                for i in 0..s {
                    array.push(i as u32).expect("Failed to push(..)");
                }
                black_box(array)
            });
        });
    }

    group.finish();
}

fn bench_extend_from_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend_from_slice");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        let data: Vec<u32> = (0..size as u32).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &data, |b, data| {
            b.iter(|| {
                let mut vec = Vec::new();
                vec.extend_from_slice(data);
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &data, |b, data| {
            b.iter(|| {
                let mut array = DynArray::new();
                array
                    .extend_from_slice(data)
                    .expect("Failed to extend_from_slice(..)");
                black_box(array)
            });
        });
    }

    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u32).collect::<Vec<u32>>(),
                |mut vec| {
                    vec.clear();
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            b.iter_batched(
                || filled(s),
                |mut array| {
                    array.clear();
                    black_box(array)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_try_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("try_clone");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        let vec: Vec<u32> = (0..size as u32).collect();
        group.bench_with_input(BenchmarkId::new("Vec", size), &vec, |b, vec| {
            b.iter(|| black_box(vec.clone()));
        });

        let array = filled(size);
        group.bench_with_input(BenchmarkId::new("DynArray", size), &array, |b, array| {
            b.iter(|| black_box(array.try_clone().expect("Failed to try_clone()")));
        });
    }

    group.finish();
}

// =============================================================================
// Search
// =============================================================================

fn bench_linear_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_search");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        let array = filled(size);
        let key = size as u32 - 1;
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("index_of", size), &array, |b, array| {
            b.iter(|| black_box(array.index_of(black_box(&key))));
        });

        group.bench_with_input(BenchmarkId::new("find_index_in", size), &array, |b, array| {
            b.iter(|| {
                black_box(
                    array
                        .find_index_in(0, array.len(), |x| *x == key)
                        .expect("Failed to find_index_in(..)"),
                )
            });
        });
    }

    group.finish();
}

fn bench_binary_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_search");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        let array = filled(size);
        let key = size as u32 / 3;

        group.bench_with_input(BenchmarkId::new("slice", size), &array, |b, array| {
            b.iter(|| black_box(array.as_slice().binary_search(black_box(&key)).is_ok()));
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &array, |b, array| {
            b.iter(|| black_box(array.binary_search(black_box(&key))));
        });
    }

    group.finish();
}

criterion_group!(
    growth_benches,
    bench_push_individual,
    bench_extend_from_slice,
    bench_clear,
    bench_try_clone
);

criterion_group!(search_benches, bench_linear_search, bench_binary_search);

criterion_main!(growth_benches, search_benches);
