//! Dispatch benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Sort scalability (10K to 1M keys) on the radix and comparison paths
//! - Sorts by key with companion payloads
//! - Vectorized searches over large sorted inputs
//! - Copies
//! - Pathological inputs (sorted, reversed, few distinct keys)
//!
//! For sequential execution, use `FASTSTRATA_BACKEND=serial cargo bench`.
//! For parallel execution, use `FASTSTRATA_BACKEND=parallel cargo bench`.
//! For GPU execution, use `FASTSTRATA_BACKEND=gpu cargo bench --features gpu`.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fastStrata::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Clone, Copy)]
enum Mode {
    Serial,
    Parallel,
    Gpu,
}

fn get_config() -> (Mode, &'static str) {
    match env::var("FASTSTRATA_BACKEND").ok().as_deref() {
        Some("serial") | Some("sequential") => (Mode::Serial, "serial"),
        Some("gpu") => (Mode::Gpu, "gpu"),
        Some("parallel") | _ => (Mode::Parallel, "parallel"),
    }
}

/// Run `$bench::<Space>` for the space selected by the environment.
macro_rules! in_space {
    ($c:expr, $bench:ident) => {
        match get_config() {
            (Mode::Serial, name) => $bench::<Sequential>($c, name),
            (Mode::Parallel, name) => $bench::<Parallel>($c, name),
            (Mode::Gpu, name) => $bench::<Accelerator>($c, name),
        }
    };
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Uniformly distributed unsigned keys.
fn generate_u32_keys(size: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random()).collect()
}

/// Normally distributed float keys.
fn generate_f64_keys(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1_000.0).unwrap();
    (0..size).map(|_| dist.sample(&mut rng)).collect()
}

/// Keys drawn from a handful of distinct values.
fn generate_few_distinct(size: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0, 8).unwrap();
    (0..size).map(|_| dist.sample(&mut rng)).collect()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn sort_scalability<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("sort_scalability_{mode}"));
    group.sample_size(30);

    for size in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));
        let keys = generate_u32_keys(size, 42);

        group.bench_with_input(BenchmarkId::new("radix_u32", size), &size, |b, _| {
            b.iter_batched_ref(
                || keys.clone(),
                |data| dispatcher.stable_sort(S::view_mut(black_box(data))).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("comparison_u32", size), &size, |b, _| {
            b.iter_batched_ref(
                || keys.clone(),
                |data| {
                    dispatcher
                        .stable_sort_by(S::view_mut(black_box(data)), |a: &u32, b: &u32| a < b)
                        .unwrap()
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn sort_floats<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("sort_floats_{mode}"));
    group.sample_size(30);

    for size in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));
        let keys = generate_f64_keys(size, 7);

        group.bench_with_input(BenchmarkId::new("descending_f64", size), &size, |b, _| {
            b.iter_batched_ref(
                || keys.clone(),
                |data| {
                    dispatcher
                        .stable_sort_by(S::view_mut(black_box(data)), Greater::new())
                        .unwrap()
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn sort_by_key<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
    S: Resolve<S, Output = S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("sort_by_key_{mode}"));
    group.sample_size(30);

    for size in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));
        let keys = generate_u32_keys(size, 11);
        let values: Vec<u64> = (0..size as u64).collect();

        group.bench_with_input(BenchmarkId::new("u32_u64", size), &size, |b, _| {
            b.iter_batched_ref(
                || (keys.clone(), values.clone()),
                |(k, v)| {
                    dispatcher
                        .stable_sort_by_key(S::view_mut(black_box(k)), S::view_mut(black_box(v)))
                        .unwrap()
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn searches<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
    S: Resolve<S, Output = S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("searches_{mode}"));
    group.sample_size(50);

    let mut sorted = generate_u32_keys(1_000_000, 3);
    sorted.sort_unstable();

    for queries_len in [1_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(queries_len as u64));
        let queries = generate_u32_keys(queries_len, 5);
        let mut out = vec![0usize; queries_len];
        let mut found = vec![false; queries_len];

        group.bench_with_input(
            BenchmarkId::new("lower_bound_many", queries_len),
            &queries_len,
            |b, _| {
                b.iter(|| {
                    dispatcher
                        .lower_bound_many(
                            S::view(black_box(&sorted)),
                            S::view(black_box(&queries)),
                            S::view_mut(&mut out),
                        )
                        .unwrap()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("binary_search_many", queries_len),
            &queries_len,
            |b, _| {
                b.iter(|| {
                    dispatcher
                        .binary_search_many(
                            S::view(black_box(&sorted)),
                            S::view(black_box(&queries)),
                            S::view_mut(&mut found),
                        )
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn copies<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
    S: Resolve<S, Output = S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("copy_{mode}"));
    group.sample_size(50);

    for size in [10_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));
        let src = generate_f64_keys(size, 13);
        let mut dest = vec![0.0; size];

        group.bench_with_input(BenchmarkId::new("copy_f64", size), &size, |b, _| {
            b.iter(|| {
                dispatcher
                    .copy(S::view(black_box(&src)), S::view_mut(&mut dest))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn pathological<S: Space>(c: &mut Criterion, mode: &str)
where
    FastDispatcher: Select<S>,
{
    let dispatcher = dispatcher();
    let mut group = c.benchmark_group(format!("pathological_{mode}"));
    group.sample_size(30);
    let size = 500_000;

    let sorted: Vec<i32> = (0..size).collect();
    let reversed: Vec<i32> = (0..size).rev().collect();
    let few = generate_few_distinct(size as usize, 17);

    for (name, keys) in [("sorted", sorted), ("reversed", reversed), ("few_distinct", few)] {
        group.bench_function(name, |b| {
            b.iter_batched_ref(
                || keys.clone(),
                |data| dispatcher.stable_sort(S::view_mut(black_box(data))).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_sort_scalability(c: &mut Criterion) {
    in_space!(c, sort_scalability)
}

fn bench_sort_floats(c: &mut Criterion) {
    in_space!(c, sort_floats)
}

fn bench_sort_by_key(c: &mut Criterion) {
    in_space!(c, sort_by_key)
}

fn bench_searches(c: &mut Criterion) {
    in_space!(c, searches)
}

fn bench_copies(c: &mut Criterion) {
    in_space!(c, copies)
}

fn bench_pathological(c: &mut Criterion) {
    in_space!(c, pathological)
}

criterion_group!(
    benches,
    bench_sort_scalability,
    bench_sort_floats,
    bench_sort_by_key,
    bench_searches,
    bench_copies,
    bench_pathological,
);

criterion_main!(benches);
