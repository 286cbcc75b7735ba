//! Benchmark for `PersistentDeque` vs standard `VecDeque`.
//!
//! Compares the end operations, indexed access and concatenation of
//! `PersistentDeque` against Rust's standard `VecDeque`.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_deque::persistent::PersistentDeque;
use std::collections::VecDeque;
use std::hint::black_box;

// =============================================================================
// cons_right Benchmark (append)
// =============================================================================

fn benchmark_cons_right(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cons_right");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentDeque", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut deque = PersistentDeque::new();
                    for index in 0..size {
                        deque = deque.cons_right(black_box(index));
                    }
                    black_box(deque)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut deque = VecDeque::new();
                    for index in 0..size {
                        deque.push_back(black_box(index));
                    }
                    black_box(deque)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// cons_cons_left Benchmark (double prepend)
// =============================================================================

fn benchmark_cons_cons_left(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cons_cons_left");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("cons_cons_left", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut deque = PersistentDeque::new();
                    for index in 0..size / 2 {
                        deque = deque.cons_cons_left(black_box(index), black_box(index + 1));
                    }
                    black_box(deque)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cons_left_twice", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut deque = PersistentDeque::new();
                    for index in 0..size / 2 {
                        deque = deque
                            .cons_left(black_box(index + 1))
                            .cons_left(black_box(index));
                    }
                    black_box(deque)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// tail_left Benchmark (pop front)
// =============================================================================

fn benchmark_tail_left(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("tail_left");

    for size in [100, 1000, 10000] {
        let persistent: PersistentDeque<i32> = (0..size).collect();
        let standard: VecDeque<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentDeque", size),
            &persistent,
            |bencher, deque| {
                bencher.iter(|| {
                    let mut current = deque.clone();
                    while let Ok(rest) = current.tail_left() {
                        current = rest;
                    }
                    black_box(current)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &standard,
            |bencher, deque| {
                bencher.iter(|| {
                    let mut current = deque.clone();
                    while current.pop_front().is_some() {}
                    black_box(current)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark (random access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let persistent: PersistentDeque<i32> = (0..size).collect();
        let standard: VecDeque<i32> = (0..size).collect();
        let length = size as usize;

        group.bench_with_input(
            BenchmarkId::new("PersistentDeque", size),
            &persistent,
            |bencher, deque| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for index in (0..length).step_by(7) {
                        sum += deque.get(black_box(index)).copied().unwrap_or(0);
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &standard,
            |bencher, deque| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for index in (0..length).step_by(7) {
                        sum += deque.get(black_box(index)).copied().unwrap_or(0);
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// concat Benchmark
// =============================================================================

fn benchmark_concat(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat");

    for size in [100, 1000, 10000] {
        let persistent_first: PersistentDeque<i32> = (0..size).collect();
        let persistent_second: PersistentDeque<i32> = (size..size * 2).collect();
        let standard_first: VecDeque<i32> = (0..size).collect();
        let standard_second: VecDeque<i32> = (size..size * 2).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentDeque", size),
            &(persistent_first, persistent_second),
            |bencher, (first, second)| {
                bencher.iter(|| black_box(first.concat(second)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("VecDeque", size),
            &(standard_first, standard_second),
            |bencher, (first, second)| {
                bencher.iter(|| {
                    let mut joined = first.clone();
                    joined.extend(second.iter().copied());
                    black_box(joined)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cons_right,
    benchmark_cons_cons_left,
    benchmark_tail_left,
    benchmark_get,
    benchmark_concat
);

criterion_main!(benches);
