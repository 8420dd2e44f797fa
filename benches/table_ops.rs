//! Table operation benchmarks
//!
//! These benchmarks measure the operations that touch every cell of a table:
//! scalar arithmetic, aggregation, sorting, string transforms and index
//! generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datatable::{AggregateOp, Axis, Complex, ElementType, ScalarOp, SortOrder, StringOp, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn numeric_table(nrec: usize, ncomp: usize) -> Table {
    let mut rng = StdRng::seed_from_u64(42);
    let mut t = Table::new();
    t.add_ncomps(ElementType::F64, ncomp).unwrap();
    t.allocate(nrec).unwrap();
    for r in 0..nrec {
        for c in 0..ncomp {
            t.dstore(r, c, rng.gen_range(-1000.0..1000.0));
        }
    }
    t
}

fn label_table(nrec: usize, vocabulary: usize) -> Table {
    let mut rng = StdRng::seed_from_u64(7);
    let mut t = Table::with_components(&[("lab", ElementType::symbolic(16).unwrap())], nrec).unwrap();
    for r in 0..nrec {
        t.sstore(r, 0, &format!("w{}", rng.gen_range(0..vocabulary)));
    }
    t
}

fn bench_scalop(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalop");

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("add_f64", size), &size, |b, &size| {
            let mut t = numeric_table(size, 4);
            b.iter(|| t.scalop(black_box(Complex::real(1.5)), ScalarOp::Add, None).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("add_complex", size), &size, |b, &size| {
            let mut t = numeric_table(size, 4);
            b.iter(|| t.scalop(black_box(Complex::new(1.0, 1.0)), ScalarOp::Add, None).unwrap());
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in SIZES {
        let t = numeric_table(size, 8);
        for axis in [Axis::Components, Axis::Records] {
            group.bench_with_input(BenchmarkId::new(format!("mean_{axis}"), size), &t, |b, t| {
                let mut out = Table::new();
                b.iter(|| {
                    out.aggregate(black_box(t), None, Complex::ZERO, AggregateOp::Mean, axis)
                        .unwrap()
                });
            });
        }
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in SIZES {
        let t = numeric_table(size, 3);
        group.bench_with_input(BenchmarkId::new("f64_ascending", size), &t, |b, t| {
            let mut out = Table::new();
            let mut index = Table::new();
            b.iter(|| {
                out.sort(black_box(t), Some(&mut index), 0, SortOrder::Ascending, false)
                    .unwrap()
            });
        });

        let labels = label_table(size, 500);
        group.bench_with_input(BenchmarkId::new("labels", size), &labels, |b, t| {
            let mut out = Table::new();
            b.iter(|| out.sort(black_box(t), None, 0, SortOrder::Ascending, false).unwrap());
        });
    }

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strop");

    for size in SIZES {
        let t = label_table(size, 500);
        for op in [StringOp::Upr, StringOp::Len, StringOp::Chash] {
            group.bench_with_input(BenchmarkId::new(op.name(), size), &t, |b, t| {
                let mut out = Table::new();
                b.iter(|| out.strop(black_box(t), "", op).unwrap());
            });
        }
        group.bench_with_input(BenchmarkId::new("checksum", size), &t, |b, t| {
            b.iter(|| black_box(t.checksum(None)));
        });
    }

    group.finish();
}

fn bench_gen_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_index");

    let vocabulary = label_table(500, 500);
    for size in SIZES {
        let words = label_table(size, 500);
        group.bench_with_input(BenchmarkId::new("labels", size), &words, |b, words| {
            let mut index = Table::new();
            b.iter(|| index.gen_index(black_box(words), &vocabulary, None, 0, false).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalop,
    bench_aggregate,
    bench_sort,
    bench_strings,
    bench_gen_index
);
criterion_main!(benches);
