use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_rs_compose::kernel::multiply::multiply_into_with;
use num_rs_compose::kernel::substitute::substitute_forwards_with;
use num_rs_compose::view::Wrapped;
use num_rs_compose::{DenseStore, Op, Split};

fn operand(rows: usize, cols: usize, seed: f64) -> DenseStore<f64> {
    DenseStore::from_fn(rows, cols, |r, c| ((r * cols + c) as f64 * seed).sin())
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply_dense");
    for &size in &[64usize, 256] {
        let left = operand(size, size, 0.01);
        let right = operand(size, size, 0.02);
        for (label, split) in [("sequential", Split::sequential()), ("eager", Split::eager())] {
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, &size| {
                let mut product = DenseStore::zeros(size, size);
                b.iter(|| {
                    multiply_into_with(split, &mut product, black_box(&left), black_box(&right))
                        .expect("square operands");
                });
            });
        }
    }
    group.finish();
}

fn bench_generic_fallback(c: &mut Criterion) {
    let size = 128;
    let left = operand(size, size, 0.03);
    let right = operand(size, size, 0.04);
    let hidden_left = Wrapped::hiding(&left);
    let hidden_right = Wrapped::hiding(&right);
    c.bench_function("multiply_generic_128", |b| {
        let mut product = DenseStore::zeros(size, size);
        b.iter(|| {
            let split = Split::for_op(Op::Multiply);
            multiply_into_with(split, &mut product, &hidden_left, &hidden_right)
                .expect("square operands");
        });
    });
}

fn bench_substitute(c: &mut Criterion) {
    let size = 128;
    let body = DenseStore::from_fn(size, size, |r, c| {
        if r == c {
            4.0
        } else if r > c {
            0.01 * (r + c) as f64
        } else {
            0.0
        }
    });
    let rhs = operand(size, 512, 0.05);
    let mut group = c.benchmark_group("substitute_forwards");
    for (label, split) in [("sequential", Split::sequential()), ("eager", Split::eager())] {
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut work = rhs.clone();
                substitute_forwards_with(split, &body, false, false, false, &mut work)
                    .expect("square body");
                black_box(work)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multiply, bench_generic_fallback, bench_substitute);
criterion_main!(benches);
