//! GEMM benchmarks
//!
//! Compares the lazy product expression, the blocked kernel and (with the
//! `parallel` feature) the row-block parallel kernel.
//!
//! Run with: cargo bench --bench gemm

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use strided_blas::{add_mat_mat, calc_inverse, matmul, Matrix, Order, Vector};

fn random(rng: &mut StdRng, rows: usize, cols: usize, order: Order) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, order, |_, _| rng.gen::<f64>() - 0.5)
}

/// Lazy `A * B` vs blocked `C += A * B`
fn bench_gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for n in [64, 128, 256, 512] {
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));

        let mut rng = StdRng::seed_from_u64(42);
        let a = random(&mut rng, n, n, Order::ColMajor);
        let b = random(&mut rng, n, n, Order::ColMajor);
        let mut out = Matrix::zeros(n, n, Order::ColMajor);

        // the lazy product has no blocking; skip the largest size
        if n <= 256 {
            group.bench_with_input(BenchmarkId::new("lazy", n), &n, |bench, _| {
                bench.iter(|| out.assign(black_box(&a) * black_box(&b)).unwrap())
            });
        }

        group.bench_with_input(BenchmarkId::new("blocked", n), &n, |bench, _| {
            bench.iter(|| {
                out.fill(0.0);
                add_mat_mat(black_box(a.view()), black_box(b.view()), &mut out.view_mut())
                    .unwrap()
            })
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |bench, _| {
            bench.iter(|| {
                out.fill(0.0);
                strided_blas::par_add_mat_mat(
                    black_box(a.view()),
                    black_box(b.view()),
                    &mut out.view_mut(),
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

/// `matmul` over storage-order combinations
fn bench_matmul_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_orders");
    group.sample_size(10);

    let n = 256;
    let mut rng = StdRng::seed_from_u64(7);
    for (name, oa, ob) in [
        ("col_col", Order::ColMajor, Order::ColMajor),
        ("row_row", Order::RowMajor, Order::RowMajor),
        ("row_col", Order::RowMajor, Order::ColMajor),
    ] {
        let a = random(&mut rng, n, n, oa);
        let b = random(&mut rng, n, n, ob);
        group.bench_function(name, |bench| {
            bench.iter(|| matmul(black_box(a.view()), black_box(b.view())).unwrap())
        });
    }
    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");
    group.sample_size(10);

    for n in [16, 64, 200] {
        let mut rng = StdRng::seed_from_u64(3);
        let a = random(&mut rng, n, n, Order::RowMajor);
        group.bench_with_input(BenchmarkId::new("gauss_jordan", n), &n, |bench, _| {
            bench.iter(|| {
                let mut m = a.clone();
                calc_inverse(&mut m.view_mut()).unwrap();
                m
            })
        });
    }
    group.finish();
}

fn bench_vector_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_expr");
    let size = 100_000;
    group.throughput(Throughput::Elements(size as u64));

    let x: Vector<f64> = (0..size).map(|i| i as f64).collect();
    let y: Vector<f64> = (0..size).map(|i| (size - i) as f64).collect();
    let mut z = Vector::new(size);
    group.bench_function("x_plus_2y", |bench| {
        bench.iter(|| z.assign(black_box(&x) + 2.0 * black_box(&y)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_gemm,
    bench_matmul_orders,
    bench_inverse,
    bench_vector_expr
);
criterion_main!(benches);
