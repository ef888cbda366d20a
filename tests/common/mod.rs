#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strided_blas::{Matrix, MatrixView, Order};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install a thread-local subscriber that writes through the test harness.
///
/// Set `RUST_LOG=strided_blas=trace` to see GEMM and pivot diagnostics.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize, order: Order) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, order, |_, _| rng.gen::<f64>() - 0.5)
}

/// Reference triple loop.
pub fn naive_product(a: MatrixView<'_, f64>, b: MatrixView<'_, f64>) -> Matrix<f64> {
    Matrix::from_fn(a.nrows(), b.ncols(), Order::RowMajor, |i, j| {
        (0..a.ncols()).map(|k| a.get(i, k) * b.get(k, j)).sum()
    })
}

pub fn max_abs_diff(a: MatrixView<'_, f64>, b: MatrixView<'_, f64>) -> f64 {
    assert_eq!(a.shape(), b.shape());
    let mut max = 0.0f64;
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            max = max.max((a.get(i, j) - b.get(i, j)).abs());
        }
    }
    max
}
