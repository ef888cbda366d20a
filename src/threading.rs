//! Rayon-based parallel execution for GEMM and expression assignment.
//!
//! Work is split recursively with `rayon::join` over disjoint destination ranges:
//! row blocks of `C` for GEMM, row ranges for matrix assignment and index ranges
//! for vector assignment. Expressions are pure reads, so every task only needs
//! shared access to its source.

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::gemm::{add_row_block, check_operands, PackedBlock};
use crate::matexpr::MatExpr;
use crate::matrix::{check_shape, MatrixView, MatrixViewMut};
use crate::scalar::Scalar;
use crate::vecexpr::VecExpr;
use crate::vector::{check_len, VectorViewMut};
use crate::{Result, GEMM_BLOCK_ROWS};

/// Minimum number of elements to justify splitting an assignment.
pub(crate) const MIN_THREAD_LENGTH: usize = 1 << 15;

/// An explicitly started pool of worker threads.
///
/// Nothing in the crate requires a pool; without one the parallel entry points run
/// on rayon's global pool. Use [`WorkerPool::install`] to run them on this one.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Start `n` workers. `n == 0` lets rayon pick the count.
    ///
    /// # Errors
    /// `ThreadPool` if the threads cannot be spawned.
    pub fn start(n: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|i| format!("strided-worker-{i}"))
            .build()?;
        debug!(workers = pool.current_num_threads(), "worker pool started");
        Ok(Self { pool })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `f` with this pool as the current rayon pool.
    pub fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        self.pool.install(f)
    }

    /// Signal the pool to shut down. Workers exit once their queued work is done;
    /// this call does not wait for them.
    pub fn stop(self) {
        debug!(workers = self.num_workers(), "worker pool stopping");
        drop(self.pool);
    }
}

/// Parallel `C += A * B` with the same preconditions as
/// [`add_mat_mat`](crate::add_mat_mat).
///
/// `C` is split into `GEMM_BLOCK_ROWS`-row blocks; each task packs into its own
/// staging block. Results are bitwise identical to the sequential kernel.
///
/// # Errors
/// `UnsupportedOrder` if any operand is row-major, `ShapeMismatch` if the shapes
/// do not chain.
pub fn par_add_mat_mat<T: Scalar + Send + Sync>(
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
    c: &mut MatrixViewMut<'_, T>,
) -> Result<()> {
    check_operands(&a, &b, c)?;
    trace!(m = a.nrows(), n = b.ncols(), k = a.ncols(), "par_add_mat_mat");
    split_gemm(a, b, c.rb_mut());
    Ok(())
}

fn split_gemm<T: Scalar + Send + Sync>(
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
    c: MatrixViewMut<'_, T>,
) {
    let m = c.nrows();
    if m <= GEMM_BLOCK_ROWS {
        let mut packed = PackedBlock::new();
        add_row_block(a, b, c, &mut packed);
        return;
    }
    // split on a block boundary so every leaf is one full macro block
    let blocks = m.div_ceil(GEMM_BLOCK_ROWS);
    let mid = (blocks / 2) * GEMM_BLOCK_ROWS;
    let (top, bottom) = c.split_rows_at(mid);
    rayon::join(
        || split_gemm(a.rows(0, mid), b, top),
        || split_gemm(a.rows(mid, m), b, bottom),
    );
}

/// Parallel `dest = expr` for matrices.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ; `dest` is then untouched.
pub fn par_assign<T, E>(dest: &mut MatrixViewMut<'_, T>, expr: E) -> Result<()>
where
    T: Copy + Send,
    E: MatExpr<Elem = T> + Sync,
{
    check_shape(dest.shape(), expr.shape())?;
    split_assign(dest.rb_mut(), &expr, 0);
    Ok(())
}

fn split_assign<T, E>(mut dest: MatrixViewMut<'_, T>, expr: &E, first_row: usize)
where
    T: Copy + Send,
    E: MatExpr<Elem = T> + Sync,
{
    let (rows, cols) = dest.shape();
    if rows <= 1 || rows * cols <= MIN_THREAD_LENGTH {
        for i in 0..rows {
            for j in 0..cols {
                dest.set(i, j, expr.at(first_row + i, j));
            }
        }
        return;
    }
    let mid = rows / 2;
    let (top, bottom) = dest.split_rows_at(mid);
    rayon::join(
        || split_assign(top, expr, first_row),
        || split_assign(bottom, expr, first_row + mid),
    );
}

/// Parallel `dest = expr` for vectors.
///
/// # Errors
/// `ShapeMismatch` if the lengths differ; `dest` is then untouched.
pub fn par_assign_vec<T, E>(dest: &mut VectorViewMut<'_, T>, expr: E) -> Result<()>
where
    T: Copy + Send,
    E: VecExpr<Elem = T> + Sync,
{
    check_len(dest.len(), expr.len())?;
    split_assign_vec(dest.rb_mut(), &expr, 0);
    Ok(())
}

fn split_assign_vec<T, E>(mut dest: VectorViewMut<'_, T>, expr: &E, first: usize)
where
    T: Copy + Send,
    E: VecExpr<Elem = T> + Sync,
{
    let len = dest.len();
    if len <= MIN_THREAD_LENGTH {
        for i in 0..len {
            dest.set(i, expr.at(first + i));
        }
        return;
    }
    let mid = len / 2;
    let (left, right) = dest.split_at(mid);
    rayon::join(
        || split_assign_vec(left, expr, first),
        || split_assign_vec(right, expr, first + mid),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemm::add_mat_mat;
    use crate::order::Order;
    use crate::{Matrix, Vector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random(rng: &mut StdRng, rows: usize, cols: usize, order: Order) -> Matrix<f64> {
        Matrix::from_fn(rows, cols, order, |_, _| rng.gen::<f64>() - 0.5)
    }

    #[test]
    fn test_par_gemm_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(11);
        // 3 full row blocks plus a leftover
        let a = random(&mut rng, 300, 130, Order::ColMajor);
        let b = random(&mut rng, 130, 45, Order::ColMajor);
        let mut seq = Matrix::zeros(300, 45, Order::ColMajor);
        let mut par = Matrix::zeros(300, 45, Order::ColMajor);
        add_mat_mat(a.view(), b.view(), &mut seq.view_mut()).unwrap();
        par_add_mat_mat(a.view(), b.view(), &mut par.view_mut()).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_par_gemm_in_pool() {
        let pool = WorkerPool::start(3).unwrap();
        assert_eq!(pool.num_workers(), 3);
        let a = Matrix::from_fn(200, 7, Order::ColMajor, |i, j| (i % 5 + j) as i64);
        let b = Matrix::from_fn(7, 9, Order::ColMajor, |i, j| (i * j) as i64);
        let mut c = Matrix::zeros(200, 9, Order::ColMajor);
        pool.install(|| par_add_mat_mat(a.view(), b.view(), &mut c.view_mut()))
            .unwrap();
        let expected = Matrix::from_expr(&a * &b, Order::ColMajor);
        assert_eq!(c, expected);
        pool.stop();
    }

    #[test]
    fn test_par_gemm_rejects_row_major() {
        let a = Matrix::<f64>::zeros(4, 4, Order::RowMajor);
        let b = Matrix::<f64>::zeros(4, 4, Order::ColMajor);
        let mut c = Matrix::<f64>::zeros(4, 4, Order::ColMajor);
        assert!(par_add_mat_mat(a.view(), b.view(), &mut c.view_mut()).is_err());
    }

    #[test]
    fn test_par_assign_large() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = random(&mut rng, 400, 200, Order::RowMajor);
        let b = random(&mut rng, 400, 200, Order::ColMajor);
        let mut dest = Matrix::zeros(400, 200, Order::RowMajor);
        par_assign(&mut dest.view_mut(), &a - 2.0 * &b).unwrap();
        let expected = Matrix::from_expr(&a - 2.0 * &b, Order::RowMajor);
        assert_eq!(dest, expected);
    }

    #[test]
    fn test_par_assign_shape_mismatch() {
        let a = Matrix::<f64>::zeros(3, 2, Order::RowMajor);
        let mut dest = Matrix::from_fn(2, 3, Order::RowMajor, |_, _| 1.0);
        assert!(par_assign(&mut dest.view_mut(), &a).is_err());
        assert_eq!(dest.as_slice(), &[1.0; 6]);
    }

    #[test]
    fn test_par_assign_vec() {
        let n = 100_000;
        let x: Vector<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vector<f64> = (0..n).map(|i| (n - i) as f64).collect();
        let mut z = Vector::new(n);
        par_assign_vec(&mut z.view_mut(), &x + &y).unwrap();
        assert!(z.iter().all(|&v| v == n as f64));

        let mut short = Vector::new(3);
        assert!(par_assign_vec(&mut short.view_mut(), &x).is_err());
    }
}
