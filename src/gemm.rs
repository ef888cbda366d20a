//! Cache-blocked `C += A * B` on column-major views.
//!
//! Loop structure:
//!
//! ```text
//! for each row tile i1..i2 of A and C          (GEMM_BLOCK_ROWS)
//!   for each reduction tile j1..j2              (GEMM_BLOCK_COLS)
//!     pack A(i1..i2, j1..j2) into an aligned col-major block
//!     for each 12-column panel of C(i1..i2, :)
//!       for each 4-row panel: micro-kernel over the packed tile
//!       leftover rows: plain loop
//!   leftover columns: plain loop
//! ```
//!
//! The micro-kernel keeps a `GEMM_MICRO_ROWS x GEMM_MICRO_COLS` panel of `C` in local
//! accumulators, streams the reduction dimension once and writes `C` back once.
//! Its summation order differs from a left-to-right dot product, so results can
//! differ from the naive product in the last bits.

use std::ops::Range;

use tracing::trace;

use crate::matrix::{check_shape, MatrixView, MatrixViewMut};
use crate::order::Order;
use crate::scalar::Scalar;
use crate::{Result, StridedError};
use crate::{GEMM_BLOCK_COLS, GEMM_BLOCK_ROWS, GEMM_MICRO_COLS, GEMM_MICRO_ROWS};

const PACKED_LEN: usize = GEMM_BLOCK_ROWS * GEMM_BLOCK_COLS;

/// Column-major staging tile for one `A` macro block, leading dimension
/// `GEMM_BLOCK_ROWS`.
#[repr(C, align(64))]
pub(crate) struct PackedBlock<T> {
    data: [T; PACKED_LEN],
}

impl<T: Scalar> PackedBlock<T> {
    pub(crate) fn new() -> Self {
        Self {
            data: [T::zero(); PACKED_LEN],
        }
    }

    /// Copy `src` (at most `GEMM_BLOCK_ROWS x GEMM_BLOCK_COLS`) into the tile and
    /// return a column-major view of the copy.
    fn pack(&mut self, src: MatrixView<'_, T>) -> MatrixView<'_, T> {
        let (rows, cols) = src.shape();
        debug_assert!(rows <= GEMM_BLOCK_ROWS && cols <= GEMM_BLOCK_COLS);
        for j in 0..cols {
            let dst = &mut self.data[j * GEMM_BLOCK_ROWS..j * GEMM_BLOCK_ROWS + rows];
            for (i, slot) in dst.iter_mut().enumerate() {
                *slot = unsafe { src.get_unchecked(i, j) };
            }
        }
        unsafe {
            MatrixView::from_raw_parts(
                self.data.as_ptr(),
                rows,
                cols,
                GEMM_BLOCK_ROWS,
                Order::ColMajor,
            )
        }
    }
}

/// Order and shape preconditions shared by the sequential and parallel entry points.
pub(crate) fn check_operands<T>(
    a: &MatrixView<'_, T>,
    b: &MatrixView<'_, T>,
    c: &MatrixViewMut<'_, T>,
) -> Result<()> {
    for found in [a.order(), b.order(), c.order()] {
        if found != Order::ColMajor {
            return Err(StridedError::UnsupportedOrder {
                expected: Order::ColMajor,
                found,
            });
        }
    }
    if a.ncols() != b.nrows() {
        return Err(StridedError::ShapeMismatch(
            vec![a.nrows(), a.ncols()],
            vec![b.nrows(), b.ncols()],
        ));
    }
    check_shape((a.nrows(), b.ncols()), c.shape())
}

/// `C += A * B` for column-major `A` (m x k), `B` (k x n) and `C` (m x n).
///
/// Row-major operands can be handled through transposed views,
/// `(A B)^T = B^T A^T`; see [`matmul_into`](crate::matmul_into).
///
/// # Errors
/// `UnsupportedOrder` if any operand is row-major, `ShapeMismatch` if the shapes
/// do not chain.
///
/// # Example
/// ```rust
/// use strided_blas::{add_mat_mat, Matrix, Order};
///
/// let a = Matrix::from_fn(2, 3, Order::ColMajor, |i, j| (i + j) as f64);
/// let b = Matrix::from_fn(3, 2, Order::ColMajor, |i, j| (i * j) as f64);
/// let mut c = Matrix::zeros(2, 2, Order::ColMajor);
/// add_mat_mat(a.view(), b.view(), &mut c.view_mut()).unwrap();
/// // row 1 of A is [1, 2, 3], column 1 of B is [0, 1, 2]
/// assert_eq!(c[(1, 1)], 8.0);
/// ```
pub fn add_mat_mat<T: Scalar>(
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
    c: &mut MatrixViewMut<'_, T>,
) -> Result<()> {
    check_operands(&a, &b, c)?;
    let m = a.nrows();
    trace!(m, n = b.ncols(), k = a.ncols(), "add_mat_mat");

    let mut packed = PackedBlock::new();
    for i1 in (0..m).step_by(GEMM_BLOCK_ROWS) {
        let i2 = (i1 + GEMM_BLOCK_ROWS).min(m);
        add_row_block(a.rows(i1, i2), b, c.rows_mut(i1, i2), &mut packed);
    }
    Ok(())
}

/// `C += A * B` for one row tile (`A.nrows() <= GEMM_BLOCK_ROWS`).
///
/// Operands must already satisfy [`check_operands`].
pub(crate) fn add_row_block<T: Scalar>(
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
    mut c: MatrixViewMut<'_, T>,
    packed: &mut PackedBlock<T>,
) {
    debug_assert!(a.nrows() <= GEMM_BLOCK_ROWS);
    let k = a.ncols();
    for j1 in (0..k).step_by(GEMM_BLOCK_COLS) {
        let j2 = (j1 + GEMM_BLOCK_COLS).min(k);
        let tile = packed.pack(a.cols(j1, j2));
        add_panels(tile, b.rows(j1, j2), c.rb_mut());
    }
}

/// `C += A * B` where `A` is one packed tile.
fn add_panels<T: Scalar>(a: MatrixView<'_, T>, b: MatrixView<'_, T>, mut c: MatrixViewMut<'_, T>) {
    let (m, n, k) = (a.nrows(), b.ncols(), a.ncols());
    let full_rows = m - m % GEMM_MICRO_ROWS;
    let full_cols = n - n % GEMM_MICRO_COLS;
    let (a_dist, b_dist, c_dist) = (a.dist(), b.dist(), c.dist());

    for j in (0..full_cols).step_by(GEMM_MICRO_COLS) {
        for i in (0..full_rows).step_by(GEMM_MICRO_ROWS) {
            // SAFETY: the 4x12 panel at (i, j) lies inside C, rows i..i+4 of A and
            // columns j..j+12 of B lie inside their views.
            unsafe {
                micro_kernel::<T, GEMM_MICRO_ROWS, GEMM_MICRO_COLS>(
                    k,
                    a.as_ptr().wrapping_add(i),
                    a_dist,
                    b.as_ptr().wrapping_add(j * b_dist),
                    b_dist,
                    c.as_mut_ptr().wrapping_add(i + j * c_dist),
                    c_dist,
                );
            }
        }
        add_naive(&a, &b, &mut c, full_rows..m, j..j + GEMM_MICRO_COLS);
    }
    add_naive(&a, &b, &mut c, 0..m, full_cols..n);
}

/// Plain triple loop over `rows x cols` of `C`.
fn add_naive<T: Scalar>(
    a: &MatrixView<'_, T>,
    b: &MatrixView<'_, T>,
    c: &mut MatrixViewMut<'_, T>,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    let k = a.ncols();
    for j in cols {
        for i in rows.clone() {
            // SAFETY: callers pass ranges inside C's shape; A and B chain with C.
            unsafe {
                let mut sum = *c.get_unchecked_mut(i, j);
                for p in 0..k {
                    sum = sum + a.get_unchecked(i, p) * b.get_unchecked(p, j);
                }
                *c.get_unchecked_mut(i, j) = sum;
            }
        }
    }
}

/// Register-blocked `C[H x W] += A[H x k] * B[k x W]`, all column-major.
///
/// # Safety
/// `a[h + p * a_dist]`, `b[p + w * b_dist]` and `c[h + w * c_dist]` must be valid
/// for every `h < H`, `w < W`, `p < k`, and `c` must not alias `a` or `b`.
#[inline(always)]
unsafe fn micro_kernel<T: Scalar, const H: usize, const W: usize>(
    k: usize,
    a: *const T,
    a_dist: usize,
    b: *const T,
    b_dist: usize,
    c: *mut T,
    c_dist: usize,
) {
    let mut acc = [[T::zero(); H]; W];
    for (w, col) in acc.iter_mut().enumerate() {
        for (h, x) in col.iter_mut().enumerate() {
            *x = *c.add(h + w * c_dist);
        }
    }

    for p in 0..k {
        let a_col = a.add(p * a_dist);
        let mut a_vals = [T::zero(); H];
        for (h, x) in a_vals.iter_mut().enumerate() {
            *x = *a_col.add(h);
        }
        for (w, col) in acc.iter_mut().enumerate() {
            let bw = *b.add(p + w * b_dist);
            for (x, &av) in col.iter_mut().zip(a_vals.iter()) {
                *x = *x + av * bw;
            }
        }
    }

    for (w, col) in acc.iter().enumerate() {
        for (h, &x) in col.iter().enumerate() {
            *c.add(h + w * c_dist) = x;
        }
    }
}
