//! Native implementations of the narrow BLAS/LAPACK-style interface.
//!
//! - `axpy`: `y = alpha * x + y`
//! - `axpby`: `y = alpha * x + beta * y`
//! - `gemv`: `y = alpha * A * x + beta * y`
//! - `matmul` / `matmul_into`: `C = A * B` over any mix of storage orders
//! - `inverse`: copy and invert
//!
//! Everything here is built on the view types, the expression nodes, the blocked
//! GEMM and the in-place inverse; no vendor library is involved.

use tracing::trace;

use crate::gemm::add_mat_mat;
use crate::inverse::calc_inverse;
use crate::matexpr::{MatExpr, MatVecExpr};
use crate::matrix::{check_shape, Matrix, MatrixView, MatrixViewMut};
use crate::order::Order;
use crate::scalar::{Field, Scalar};
use crate::vecexpr::{ScaleExpr, VecExpr};
use crate::vector::{check_len, VectorView, VectorViewMut};
use crate::{Result, StridedError};

/// `y = alpha * x + y`
///
/// # Example
/// ```rust
/// use strided_blas::{axpy, Vector};
///
/// let x = Vector::from(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// let mut y = Vector::from(vec![2.0; 5]);
/// axpy(2.0, x.view(), &mut y.view_mut()).unwrap();
/// assert_eq!(y.as_slice(), &[2.0, 4.0, 6.0, 8.0, 10.0]);
/// ```
pub fn axpy<T: Scalar>(alpha: T, x: VectorView<'_, T>, y: &mut VectorViewMut<'_, T>) -> Result<()> {
    y.add_assign_expr(ScaleExpr::new(alpha, x))
}

/// `y = alpha * x + beta * y`
pub fn axpby<T: Scalar>(
    alpha: T,
    x: VectorView<'_, T>,
    beta: T,
    y: &mut VectorViewMut<'_, T>,
) -> Result<()> {
    check_len(y.len(), x.len())?;
    for i in 0..x.len() {
        let v = alpha * x.get(i) + beta * y.get(i);
        y.set(i, v);
    }
    Ok(())
}

/// `y = alpha * A * x + beta * y`
///
/// `A` may be any view, including a transposed one.
pub fn gemv<T: Scalar>(
    alpha: T,
    a: MatrixView<'_, T>,
    x: VectorView<'_, T>,
    beta: T,
    y: &mut VectorViewMut<'_, T>,
) -> Result<()> {
    let ax = MatVecExpr::try_new(a, x)?;
    check_len(y.len(), ax.len())?;
    for i in 0..y.len() {
        let v = alpha * ax.at(i) + beta * y.get(i);
        y.set(i, v);
    }
    Ok(())
}

/// `C = A * B` into an existing view.
///
/// Dispatch on storage orders:
/// - all column-major: blocked GEMM directly
/// - all row-major: blocked GEMM on the transposes, `C^T = B^T A^T`
/// - mixed: operands whose order differs from `C` are first copied into `C`'s order
///
/// # Errors
/// `ShapeMismatch` if the shapes do not chain.
pub fn matmul_into<T: Scalar>(
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
    c: &mut MatrixViewMut<'_, T>,
) -> Result<()> {
    if a.ncols() != b.nrows() {
        return Err(StridedError::ShapeMismatch(
            vec![a.nrows(), a.ncols()],
            vec![b.nrows(), b.ncols()],
        ));
    }
    check_shape((a.nrows(), b.ncols()), c.shape())?;

    let order = c.order();
    let a_copy;
    let a = if a.order() == order {
        a
    } else {
        trace!(rows = a.nrows(), cols = a.ncols(), ?order, "matmul: reordering A");
        a_copy = reordered(a, order);
        a_copy.view()
    };
    let b_copy;
    let b = if b.order() == order {
        b
    } else {
        trace!(rows = b.nrows(), cols = b.ncols(), ?order, "matmul: reordering B");
        b_copy = reordered(b, order);
        b_copy.view()
    };

    c.fill(T::zero());
    match order {
        Order::ColMajor => add_mat_mat(a, b, c),
        Order::RowMajor => add_mat_mat(b.t(), a.t(), &mut c.t_mut()),
    }
}

/// `A * B` as a new matrix.
///
/// The result is row-major when both operands are, column-major otherwise.
///
/// # Errors
/// `ShapeMismatch` if the shapes do not chain.
pub fn matmul<T: Scalar>(a: MatrixView<'_, T>, b: MatrixView<'_, T>) -> Result<Matrix<T>> {
    let order = match (a.order(), b.order()) {
        (Order::RowMajor, Order::RowMajor) => Order::RowMajor,
        _ => Order::ColMajor,
    };
    let mut c = Matrix::zeros(a.nrows(), b.ncols(), order);
    matmul_into(a, b, &mut c.view_mut())?;
    Ok(c)
}

/// Inverse of `a` as a new matrix in `a`'s order.
///
/// # Errors
/// See [`calc_inverse`].
pub fn inverse<T: Field>(a: MatrixView<'_, T>) -> Result<Matrix<T>> {
    let mut out = a.to_matrix();
    calc_inverse(&mut out.view_mut())?;
    Ok(out)
}

fn reordered<T: Copy>(src: MatrixView<'_, T>, order: Order) -> Matrix<T> {
    Matrix::from_fn(src.nrows(), src.ncols(), order, |i, j| src.at(i, j))
}
