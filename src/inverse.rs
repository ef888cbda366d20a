//! In-place matrix inversion by Gauss-Jordan elimination with partial pivoting.

use num_traits::{NumCast, ToPrimitive, Zero};
use tracing::debug;

use crate::matrix::{Matrix, MatrixViewMut};
use crate::scalar::Field;
use crate::{Result, StridedError};

/// Relative pivot threshold.
///
/// A pivot is rejected when its modulus is below `SINGULAR_TOLERANCE` times the sum
/// of the moduli of the rest of its row.
pub const SINGULAR_TOLERANCE: f64 = 1e-20;

/// Invert a square matrix in place.
///
/// Works on any storage order and leading dimension, for real and complex
/// elements. Each step picks the largest-modulus candidate in the current column
/// as pivot and swaps it into place. The row swaps are undone on the columns at
/// the end.
///
/// # Errors
/// - `NonSquare` if the view is not square
/// - `Singular { column }` if no usable pivot exists in `column`
/// - `ScalarConversion` if the tolerance does not fit the element's real type
///
/// On error the contents of `a` are unspecified.
///
/// # Example
/// ```rust
/// use strided_blas::{calc_inverse, Matrix};
///
/// let mut a = Matrix::from_rows(&[[4.0f64, 7.0], [2.0, 6.0]]);
/// calc_inverse(&mut a.view_mut()).unwrap();
/// assert!((a[(0, 0)] - 0.6).abs() < 1e-12);
/// assert!((a[(1, 0)] + 0.2).abs() < 1e-12);
/// ```
pub fn calc_inverse<T: Field>(a: &mut MatrixViewMut<'_, T>) -> Result<()> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(StridedError::NonSquare { rows, cols });
    }
    let n = rows;
    let tol: T::Real = NumCast::from(SINGULAR_TOLERANCE).ok_or(StridedError::ScalarConversion)?;
    let zero = T::Real::zero();

    let mut perm: Vec<usize> = (0..n).collect();

    for j in 0..n {
        let (r, max) = (j..n)
            .map(|i| (i, a.get(i, j).modulus()))
            .fold((j, zero), |best, cand| if cand.1 > best.1 { cand } else { best });

        let rest = ((j + 1)..n).fold(zero, |acc, i| acc + a.get(r, i).modulus());
        // negated comparison also rejects a NaN pivot
        if !(max > zero) || max < tol * rest {
            debug!(
                column = j,
                pivot = max.to_f64().unwrap_or(f64::NAN),
                "singular pivot"
            );
            return Err(StridedError::Singular { column: j });
        }

        a.swap_rows(j, r);
        perm.swap(j, r);

        let hr = T::one() / a.get(j, j);
        for k in 0..n {
            let x = a.get(j, k);
            a.set(j, k, x * hr);
        }
        a.set(j, j, hr);

        for k in (0..n).filter(|&k| k != j) {
            let f = a.get(k, j);
            for c in 0..n {
                let x = a.get(k, c) - f * a.get(j, c);
                a.set(k, c, x);
            }
            a.set(k, j, -(f * hr));
        }
    }

    // column k of the result belongs at column perm[k]
    let mut scratch = vec![T::zero(); n];
    for i in 0..n {
        for k in 0..n {
            scratch[perm[k]] = a.get(i, k);
        }
        for (k, &x) in scratch.iter().enumerate() {
            a.set(i, k, x);
        }
    }
    Ok(())
}

impl<T: Field> Matrix<T> {
    /// The inverse as a new matrix in the same order.
    ///
    /// # Errors
    /// See [`calc_inverse`].
    pub fn inverse(&self) -> Result<Matrix<T>> {
        let mut out = self.clone();
        calc_inverse(&mut out.view_mut())?;
        Ok(out)
    }
}
