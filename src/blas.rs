//! Descriptors for handing views to an external BLAS/LAPACK library.
//!
//! The crate never links a vendor library itself. These types carry exactly what
//! such a library asks for: base pointer, shape, leading dimension and
//! transpose flag.

use std::fmt;

use crate::matrix::{MatrixView, MatrixViewMut};
use crate::order::Order;
use crate::vector::{VectorView, VectorViewMut};

/// BLAS transpose flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlasTranspose {
    /// `'N'`
    NoTrans,
    /// `'T'`
    Trans,
    /// `'C'`
    ConjTrans,
}

impl BlasTranspose {
    /// The single-character flag expected by Fortran-style interfaces.
    pub fn as_char(self) -> u8 {
        match self {
            BlasTranspose::NoTrans => b'N',
            BlasTranspose::Trans => b'T',
            BlasTranspose::ConjTrans => b'C',
        }
    }
}

/// Matrix as seen by a BLAS routine.
pub struct BlasMatrix<T> {
    pub ptr: *const T,
    pub rows: usize,
    pub cols: usize,
    /// Leading dimension.
    pub ld: usize,
    pub order: Order,
}

impl<T> Clone for BlasMatrix<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BlasMatrix<T> {}

impl<T> fmt::Debug for BlasMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlasMatrix")
            .field("ptr", &self.ptr)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("ld", &self.ld)
            .field("order", &self.order)
            .finish()
    }
}

impl<T> BlasMatrix<T> {
    /// Normalize for a column-major library.
    ///
    /// A row-major `rows x cols` matrix is the same memory as a column-major
    /// `cols x rows` matrix, so it is returned as that transpose together with
    /// [`BlasTranspose::Trans`].
    pub fn to_col_major(self) -> (BlasMatrix<T>, BlasTranspose) {
        match self.order {
            Order::ColMajor => (self, BlasTranspose::NoTrans),
            Order::RowMajor => (
                BlasMatrix {
                    rows: self.cols,
                    cols: self.rows,
                    order: Order::ColMajor,
                    ..self
                },
                BlasTranspose::Trans,
            ),
        }
    }

    /// BLAS requires `ld >= max(1, contiguous extent)`.
    pub fn is_valid(&self) -> bool {
        self.ld >= self.order.contiguous_len(self.rows, self.cols).max(1)
    }
}

/// Vector as seen by a BLAS routine.
pub struct BlasVector<T> {
    pub ptr: *const T,
    pub len: usize,
    /// Increment between consecutive elements.
    pub inc: usize,
}

impl<T> Clone for BlasVector<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BlasVector<T> {}

impl<T> fmt::Debug for BlasVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlasVector")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("inc", &self.inc)
            .finish()
    }
}

impl<T> MatrixView<'_, T> {
    /// Descriptor for an external BLAS call.
    pub fn as_blas(&self) -> BlasMatrix<T> {
        BlasMatrix {
            ptr: self.as_ptr(),
            rows: self.nrows(),
            cols: self.ncols(),
            ld: self.dist().max(1),
            order: self.order(),
        }
    }
}

impl<T> MatrixViewMut<'_, T> {
    /// Descriptor for an external BLAS call. The pointer may be written through
    /// while this view is borrowed.
    pub fn as_blas(&mut self) -> BlasMatrix<T> {
        self.as_view().as_blas()
    }
}

impl<T> VectorView<'_, T> {
    pub fn as_blas(&self) -> BlasVector<T> {
        BlasVector {
            ptr: self.as_ptr(),
            len: self.len(),
            inc: self.stride(),
        }
    }
}

impl<T> VectorViewMut<'_, T> {
    pub fn as_blas(&mut self) -> BlasVector<T> {
        self.as_view().as_blas()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, Vector};

    #[test]
    fn test_col_major_passthrough() {
        let m = Matrix::<f64>::zeros(3, 5, Order::ColMajor);
        let (desc, trans) = m.view().as_blas().to_col_major();
        assert_eq!(trans, BlasTranspose::NoTrans);
        assert_eq!((desc.rows, desc.cols, desc.ld), (3, 5, 3));
        assert_eq!(desc.ptr, m.as_slice().as_ptr());
        assert!(desc.is_valid());
    }

    #[test]
    fn test_row_major_becomes_transpose() {
        let m = Matrix::<f64>::zeros(3, 5, Order::RowMajor);
        let (desc, trans) = m.view().as_blas().to_col_major();
        assert_eq!(trans, BlasTranspose::Trans);
        assert_eq!(trans.as_char(), b'T');
        assert_eq!((desc.rows, desc.cols, desc.ld), (5, 3, 5));
        assert_eq!(desc.order, Order::ColMajor);
        assert!(desc.is_valid());
    }

    #[test]
    fn test_transposed_view_needs_no_flag() {
        // the transpose of a row-major matrix is already column-major
        let m = Matrix::<f64>::zeros(3, 5, Order::RowMajor);
        let (desc, trans) = m.t().as_blas().to_col_major();
        assert_eq!(trans, BlasTranspose::NoTrans);
        assert_eq!((desc.rows, desc.cols, desc.ld), (5, 3, 5));
    }

    #[test]
    fn test_sub_view_keeps_leading_dimension() {
        let m = Matrix::<f64>::zeros(6, 6, Order::ColMajor);
        let sub = m.rows(2, 4).cols(1, 3);
        let desc = sub.as_blas();
        assert_eq!((desc.rows, desc.cols, desc.ld), (2, 2, 6));
        // (2, 1) in column-major with ld 6
        assert_eq!(desc.ptr, m.as_slice()[8..].as_ptr());
    }

    #[test]
    fn test_empty_matrix_ld_is_one() {
        let m = Matrix::<f64>::zeros(0, 4, Order::ColMajor);
        let desc = m.view().as_blas();
        assert_eq!(desc.ld, 1);
        assert!(desc.is_valid());
    }

    #[test]
    fn test_vector_increment() {
        let x: Vector<f64> = (0..10).map(|i| i as f64).collect();
        let desc = x.slice(1, 3).as_blas();
        assert_eq!(desc.len, 3);
        assert_eq!(desc.inc, 3);
        assert_eq!(desc.ptr, x.as_slice()[1..].as_ptr());

        let m = Matrix::<f64>::zeros(4, 3, Order::RowMajor);
        assert_eq!(m.col(0).as_blas().inc, 3);
    }
}
