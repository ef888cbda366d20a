//! Storage order of matrix buffers.
//!
//! A matrix view maps `(i, j)` to a linear offset through its order and its
//! leading dimension (`dist`):
//!
//! ```text
//! RowMajor: i * dist + j
//! ColMajor: j * dist + i
//! ```

/// Physical layout of a rank-2 buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// C-style: rows are contiguous.
    #[default]
    RowMajor,
    /// Fortran-style: columns are contiguous.
    ColMajor,
}

impl Order {
    /// Linear offset of element `(i, j)` for leading dimension `dist`.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, dist: usize) -> usize {
        match self {
            Order::RowMajor => i * dist + j,
            Order::ColMajor => j * dist + i,
        }
    }

    /// The order of the transposed view over the same buffer.
    #[inline]
    pub fn transposed(self) -> Order {
        match self {
            Order::RowMajor => Order::ColMajor,
            Order::ColMajor => Order::RowMajor,
        }
    }

    /// Length of the contiguous dimension of a `rows x cols` matrix.
    ///
    /// This is both the leading dimension of a densely packed buffer and the
    /// lower bound on `dist` for any view.
    #[inline]
    pub fn contiguous_len(self, rows: usize, cols: usize) -> usize {
        match self {
            Order::RowMajor => cols,
            Order::ColMajor => rows,
        }
    }

    /// Element distance between `(i, j)` and `(i + 1, j)`.
    #[inline]
    pub fn row_stride(self, dist: usize) -> usize {
        match self {
            Order::RowMajor => dist,
            Order::ColMajor => 1,
        }
    }

    /// Element distance between `(i, j)` and `(i, j + 1)`.
    #[inline]
    pub fn col_stride(self, dist: usize) -> usize {
        match self {
            Order::RowMajor => 1,
            Order::ColMajor => dist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_row_major() {
        // 3x4 row-major, dist = 4: (1, 2) -> 1*4 + 2
        assert_eq!(Order::RowMajor.index(1, 2, 4), 6);
        assert_eq!(Order::RowMajor.index(0, 0, 4), 0);
    }

    #[test]
    fn test_index_col_major() {
        // 3x4 col-major, dist = 3: (1, 2) -> 2*3 + 1
        assert_eq!(Order::ColMajor.index(1, 2, 3), 7);
    }

    #[test]
    fn test_transposed_roundtrip() {
        assert_eq!(Order::RowMajor.transposed(), Order::ColMajor);
        assert_eq!(Order::RowMajor.transposed().transposed(), Order::RowMajor);
    }

    #[test]
    fn test_strides_match_index() {
        for order in [Order::RowMajor, Order::ColMajor] {
            let dist = 7;
            let base = order.index(2, 3, dist);
            assert_eq!(order.index(3, 3, dist) - base, order.row_stride(dist));
            assert_eq!(order.index(2, 4, dist) - base, order.col_stride(dist));
        }
    }

    #[test]
    fn test_contiguous_len() {
        assert_eq!(Order::RowMajor.contiguous_len(3, 5), 5);
        assert_eq!(Order::ColMajor.contiguous_len(3, 5), 3);
    }
}
