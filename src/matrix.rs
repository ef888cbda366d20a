//! Strided matrix views and the owning [`Matrix`].
//!
//! A view is `(ptr, rows, cols, dist, order)`. `dist` is the leading dimension: the
//! element distance between consecutive rows (row-major) or consecutive columns
//! (column-major). Sub-views keep the parent's `dist`, so they are generally not
//! contiguous.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{AddAssign, Index, IndexMut, MulAssign, SubAssign};

use num_traits::{One, Zero};

use crate::matexpr::{fmt_rows, MatExpr};
use crate::order::Order;
use crate::scalar::Scalar;
use crate::vector::{VectorView, VectorViewMut};
use crate::{Result, StridedError};

/// Validate a `rows x cols` view with leading dimension `dist` over `buf_len` elements.
fn validate_matrix(
    buf_len: usize,
    rows: usize,
    cols: usize,
    dist: usize,
    order: Order,
) -> Result<()> {
    let required = order.contiguous_len(rows, cols);
    if dist < required {
        return Err(StridedError::InvalidDistance { dist, required });
    }
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let (outer, inner) = match order {
        Order::RowMajor => (rows - 1, cols - 1),
        Order::ColMajor => (cols - 1, rows - 1),
    };
    let needed = outer
        .checked_mul(dist)
        .and_then(|off| off.checked_add(inner + 1))
        .ok_or(StridedError::OutOfBounds {
            required: usize::MAX,
            len: buf_len,
        })?;
    if needed > buf_len {
        return Err(StridedError::OutOfBounds {
            required: needed,
            len: buf_len,
        });
    }
    Ok(())
}

pub(crate) fn check_shape(expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected != found {
        return Err(StridedError::ShapeMismatch(
            vec![expected.0, expected.1],
            vec![found.0, found.1],
        ));
    }
    Ok(())
}

#[inline]
fn check_index(i: usize, j: usize, rows: usize, cols: usize) {
    assert!(
        i < rows && j < cols,
        "index ({i}, {j}) out of bounds for {rows}x{cols} matrix"
    );
}

#[inline]
fn check_range(first: usize, next: usize, len: usize, what: &str) {
    assert!(
        first <= next && next <= len,
        "{what} range {first}..{next} out of bounds for extent {len}"
    );
}

// ============================================================================
// MatrixView
// ============================================================================

/// Immutable strided matrix view.
///
/// # Example
/// ```rust
/// use strided_blas::{MatrixView, Order};
///
/// // 2x3 column-major
/// let data = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
/// let a = MatrixView::new(&data, 2, 3, Order::ColMajor).unwrap();
/// assert_eq!(a.get(1, 2), 6.0);
/// assert_eq!(a.t().get(2, 1), 6.0);
/// ```
pub struct MatrixView<'a, T> {
    ptr: *const T,
    rows: usize,
    cols: usize,
    dist: usize,
    order: Order,
    _marker: PhantomData<&'a [T]>,
}

unsafe impl<T: Sync> Send for MatrixView<'_, T> {}
unsafe impl<T: Sync> Sync for MatrixView<'_, T> {}

impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

impl<T> fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixView")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("dist", &self.dist)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, T> MatrixView<'a, T> {
    /// Densely packed view: `dist` is the contiguous extent for `order`.
    pub fn new(data: &'a [T], rows: usize, cols: usize, order: Order) -> Result<Self> {
        Self::with_dist(data, rows, cols, order.contiguous_len(rows, cols), order)
    }

    /// View with an explicit leading dimension.
    ///
    /// # Errors
    /// `InvalidDistance` if `dist` is shorter than the contiguous extent,
    /// `OutOfBounds` if the last element falls outside `data`.
    pub fn with_dist(
        data: &'a [T],
        rows: usize,
        cols: usize,
        dist: usize,
        order: Order,
    ) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, dist, order)?;
        Ok(Self {
            ptr: data.as_ptr(),
            rows,
            cols,
            dist,
            order,
            _marker: PhantomData,
        })
    }

    /// # Safety
    /// Every `ptr[order.index(i, j, dist)]` with `i < rows`, `j < cols` must be
    /// valid for reads during `'a`.
    #[inline]
    pub(crate) unsafe fn from_raw_parts(
        ptr: *const T,
        rows: usize,
        cols: usize,
        dist: usize,
        order: Order,
    ) -> Self {
        Self {
            ptr,
            rows,
            cols,
            dist,
            order,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Leading dimension.
    #[inline]
    pub fn dist(&self) -> usize {
        self.dist
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Row `i` as a vector view (stride 1 for row-major, `dist` for column-major).
    pub fn row(&self, i: usize) -> VectorView<'a, T> {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        unsafe {
            VectorView::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(i, 0, self.dist)),
                self.cols,
                self.order.col_stride(self.dist),
            )
        }
    }

    /// Column `j` as a vector view.
    pub fn col(&self, j: usize) -> VectorView<'a, T> {
        assert!(j < self.cols, "column {j} out of bounds for {} columns", self.cols);
        unsafe {
            VectorView::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(0, j, self.dist)),
                self.rows,
                self.order.row_stride(self.dist),
            )
        }
    }

    /// Main diagonal, stride `dist + 1`.
    pub fn diag(&self) -> VectorView<'a, T> {
        unsafe { VectorView::from_raw_parts(self.ptr, self.rows.min(self.cols), self.dist + 1) }
    }

    /// Rows `first..next`, same columns and leading dimension.
    pub fn rows(&self, first: usize, next: usize) -> MatrixView<'a, T> {
        check_range(first, next, self.rows, "row");
        unsafe {
            MatrixView::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(first, 0, self.dist)),
                next - first,
                self.cols,
                self.dist,
                self.order,
            )
        }
    }

    /// Columns `first..next`, same rows and leading dimension.
    pub fn cols(&self, first: usize, next: usize) -> MatrixView<'a, T> {
        check_range(first, next, self.cols, "column");
        unsafe {
            MatrixView::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(0, first, self.dist)),
                self.rows,
                next - first,
                self.dist,
                self.order,
            )
        }
    }

    /// Transposed view over the same buffer.
    #[inline]
    pub fn t(&self) -> MatrixView<'a, T> {
        unsafe {
            MatrixView::from_raw_parts(
                self.ptr,
                self.cols,
                self.rows,
                self.dist,
                self.order.transposed(),
            )
        }
    }
}

impl<'a, T: Copy> MatrixView<'a, T> {
    /// Element `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i >= rows` or `j >= cols`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        check_index(i, j, self.rows, self.cols);
        unsafe { *self.ptr.add(self.order.index(i, j, self.dist)) }
    }

    /// Element `(i, j)` without bounds checking.
    ///
    /// # Safety
    /// The caller must ensure `i < rows` and `j < cols`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        *self.ptr.add(self.order.index(i, j, self.dist))
    }

    /// Copy into an owning matrix with the same order.
    pub fn to_matrix(&self) -> Matrix<T> {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(rows * cols);
        match self.order {
            Order::RowMajor => {
                for i in 0..rows {
                    data.extend(self.row(i).iter());
                }
            }
            Order::ColMajor => {
                for j in 0..cols {
                    data.extend(self.col(j).iter());
                }
            }
        }
        Matrix {
            data,
            rows,
            cols,
            order: self.order,
        }
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        check_index(i, j, self.rows, self.cols);
        unsafe { &*self.ptr.add(self.order.index(i, j, self.dist)) }
    }
}

impl<T: Copy + fmt::Display> fmt::Display for MatrixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rows(f, self.rows, self.cols, |i, j| self.get(i, j))
    }
}

// ============================================================================
// MatrixViewMut
// ============================================================================

/// Mutable strided matrix view.
pub struct MatrixViewMut<'a, T> {
    ptr: *mut T,
    rows: usize,
    cols: usize,
    dist: usize,
    order: Order,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for MatrixViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for MatrixViewMut<'_, T> {}

impl<T> fmt::Debug for MatrixViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixViewMut")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("dist", &self.dist)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub fn new(data: &'a mut [T], rows: usize, cols: usize, order: Order) -> Result<Self> {
        let dist = order.contiguous_len(rows, cols);
        Self::with_dist(data, rows, cols, dist, order)
    }

    /// Mutable view with an explicit leading dimension.
    ///
    /// # Errors
    /// `InvalidDistance` if `dist` is shorter than the contiguous extent,
    /// `OutOfBounds` if the last element falls outside `data`.
    pub fn with_dist(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        dist: usize,
        order: Order,
    ) -> Result<Self> {
        validate_matrix(data.len(), rows, cols, dist, order)?;
        Ok(Self {
            ptr: data.as_mut_ptr(),
            rows,
            cols,
            dist,
            order,
            _marker: PhantomData,
        })
    }

    /// # Safety
    /// Every addressed element must be valid for reads and writes during `'a`
    /// and not reachable through any other live reference.
    #[inline]
    pub(crate) unsafe fn from_raw_parts(
        ptr: *mut T,
        rows: usize,
        cols: usize,
        dist: usize,
        order: Order,
    ) -> Self {
        Self {
            ptr,
            rows,
            cols,
            dist,
            order,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dist(&self) -> usize {
        self.dist
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    #[inline]
    pub fn as_view(&self) -> MatrixView<'_, T> {
        unsafe { MatrixView::from_raw_parts(self.ptr, self.rows, self.cols, self.dist, self.order) }
    }

    /// Reborrow with a shorter lifetime.
    #[inline]
    pub fn rb_mut(&mut self) -> MatrixViewMut<'_, T> {
        unsafe {
            MatrixViewMut::from_raw_parts(self.ptr, self.rows, self.cols, self.dist, self.order)
        }
    }

    pub fn row_mut(&mut self, i: usize) -> VectorViewMut<'_, T> {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        unsafe {
            VectorViewMut::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(i, 0, self.dist)),
                self.cols,
                self.order.col_stride(self.dist),
            )
        }
    }

    pub fn col_mut(&mut self, j: usize) -> VectorViewMut<'_, T> {
        assert!(j < self.cols, "column {j} out of bounds for {} columns", self.cols);
        unsafe {
            VectorViewMut::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(0, j, self.dist)),
                self.rows,
                self.order.row_stride(self.dist),
            )
        }
    }

    pub fn diag_mut(&mut self) -> VectorViewMut<'_, T> {
        unsafe {
            VectorViewMut::from_raw_parts(self.ptr, self.rows.min(self.cols), self.dist + 1)
        }
    }

    pub fn rows_mut(&mut self, first: usize, next: usize) -> MatrixViewMut<'_, T> {
        self.rb_mut().into_rows(first, next)
    }

    pub fn cols_mut(&mut self, first: usize, next: usize) -> MatrixViewMut<'_, T> {
        self.rb_mut().into_cols(first, next)
    }

    /// Consuming form of [`rows_mut`](Self::rows_mut).
    pub fn into_rows(self, first: usize, next: usize) -> MatrixViewMut<'a, T> {
        check_range(first, next, self.rows, "row");
        unsafe {
            MatrixViewMut::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(first, 0, self.dist)),
                next - first,
                self.cols,
                self.dist,
                self.order,
            )
        }
    }

    /// Consuming form of [`cols_mut`](Self::cols_mut).
    pub fn into_cols(self, first: usize, next: usize) -> MatrixViewMut<'a, T> {
        check_range(first, next, self.cols, "column");
        unsafe {
            MatrixViewMut::from_raw_parts(
                self.ptr.wrapping_add(self.order.index(0, first, self.dist)),
                self.rows,
                next - first,
                self.dist,
                self.order,
            )
        }
    }

    /// Mutable transposed view over the same buffer.
    pub fn t_mut(&mut self) -> MatrixViewMut<'_, T> {
        self.rb_mut().into_t()
    }

    /// Consuming form of [`t_mut`](Self::t_mut).
    pub fn into_t(self) -> MatrixViewMut<'a, T> {
        unsafe {
            MatrixViewMut::from_raw_parts(
                self.ptr,
                self.cols,
                self.rows,
                self.dist,
                self.order.transposed(),
            )
        }
    }

    /// Split into rows `0..mid` and `mid..rows`.
    ///
    /// The halves address disjoint elements, so they can be handed to different
    /// threads.
    ///
    /// # Panics
    /// Panics if `mid > rows`.
    pub fn split_rows_at(self, mid: usize) -> (MatrixViewMut<'a, T>, MatrixViewMut<'a, T>) {
        assert!(mid <= self.rows, "split row {mid} out of bounds for {} rows", self.rows);
        let offset = self.order.index(mid, 0, self.dist);
        unsafe {
            (
                MatrixViewMut::from_raw_parts(self.ptr, mid, self.cols, self.dist, self.order),
                MatrixViewMut::from_raw_parts(
                    self.ptr.wrapping_add(offset),
                    self.rows - mid,
                    self.cols,
                    self.dist,
                    self.order,
                ),
            )
        }
    }

    /// # Safety
    /// The caller must ensure `i < rows` and `j < cols`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut *self.ptr.add(self.order.index(i, j, self.dist))
    }

    /// Mutable reference to element `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i >= rows` or `j >= cols`.
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        check_index(i, j, self.rows, self.cols);
        unsafe { self.get_unchecked_mut(i, j) }
    }

    /// Exchange rows `a` and `b` across all columns.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(
            a < self.rows && b < self.rows,
            "row swap ({a}, {b}) out of bounds for {} rows",
            self.rows
        );
        if a == b {
            return;
        }
        for j in 0..self.cols {
            let pa = self.ptr.wrapping_add(self.order.index(a, j, self.dist));
            let pb = self.ptr.wrapping_add(self.order.index(b, j, self.dist));
            unsafe { std::ptr::swap(pa, pb) };
        }
    }

    /// Visit every element in storage order.
    #[inline]
    fn for_each_index(&self, mut f: impl FnMut(usize, usize)) {
        match self.order {
            Order::RowMajor => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        f(i, j);
                    }
                }
            }
            Order::ColMajor => {
                for j in 0..self.cols {
                    for i in 0..self.rows {
                        f(i, j);
                    }
                }
            }
        }
    }
}

impl<'a, T: Copy> MatrixViewMut<'a, T> {
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        check_index(i, j, self.rows, self.cols);
        unsafe { *self.ptr.add(self.order.index(i, j, self.dist)) }
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        *self.get_mut(i, j) = value;
    }

    pub fn fill(&mut self, value: T) {
        let ptr = self.ptr;
        let (order, dist) = (self.order, self.dist);
        self.for_each_index(|i, j| unsafe { *ptr.add(order.index(i, j, dist)) = value });
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        self.as_view().to_matrix()
    }
}

impl<'a, T: Scalar> MatrixViewMut<'a, T> {
    /// Evaluate `expr` into this view: `self(i, j) = expr(i, j)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn assign<E: MatExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_shape(self.shape(), expr.shape())?;
        let ptr = self.ptr;
        let (order, dist) = (self.order, self.dist);
        self.for_each_index(|i, j| unsafe { *ptr.add(order.index(i, j, dist)) = expr.at(i, j) });
        Ok(())
    }

    /// `self(i, j) += expr(i, j)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn add_assign_expr<E: MatExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_shape(self.shape(), expr.shape())?;
        let ptr = self.ptr;
        let (order, dist) = (self.order, self.dist);
        self.for_each_index(|i, j| unsafe {
            let dst = ptr.add(order.index(i, j, dist));
            *dst = *dst + expr.at(i, j);
        });
        Ok(())
    }

    /// `self(i, j) -= expr(i, j)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn sub_assign_expr<E: MatExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_shape(self.shape(), expr.shape())?;
        let ptr = self.ptr;
        let (order, dist) = (self.order, self.dist);
        self.for_each_index(|i, j| unsafe {
            let dst = ptr.add(order.index(i, j, dist));
            *dst = *dst - expr.at(i, j);
        });
        Ok(())
    }

    pub fn scale(&mut self, alpha: T) {
        let ptr = self.ptr;
        let (order, dist) = (self.order, self.dist);
        self.for_each_index(|i, j| unsafe {
            let dst = ptr.add(order.index(i, j, dist));
            *dst = *dst * alpha;
        });
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        check_index(i, j, self.rows, self.cols);
        unsafe { &*self.ptr.add(self.order.index(i, j, self.dist)) }
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        self.get_mut(i, j)
    }
}

impl<T: Scalar, E: MatExpr<Elem = T>> AddAssign<E> for MatrixViewMut<'_, T> {
    /// # Panics
    /// Panics if the shapes differ.
    fn add_assign(&mut self, expr: E) {
        if let Err(e) = self.add_assign_expr(expr) {
            panic!("{e}");
        }
    }
}

impl<T: Scalar, E: MatExpr<Elem = T>> SubAssign<E> for MatrixViewMut<'_, T> {
    /// # Panics
    /// Panics if the shapes differ.
    fn sub_assign(&mut self, expr: E) {
        if let Err(e) = self.sub_assign_expr(expr) {
            panic!("{e}");
        }
    }
}

impl<T: Scalar> MulAssign<T> for MatrixViewMut<'_, T> {
    fn mul_assign(&mut self, alpha: T) {
        self.scale(alpha);
    }
}

impl<T: Copy + fmt::Display> fmt::Display for MatrixViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rows(f, self.rows, self.cols, |i, j| self.get(i, j))
    }
}

// ============================================================================
// Matrix
// ============================================================================

/// Owning dense matrix with a fixed storage order.
///
/// The leading dimension always equals the contiguous extent (`cols` for
/// row-major, `rows` for column-major).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    order: Order,
}

impl<T: Zero + Clone> Matrix<T> {
    /// Zero-filled row-major matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::zeros(rows, cols, Order::RowMajor)
    }

    /// Zero-filled matrix in the given order.
    pub fn zeros(rows: usize, cols: usize, order: Order) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
            order,
        }
    }
}

impl<T: Zero + One + Clone> Matrix<T> {
    /// Row-major `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }
}

impl<T> Matrix<T> {
    /// Wrap an existing buffer laid out densely in `order`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize, order: Order) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(StridedError::ShapeMismatch(
                vec![rows * cols],
                vec![data.len()],
            ));
        }
        Ok(Self {
            data,
            rows,
            cols,
            order,
        })
    }

    /// Build a matrix in `order` from `f(i, j)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        order: Order,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        match order {
            Order::RowMajor => {
                for i in 0..rows {
                    for j in 0..cols {
                        data.push(f(i, j));
                    }
                }
            }
            Order::ColMajor => {
                for j in 0..cols {
                    for i in 0..rows {
                        data.push(f(i, j));
                    }
                }
            }
        }
        Self {
            data,
            rows,
            cols,
            order,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn dist(&self) -> usize {
        self.order.contiguous_len(self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn view(&self) -> MatrixView<'_, T> {
        unsafe {
            MatrixView::from_raw_parts(
                self.data.as_ptr(),
                self.rows,
                self.cols,
                self.dist(),
                self.order,
            )
        }
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        let dist = self.dist();
        unsafe {
            MatrixViewMut::from_raw_parts(
                self.data.as_mut_ptr(),
                self.rows,
                self.cols,
                dist,
                self.order,
            )
        }
    }

    /// Transposed view, no copy.
    pub fn t(&self) -> MatrixView<'_, T> {
        self.view().t()
    }

    pub fn row(&self, i: usize) -> VectorView<'_, T> {
        self.view().row(i)
    }

    pub fn col(&self, j: usize) -> VectorView<'_, T> {
        self.view().col(j)
    }

    pub fn diag(&self) -> VectorView<'_, T> {
        self.view().diag()
    }

    pub fn rows(&self, first: usize, next: usize) -> MatrixView<'_, T> {
        self.view().rows(first, next)
    }

    pub fn cols(&self, first: usize, next: usize) -> MatrixView<'_, T> {
        self.view().cols(first, next)
    }
}

impl<T: Copy> Matrix<T> {
    /// Row-major matrix from nested arrays.
    ///
    /// ```rust
    /// use strided_blas::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 0)], 4);
    /// ```
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols: C,
            order: Order::RowMajor,
        }
    }

    /// Materialize a matrix expression in `order`.
    pub fn from_expr<E: MatExpr<Elem = T>>(expr: E, order: Order) -> Self {
        let (rows, cols) = expr.shape();
        Self::from_fn(rows, cols, order, |i, j| expr.at(i, j))
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.view().get(i, j)
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Scalar> Matrix<T> {
    /// Evaluate `expr` into this matrix.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn assign<E: MatExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        self.view_mut().assign(expr)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        check_index(i, j, self.rows, self.cols);
        &self.data[self.order.index(i, j, self.dist())]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        check_index(i, j, self.rows, self.cols);
        let idx = self.order.index(i, j, self.dist());
        &mut self.data[idx]
    }
}

impl<T: Scalar, E: MatExpr<Elem = T>> AddAssign<E> for Matrix<T> {
    fn add_assign(&mut self, expr: E) {
        let mut view = self.view_mut();
        view += expr;
    }
}

impl<T: Scalar, E: MatExpr<Elem = T>> SubAssign<E> for Matrix<T> {
    fn sub_assign(&mut self, expr: E) {
        let mut view = self.view_mut();
        view -= expr;
    }
}

impl<T: Scalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, alpha: T) {
        for x in self.data.iter_mut() {
            *x = *x * alpha;
        }
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}
