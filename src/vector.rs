//! Strided vector views and owning vectors.
//!
//! - [`VectorView`]: immutable `(ptr, len, stride)` window, `Copy`
//! - [`VectorViewMut`]: unique mutable window, reborrowable
//! - [`Vector`]: heap-owned, stride 1
//! - [`FixedVector`]: stack-owned, length fixed at compile time
//!
//! Element `i` of a view lives at `ptr[i * stride]`. The lifetime parameter ties
//! every view to the buffer it was cut from, so a view can never outlive it.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{AddAssign, Index, IndexMut, MulAssign, SubAssign};

use num_traits::Zero;

use crate::matrix::MatrixView;
use crate::order::Order;
use crate::scalar::Scalar;
use crate::vecexpr::{fmt_elements, VecExpr};
use crate::{Result, StridedError};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that `len` elements with `stride` fit into a buffer of `buf_len`.
fn validate_bounds(buf_len: usize, len: usize, stride: usize) -> Result<()> {
    if stride == 0 {
        return Err(StridedError::ZeroStride);
    }
    if len == 0 {
        return Ok(());
    }
    let required = (len - 1)
        .checked_mul(stride)
        .and_then(|last| last.checked_add(1))
        .ok_or(StridedError::OutOfBounds {
            required: usize::MAX,
            len: buf_len,
        })?;
    if required > buf_len {
        return Err(StridedError::OutOfBounds {
            required,
            len: buf_len,
        });
    }
    Ok(())
}

/// Shape check shared by every vector assignment.
pub(crate) fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(StridedError::ShapeMismatch(vec![expected], vec![found]));
    }
    Ok(())
}

/// Number of elements of `slice(first, step)` over a vector of length `len`.
///
/// `len / step`, clamped so the last element stays inside the parent.
#[inline]
fn slice_len(len: usize, first: usize, step: usize) -> usize {
    assert!(step > 0, "slice step must be positive");
    assert!(first <= len, "slice start {first} out of bounds for length {len}");
    (len / step).min((len - first).div_ceil(step))
}

#[inline]
fn check_range(first: usize, next: usize, len: usize) {
    assert!(
        first <= next && next <= len,
        "range {first}..{next} out of bounds for length {len}"
    );
}

// ============================================================================
// VectorView
// ============================================================================

/// Immutable strided vector view.
///
/// # Example
/// ```rust
/// use strided_blas::VectorView;
///
/// let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let evens = VectorView::from_slice(&data, 3, 2).unwrap();
/// assert_eq!(evens.to_vec(), vec![0.0, 2.0, 4.0]);
/// ```
pub struct VectorView<'a, T> {
    ptr: *const T,
    len: usize,
    stride: usize,
    _marker: PhantomData<&'a [T]>,
}

unsafe impl<T: Sync> Send for VectorView<'_, T> {}
unsafe impl<T: Sync> Sync for VectorView<'_, T> {}

impl<T> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorView<'_, T> {}

impl<T> fmt::Debug for VectorView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorView")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<'a, T> VectorView<'a, T> {
    /// View over a whole contiguous slice.
    pub fn new(data: &'a [T]) -> Self {
        Self {
            ptr: data.as_ptr(),
            len: data.len(),
            stride: 1,
            _marker: PhantomData,
        }
    }

    /// View over `len` elements of `data`, `stride` apart.
    ///
    /// # Errors
    /// `ZeroStride` for a zero stride, `OutOfBounds` if the last element falls
    /// outside `data`.
    pub fn from_slice(data: &'a [T], len: usize, stride: usize) -> Result<Self> {
        validate_bounds(data.len(), len, stride)?;
        Ok(Self {
            ptr: data.as_ptr(),
            len,
            stride,
            _marker: PhantomData,
        })
    }

    /// # Safety
    /// `ptr[i * stride]` must be valid for reads for all `i < len` during `'a`.
    #[inline]
    pub(crate) unsafe fn from_raw_parts(ptr: *const T, len: usize, stride: usize) -> Self {
        Self {
            ptr,
            len,
            stride: stride.max(1),
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance in elements between consecutive entries.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pointer to element 0.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Sub-view over `first..next` with the same stride.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len`.
    pub fn range(&self, first: usize, next: usize) -> VectorView<'a, T> {
        check_range(first, next, self.len);
        unsafe {
            VectorView::from_raw_parts(
                self.ptr.wrapping_add(first * self.stride),
                next - first,
                self.stride,
            )
        }
    }

    /// Every `step`-th element starting at `first`.
    ///
    /// The result has `len / step` elements (fewer if that would run past the end).
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len`.
    pub fn slice(&self, first: usize, step: usize) -> VectorView<'a, T> {
        let len = slice_len(self.len, first, step);
        unsafe {
            VectorView::from_raw_parts(
                self.ptr.wrapping_add(first * self.stride),
                len,
                self.stride * step,
            )
        }
    }

    /// Reinterpret a contiguous vector as a row-major `rows x cols` matrix.
    ///
    /// # Errors
    /// `ShapeMismatch` if the vector is strided, `OutOfBounds` if it holds fewer
    /// than `rows * cols` elements.
    pub fn as_matrix(&self, rows: usize, cols: usize) -> Result<MatrixView<'a, T>> {
        if self.stride != 1 && self.len > 1 {
            return Err(StridedError::ShapeMismatch(
                vec![self.len, 1],
                vec![self.len, self.stride],
            ));
        }
        let needed = rows
            .checked_mul(cols)
            .ok_or(StridedError::OutOfBounds {
                required: usize::MAX,
                len: self.len,
            })?;
        if needed > self.len {
            return Err(StridedError::OutOfBounds {
                required: needed,
                len: self.len,
            });
        }
        Ok(unsafe { MatrixView::from_raw_parts(self.ptr, rows, cols, cols, Order::RowMajor) })
    }
}

impl<'a, T: Copy> VectorView<'a, T> {
    /// Element `i`.
    ///
    /// # Panics
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { *self.ptr.add(i * self.stride) }
    }

    /// Element `i` without bounds checking.
    ///
    /// # Safety
    /// The caller must ensure `i < len`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        *self.ptr.add(i * self.stride)
    }

    /// Iterate over the elements by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let view = *self;
        (0..view.len).map(move |i| unsafe { view.get_unchecked(i) })
    }

    /// Copy the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<'a, T> From<&'a [T]> for VectorView<'a, T> {
    fn from(data: &'a [T]) -> Self {
        VectorView::new(data)
    }
}

impl<T> Index<usize> for VectorView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { &*self.ptr.add(i * self.stride) }
    }
}

impl<T: Copy + fmt::Display> fmt::Display for VectorView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_elements(f, self.iter())
    }
}

// ============================================================================
// VectorViewMut
// ============================================================================

/// Mutable strided vector view.
///
/// Assignment (`assign`, `+=`, `-=`, `*=`) is the point where lazy vector
/// expressions get evaluated, one element at a time.
pub struct VectorViewMut<'a, T> {
    ptr: *mut T,
    len: usize,
    stride: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for VectorViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for VectorViewMut<'_, T> {}

impl<T> fmt::Debug for VectorViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorViewMut")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<'a, T> VectorViewMut<'a, T> {
    /// Mutable view over a whole contiguous slice.
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            stride: 1,
            _marker: PhantomData,
        }
    }

    /// Mutable view over `len` elements of `data`, `stride` apart.
    ///
    /// # Errors
    /// `ZeroStride` for a zero stride, `OutOfBounds` if the last element falls
    /// outside `data`.
    pub fn from_slice(data: &'a mut [T], len: usize, stride: usize) -> Result<Self> {
        validate_bounds(data.len(), len, stride)?;
        Ok(Self {
            ptr: data.as_mut_ptr(),
            len,
            stride,
            _marker: PhantomData,
        })
    }

    /// # Safety
    /// `ptr[i * stride]` must be valid for reads and writes for all `i < len`
    /// during `'a`, and not reachable through any other live reference.
    #[inline]
    pub(crate) unsafe fn from_raw_parts(ptr: *mut T, len: usize, stride: usize) -> Self {
        Self {
            ptr,
            len,
            stride: stride.max(1),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Immutable view of the same elements.
    #[inline]
    pub fn as_view(&self) -> VectorView<'_, T> {
        unsafe { VectorView::from_raw_parts(self.ptr, self.len, self.stride) }
    }

    /// Reborrow with a shorter lifetime.
    #[inline]
    pub fn rb_mut(&mut self) -> VectorViewMut<'_, T> {
        unsafe { VectorViewMut::from_raw_parts(self.ptr, self.len, self.stride) }
    }

    /// Mutable sub-view over `first..next`.
    ///
    /// # Panics
    /// Panics unless `first <= next <= len`.
    pub fn range_mut(&mut self, first: usize, next: usize) -> VectorViewMut<'_, T> {
        self.rb_mut().into_range(first, next)
    }

    /// Consuming form of [`range_mut`](Self::range_mut).
    pub fn into_range(self, first: usize, next: usize) -> VectorViewMut<'a, T> {
        check_range(first, next, self.len);
        unsafe {
            VectorViewMut::from_raw_parts(
                self.ptr.wrapping_add(first * self.stride),
                next - first,
                self.stride,
            )
        }
    }

    /// Mutable view of every `step`-th element starting at `first`.
    ///
    /// # Panics
    /// Panics if `step == 0` or `first > len`.
    pub fn slice_mut(&mut self, first: usize, step: usize) -> VectorViewMut<'_, T> {
        self.rb_mut().into_slice(first, step)
    }

    /// Consuming form of [`slice_mut`](Self::slice_mut).
    pub fn into_slice(self, first: usize, step: usize) -> VectorViewMut<'a, T> {
        let len = slice_len(self.len, first, step);
        unsafe {
            VectorViewMut::from_raw_parts(
                self.ptr.wrapping_add(first * self.stride),
                len,
                self.stride * step,
            )
        }
    }

    /// Split into the disjoint views `0..mid` and `mid..len`.
    ///
    /// # Panics
    /// Panics if `mid > len`.
    pub fn split_at(self, mid: usize) -> (VectorViewMut<'a, T>, VectorViewMut<'a, T>) {
        assert!(mid <= self.len, "split point {mid} out of bounds for length {}", self.len);
        unsafe {
            (
                VectorViewMut::from_raw_parts(self.ptr, mid, self.stride),
                VectorViewMut::from_raw_parts(
                    self.ptr.wrapping_add(mid * self.stride),
                    self.len - mid,
                    self.stride,
                ),
            )
        }
    }
}

impl<'a, T: Copy> VectorViewMut<'a, T> {
    /// Element `i`.
    ///
    /// # Panics
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { *self.ptr.add(i * self.stride) }
    }

    /// Overwrite element `i`.
    ///
    /// # Panics
    /// Panics if `i >= len`.
    #[inline]
    pub fn set(&mut self, i: usize, value: T) {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { *self.ptr.add(i * self.stride) = value }
    }

    /// # Safety
    /// The caller must ensure `i < len`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T {
        debug_assert!(i < self.len);
        &mut *self.ptr.add(i * self.stride)
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        for i in 0..self.len {
            unsafe { *self.get_unchecked_mut(i) = value };
        }
    }

    /// Copy `src` element by element.
    ///
    /// # Errors
    /// `ShapeMismatch` if the lengths differ.
    pub fn copy_from_slice(&mut self, src: &[T]) -> Result<()> {
        check_len(self.len, src.len())?;
        for (i, &v) in src.iter().enumerate() {
            unsafe { *self.get_unchecked_mut(i) = v };
        }
        Ok(())
    }

    /// Copy the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_view().to_vec()
    }
}

impl<'a, T: Scalar> VectorViewMut<'a, T> {
    /// Evaluate `expr` into this view: `self(i) = expr(i)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the lengths differ.
    pub fn assign<E: VecExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_len(self.len, expr.len())?;
        for i in 0..self.len {
            unsafe { *self.get_unchecked_mut(i) = expr.at(i) };
        }
        Ok(())
    }

    /// `self(i) += expr(i)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the lengths differ.
    pub fn add_assign_expr<E: VecExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_len(self.len, expr.len())?;
        for i in 0..self.len {
            let dst = unsafe { self.get_unchecked_mut(i) };
            *dst = *dst + expr.at(i);
        }
        Ok(())
    }

    /// `self(i) -= expr(i)`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the lengths differ.
    pub fn sub_assign_expr<E: VecExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        check_len(self.len, expr.len())?;
        for i in 0..self.len {
            let dst = unsafe { self.get_unchecked_mut(i) };
            *dst = *dst - expr.at(i);
        }
        Ok(())
    }

    /// `self(i) *= alpha`.
    pub fn scale(&mut self, alpha: T) {
        for i in 0..self.len {
            let dst = unsafe { self.get_unchecked_mut(i) };
            *dst = *dst * alpha;
        }
    }
}

impl<'a, T> From<&'a mut [T]> for VectorViewMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        VectorViewMut::new(data)
    }
}

impl<T> Index<usize> for VectorViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { &*self.ptr.add(i * self.stride) }
    }
}

impl<T> IndexMut<usize> for VectorViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < self.len, "index {i} out of bounds for length {}", self.len);
        unsafe { &mut *self.ptr.add(i * self.stride) }
    }
}

impl<T: Scalar, E: VecExpr<Elem = T>> AddAssign<E> for VectorViewMut<'_, T> {
    /// # Panics
    /// Panics if the lengths differ.
    fn add_assign(&mut self, expr: E) {
        if let Err(e) = self.add_assign_expr(expr) {
            panic!("{e}");
        }
    }
}

impl<T: Scalar, E: VecExpr<Elem = T>> SubAssign<E> for VectorViewMut<'_, T> {
    /// # Panics
    /// Panics if the lengths differ.
    fn sub_assign(&mut self, expr: E) {
        if let Err(e) = self.sub_assign_expr(expr) {
            panic!("{e}");
        }
    }
}

impl<T: Scalar> MulAssign<T> for VectorViewMut<'_, T> {
    fn mul_assign(&mut self, alpha: T) {
        self.scale(alpha);
    }
}

impl<T: Copy + fmt::Display> fmt::Display for VectorViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_elements(f, self.as_view().iter())
    }
}

// ============================================================================
// Vector
// ============================================================================

/// Heap-owned vector with stride 1.
///
/// The buffer is allocated once at construction and released once on drop.
/// `Clone` produces an independent copy; [`take`](Vector::take) moves the buffer
/// out and leaves an empty vector behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Zero + Clone> Vector<T> {
    /// Zero-initialized vector of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }
}

impl<T> Vector<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Give up ownership of the buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Move the buffer into a new vector, leaving `self` empty.
    pub fn take(&mut self) -> Vector<T> {
        Vector {
            data: std::mem::take(&mut self.data),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn view(&self) -> VectorView<'_, T> {
        VectorView::new(&self.data)
    }

    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut::new(&mut self.data)
    }

    /// See [`VectorView::range`].
    pub fn range(&self, first: usize, next: usize) -> VectorView<'_, T> {
        self.view().range(first, next)
    }

    /// See [`VectorViewMut::range_mut`].
    pub fn range_mut(&mut self, first: usize, next: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_range(first, next)
    }

    /// See [`VectorView::slice`].
    pub fn slice(&self, first: usize, step: usize) -> VectorView<'_, T> {
        self.view().slice(first, step)
    }

    /// See [`VectorViewMut::slice_mut`].
    pub fn slice_mut(&mut self, first: usize, step: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_slice(first, step)
    }
}

impl<T: Copy> Vector<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Materialize a vector expression.
    pub fn from_expr<E: VecExpr<Elem = T>>(expr: E) -> Self {
        (0..expr.len()).map(|i| expr.at(i)).collect()
    }

    /// Element `i`.
    ///
    /// # Panics
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.data[i]
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Scalar> Vector<T> {
    /// Evaluate `expr` into this vector.
    ///
    /// # Errors
    /// `ShapeMismatch` if the lengths differ.
    pub fn assign<E: VecExpr<Elem = T>>(&mut self, expr: E) -> Result<()> {
        self.view_mut().assign(expr)
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Scalar, E: VecExpr<Elem = T>> AddAssign<E> for Vector<T> {
    fn add_assign(&mut self, expr: E) {
        let mut view = self.view_mut();
        view += expr;
    }
}

impl<T: Scalar, E: VecExpr<Elem = T>> SubAssign<E> for Vector<T> {
    fn sub_assign(&mut self, expr: E) {
        let mut view = self.view_mut();
        view -= expr;
    }
}

impl<T: Scalar> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, alpha: T) {
        self.view_mut().scale(alpha);
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_elements(f, self.data.iter().copied())
    }
}

// ============================================================================
// FixedVector
// ============================================================================

/// Vector with compile-time length `N`, stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVector<T, const N: usize> {
    data: [T; N],
}

impl<T: Copy, const N: usize> FixedVector<T, N> {
    /// Every element set to `value`.
    pub fn splat(value: T) -> Self {
        Self { data: [value; N] }
    }

    pub fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    /// Materialize a vector expression of length `N`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the expression length is not `N`.
    pub fn from_expr<E: VecExpr<Elem = T>>(expr: E) -> Result<Self> {
        check_len(N, expr.len())?;
        Ok(Self {
            data: std::array::from_fn(|i| expr.at(i)),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        N
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.data[i]
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.data
    }

    pub fn view(&self) -> VectorView<'_, T> {
        VectorView::new(&self.data)
    }

    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut::new(&mut self.data)
    }
}

impl<T: Zero + Copy, const N: usize> Default for FixedVector<T, N> {
    fn default() -> Self {
        Self::splat(T::zero())
    }
}

impl<T, const N: usize> Index<usize> for FixedVector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedVector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Copy + fmt::Display, const N: usize> fmt::Display for FixedVector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_elements(f, self.data.iter().copied())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(n: usize) -> Vector<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_from_slice_strided() {
        let data: Vec<f64> = (0..10).map(|x| x as f64).collect();
        let v = VectorView::from_slice(&data, 4, 3).unwrap();
        // elements 0, 3, 6, 9
        assert_eq!(v.to_vec(), vec![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(v.stride(), 3);
    }

    #[test]
    fn test_from_slice_zero_stride() {
        let data = [1.0; 4];
        let err = VectorView::from_slice(&data, 2, 0).unwrap_err();
        assert!(matches!(err, StridedError::ZeroStride));
    }

    #[test]
    fn test_from_slice_out_of_bounds() {
        let data = [1.0; 9];
        // last element at 4 * 2 = 8 fits, 5 * 2 = 10 does not
        assert!(VectorView::from_slice(&data, 5, 2).is_ok());
        let err = VectorView::from_slice(&data, 6, 2).unwrap_err();
        assert!(matches!(
            err,
            StridedError::OutOfBounds {
                required: 11,
                len: 9
            }
        ));
    }

    #[test]
    fn test_range_keeps_stride() {
        let data: Vec<f64> = (0..12).map(|x| x as f64).collect();
        let v = VectorView::from_slice(&data, 6, 2).unwrap();
        let r = v.range(1, 4);
        assert_eq!(r.len(), 3);
        assert_eq!(r.stride(), 2);
        assert_eq!(r.to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_empty_range_at_end() {
        let data: Vec<f64> = (0..9).map(|x| x as f64).collect();
        let v = VectorView::from_slice(&data, 5, 2).unwrap();
        let r = v.range(5, 5);
        assert!(r.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_range_past_end_panics() {
        let x = iota(4);
        let _ = x.range(2, 5);
    }

    #[test]
    fn test_slice_truncates() {
        let x = iota(10);
        // 10 / 3 = 3 elements: 0, 3, 6
        assert_eq!(x.slice(0, 3).to_vec(), vec![0.0, 3.0, 6.0]);
        // 10 / 5 = 2 elements: 1, 6
        assert_eq!(x.slice(1, 5).to_vec(), vec![1.0, 6.0]);
    }

    #[test]
    fn test_slice_clamped_to_parent() {
        let x = iota(10);
        // 10 / 3 = 3, but starting at 4 only 4 and 7 exist
        assert_eq!(x.slice(4, 3).to_vec(), vec![4.0, 7.0]);
    }

    #[test]
    fn test_slice_of_slice_multiplies_stride() {
        let x = iota(16);
        let s = x.slice(0, 2).slice(1, 2);
        assert_eq!(s.stride(), 4);
        assert_eq!(s.to_vec(), vec![2.0, 6.0, 10.0, 14.0]);
    }

    #[test]
    fn test_range_and_slice_fill() {
        let mut x = iota(10);
        x.range_mut(2, 9).fill(3.0);
        x.slice_mut(1, 5).fill(10.0);
        assert_eq!(
            x.as_slice(),
            &[0.0, 10.0, 3.0, 3.0, 3.0, 3.0, 10.0, 3.0, 3.0, 9.0]
        );
    }

    #[test]
    fn test_set_through_strided_view() {
        let mut data = vec![0.0; 6];
        let mut v = VectorViewMut::from_slice(&mut data, 3, 2).unwrap();
        v.set(0, 1.0);
        v[1] = 2.0;
        v.set(2, 3.0);
        assert_eq!(data, vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_split_at_disjoint() {
        let mut x = iota(6);
        let (mut lo, mut hi) = x.view_mut().split_at(2);
        lo.fill(-1.0);
        hi.scale(10.0);
        assert_eq!(x.as_slice(), &[-1.0, -1.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_copy_from_slice_mismatch() {
        let mut x = iota(3);
        let err = x.view_mut().copy_from_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, StridedError::ShapeMismatch(_, _)));
    }

    #[test]
    fn test_as_matrix_row_major() {
        let x = iota(6);
        let m = x.view().as_matrix(2, 3).unwrap();
        assert_eq!(m.order(), Order::RowMajor);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.get(1, 2), 5.0);
    }

    #[test]
    fn test_as_matrix_rejects_strided() {
        let x = iota(8);
        assert!(x.slice(0, 2).as_matrix(2, 2).is_err());
        assert!(x.view().as_matrix(3, 3).is_err());
    }

    #[test]
    fn test_vector_clone_is_independent() {
        let a = iota(3);
        let mut b = a.clone();
        b[0] = 42.0;
        assert_eq!(a[0], 0.0);
        assert_eq!(b[0], 42.0);
    }

    #[test]
    fn test_vector_take_leaves_empty() {
        let mut a = iota(4);
        let b = a.take();
        assert!(a.is_empty());
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_fixed_vector() {
        let mut v = FixedVector::<f64, 3>::splat(1.5);
        v[2] = 4.0;
        assert_eq!(v.as_array(), &[1.5, 1.5, 4.0]);
        assert_eq!(v.len(), 3);
        assert_eq!(v.view().get(2), 4.0);
        assert_eq!(FixedVector::<i32, 2>::default().as_array(), &[0, 0]);
    }

    #[test]
    fn test_display() {
        let x = iota(4);
        assert_eq!(x.to_string(), "0, 1, 2, 3");
        assert_eq!(x.slice(0, 2).to_string(), "0, 2");
        assert_eq!(Vector::<f64>::default().to_string(), "");
    }
}
