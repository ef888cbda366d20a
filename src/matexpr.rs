//! Lazy matrix expressions.
//!
//! Same model as [`vecexpr`](crate::vecexpr): nodes hold their operands by value
//! and compute `(i, j)` on demand. [`MatMulExpr`] and [`MatVecExpr`] are reference
//! implementations of the products (O(n³) and O(n²) per full evaluation); use
//! [`add_mat_mat`](crate::add_mat_mat) or [`matmul`](crate::matmul) when speed
//! matters.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;

use crate::matrix::{check_shape, Matrix, MatrixView};
use crate::vecexpr::{impl_vec_expr_display, impl_vec_expr_ops, VecExpr};
use crate::{Result, StridedError};

/// A shape plus an element function.
pub trait MatExpr {
    type Elem: Copy;

    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Element `(i, j)`. Implementations may panic for out-of-range indices.
    fn at(&self, i: usize, j: usize) -> Self::Elem;

    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

impl<T: Copy> MatExpr for MatrixView<'_, T> {
    type Elem = T;

    #[inline]
    fn nrows(&self) -> usize {
        MatrixView::nrows(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        MatrixView::ncols(self)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        self.get(i, j)
    }
}

impl<T: Copy> MatExpr for &Matrix<T> {
    type Elem = T;

    #[inline]
    fn nrows(&self) -> usize {
        Matrix::nrows(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        Matrix::ncols(self)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        self.get(i, j)
    }
}

// ============================================================================
// Element-wise nodes
// ============================================================================

/// `A + B`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct MatSumExpr<A, B> {
    a: A,
    b: B,
}

impl<A: MatExpr, B: MatExpr> MatSumExpr<A, B> {
    /// # Errors
    /// `ShapeMismatch` if the operand shapes differ.
    pub fn try_new(a: A, b: B) -> Result<Self> {
        check_shape(a.shape(), b.shape())?;
        Ok(Self { a, b })
    }

    /// # Panics
    /// Panics if the operand shapes differ.
    pub fn new(a: A, b: B) -> Self {
        match Self::try_new(a, b) {
            Ok(expr) => expr,
            Err(e) => panic!("matrix sum: {e}"),
        }
    }
}

impl<A, B> MatExpr for MatSumExpr<A, B>
where
    A: MatExpr,
    B: MatExpr,
    A::Elem: Add<B::Elem>,
    <A::Elem as Add<B::Elem>>::Output: Copy,
{
    type Elem = <A::Elem as Add<B::Elem>>::Output;

    #[inline]
    fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.a.ncols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Self::Elem {
        self.a.at(i, j) + self.b.at(i, j)
    }
}

/// `A - B`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct MatSubExpr<A, B> {
    a: A,
    b: B,
}

impl<A: MatExpr, B: MatExpr> MatSubExpr<A, B> {
    /// # Errors
    /// `ShapeMismatch` if the operand shapes differ.
    pub fn try_new(a: A, b: B) -> Result<Self> {
        check_shape(a.shape(), b.shape())?;
        Ok(Self { a, b })
    }

    /// # Panics
    /// Panics if the operand shapes differ.
    pub fn new(a: A, b: B) -> Self {
        match Self::try_new(a, b) {
            Ok(expr) => expr,
            Err(e) => panic!("matrix difference: {e}"),
        }
    }
}

impl<A, B> MatExpr for MatSubExpr<A, B>
where
    A: MatExpr,
    B: MatExpr,
    A::Elem: Sub<B::Elem>,
    <A::Elem as Sub<B::Elem>>::Output: Copy,
{
    type Elem = <A::Elem as Sub<B::Elem>>::Output;

    #[inline]
    fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.a.ncols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Self::Elem {
        self.a.at(i, j) - self.b.at(i, j)
    }
}

/// `-A`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct MatNegExpr<A> {
    a: A,
}

impl<A: MatExpr> MatNegExpr<A> {
    pub fn new(a: A) -> Self {
        Self { a }
    }
}

impl<A> MatExpr for MatNegExpr<A>
where
    A: MatExpr,
    A::Elem: Neg,
    <A::Elem as Neg>::Output: Copy,
{
    type Elem = <A::Elem as Neg>::Output;

    #[inline]
    fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.a.ncols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Self::Elem {
        -self.a.at(i, j)
    }
}

/// `s * A`, scalar on the left.
#[derive(Debug, Clone, Copy)]
pub struct MatScaleExpr<S, A> {
    scalar: S,
    a: A,
}

impl<S: Copy, A: MatExpr> MatScaleExpr<S, A> {
    pub fn new(scalar: S, a: A) -> Self {
        Self { scalar, a }
    }
}

impl<S, A> MatExpr for MatScaleExpr<S, A>
where
    A: MatExpr,
    S: Copy + Mul<A::Elem>,
    <S as Mul<A::Elem>>::Output: Copy,
{
    type Elem = <S as Mul<A::Elem>>::Output;

    #[inline]
    fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.a.ncols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Self::Elem {
        self.scalar * self.a.at(i, j)
    }
}

// ============================================================================
// Products
// ============================================================================

/// `A * B`; `(i, j)` is `Σ_k A(i, k) B(k, j)`, computed on every access.
#[derive(Debug, Clone, Copy)]
pub struct MatMulExpr<A, B> {
    a: A,
    b: B,
}

impl<A: MatExpr, B: MatExpr> MatMulExpr<A, B> {
    /// # Errors
    /// `ShapeMismatch` unless `a.ncols() == b.nrows()`.
    pub fn try_new(a: A, b: B) -> Result<Self> {
        if a.ncols() != b.nrows() {
            return Err(StridedError::ShapeMismatch(
                vec![a.nrows(), a.ncols()],
                vec![b.nrows(), b.ncols()],
            ));
        }
        Ok(Self { a, b })
    }

    /// # Panics
    /// Panics unless `a.ncols() == b.nrows()`.
    pub fn new(a: A, b: B) -> Self {
        match Self::try_new(a, b) {
            Ok(expr) => expr,
            Err(e) => panic!("matrix product: {e}"),
        }
    }
}

impl<A, B> MatExpr for MatMulExpr<A, B>
where
    A: MatExpr,
    B: MatExpr,
    A::Elem: Mul<B::Elem>,
    <A::Elem as Mul<B::Elem>>::Output: Zero + Copy,
{
    type Elem = <A::Elem as Mul<B::Elem>>::Output;

    #[inline]
    fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.b.ncols()
    }

    fn at(&self, i: usize, j: usize) -> Self::Elem {
        (0..self.a.ncols()).fold(Self::Elem::zero(), |acc, k| {
            acc + self.a.at(i, k) * self.b.at(k, j)
        })
    }
}

/// `A * x`, a vector expression of length `A.nrows()`.
#[derive(Debug, Clone, Copy)]
pub struct MatVecExpr<A, X> {
    a: A,
    x: X,
}

impl<A: MatExpr, X: VecExpr> MatVecExpr<A, X> {
    /// # Errors
    /// `ShapeMismatch` unless `a.ncols() == x.len()`.
    pub fn try_new(a: A, x: X) -> Result<Self> {
        if a.ncols() != x.len() {
            return Err(StridedError::ShapeMismatch(
                vec![a.nrows(), a.ncols()],
                vec![x.len()],
            ));
        }
        Ok(Self { a, x })
    }

    /// # Panics
    /// Panics unless `a.ncols() == x.len()`.
    pub fn new(a: A, x: X) -> Self {
        match Self::try_new(a, x) {
            Ok(expr) => expr,
            Err(e) => panic!("matrix-vector product: {e}"),
        }
    }
}

impl<A, X> VecExpr for MatVecExpr<A, X>
where
    A: MatExpr,
    X: VecExpr,
    A::Elem: Mul<X::Elem>,
    <A::Elem as Mul<X::Elem>>::Output: Zero + Copy,
{
    type Elem = <A::Elem as Mul<X::Elem>>::Output;

    #[inline]
    fn len(&self) -> usize {
        self.a.nrows()
    }

    fn at(&self, i: usize) -> Self::Elem {
        (0..self.x.len()).fold(Self::Elem::zero(), |acc, k| acc + self.a.at(i, k) * self.x.at(k))
    }
}

/// Lazy `A * x` for any vector expression `x`.
///
/// # Errors
/// `ShapeMismatch` unless `a.ncols() == x.len()`.
pub fn mat_vec<A: MatExpr, X: VecExpr>(a: A, x: X) -> Result<MatVecExpr<A, X>> {
    MatVecExpr::try_new(a, x)
}

impl_vec_expr_ops! {
    impl[A, X] for MatVecExpr<A, X>;
}

impl_vec_expr_display! {
    impl[A, X] for MatVecExpr<A, X>;
}

// ============================================================================
// Printing
// ============================================================================

/// One line per row, entries separated by a single space.
pub(crate) fn fmt_rows<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    rows: usize,
    cols: usize,
    at: impl Fn(usize, usize) -> T,
) -> fmt::Result {
    for i in 0..rows {
        for j in 0..cols {
            if j > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", at(i, j))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

macro_rules! impl_mat_expr_display {
    ($(impl[$($gen:tt)*] for $ty:ty;)*) => {
        $(
            impl<$($gen)*> fmt::Display for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: fmt::Display,
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt_rows(f, self.nrows(), self.ncols(), |i, j| self.at(i, j))
                }
            }
        )*
    };
}

impl_mat_expr_display! {
    impl[A, B] for MatSumExpr<A, B>;
    impl[A, B] for MatSubExpr<A, B>;
    impl[A] for MatNegExpr<A>;
    impl[S, A] for MatScaleExpr<S, A>;
    impl[A, B] for MatMulExpr<A, B>;
}

// ============================================================================
// Operators
// ============================================================================

/// `+`, `-`, unary `-`, matrix and matrix-vector `*`, and scalar-on-the-left `*`
/// for a matrix expression type.
macro_rules! impl_mat_expr_ops {
    (@scalar $gen:tt $ty:ty; $($s:ty),*) => {
        $(
            impl_mat_expr_ops!(@scale $gen $ty; $s);
        )*
    };
    (@scale [$($gen:tt)*] $ty:ty; $s:ty) => {
        impl<$($gen)*> Mul<$ty> for $s
        where
            $ty: MatExpr,
            $s: Mul<<$ty as MatExpr>::Elem>,
        {
            type Output = MatScaleExpr<$s, $ty>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                MatScaleExpr::new(self, rhs)
            }
        }
    };
    ($(impl[$($gen:tt)*] for $ty:ty;)*) => {
        $(
            impl<$($gen)*, Rhs> Add<Rhs> for $ty
            where
                $ty: MatExpr,
                Rhs: MatExpr,
                <$ty as MatExpr>::Elem: Add<Rhs::Elem>,
            {
                type Output = MatSumExpr<$ty, Rhs>;

                #[inline]
                fn add(self, rhs: Rhs) -> Self::Output {
                    MatSumExpr::new(self, rhs)
                }
            }

            impl<$($gen)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: MatExpr,
                Rhs: MatExpr,
                <$ty as MatExpr>::Elem: Sub<Rhs::Elem>,
            {
                type Output = MatSubExpr<$ty, Rhs>;

                #[inline]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    MatSubExpr::new(self, rhs)
                }
            }

            impl<$($gen)*> Neg for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Neg,
            {
                type Output = MatNegExpr<$ty>;

                #[inline]
                fn neg(self) -> Self::Output {
                    MatNegExpr::new(self)
                }
            }

            impl<$($gen)*, Rhs> Mul<Rhs> for $ty
            where
                $ty: MatExpr,
                Rhs: MatExpr,
                <$ty as MatExpr>::Elem: Mul<Rhs::Elem>,
            {
                type Output = MatMulExpr<$ty, Rhs>;

                #[inline]
                fn mul(self, rhs: Rhs) -> Self::Output {
                    MatMulExpr::new(self, rhs)
                }
            }

            impl<'rhs, $($gen)*, RhsElem: Copy> Mul<crate::VectorView<'rhs, RhsElem>> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Mul<RhsElem>,
            {
                type Output = MatVecExpr<$ty, crate::VectorView<'rhs, RhsElem>>;

                #[inline]
                fn mul(self, rhs: crate::VectorView<'rhs, RhsElem>) -> Self::Output {
                    MatVecExpr::new(self, rhs)
                }
            }

            impl<'rhs, $($gen)*, RhsElem: Copy> Mul<&'rhs crate::Vector<RhsElem>> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Mul<RhsElem>,
            {
                type Output = MatVecExpr<$ty, &'rhs crate::Vector<RhsElem>>;

                #[inline]
                fn mul(self, rhs: &'rhs crate::Vector<RhsElem>) -> Self::Output {
                    MatVecExpr::new(self, rhs)
                }
            }

            impl<$($gen)*, RhsElem: Copy, const RHS_N: usize>
                Mul<crate::FixedVector<RhsElem, RHS_N>> for $ty
            where
                $ty: MatExpr,
                <$ty as MatExpr>::Elem: Mul<RhsElem>,
            {
                type Output = MatVecExpr<$ty, crate::FixedVector<RhsElem, RHS_N>>;

                #[inline]
                fn mul(self, rhs: crate::FixedVector<RhsElem, RHS_N>) -> Self::Output {
                    MatVecExpr::new(self, rhs)
                }
            }

            impl_mat_expr_ops!(@scalar [$($gen)*] $ty;
                f32, f64, i32, i64,
                num_complex::Complex<f32>, num_complex::Complex<f64>);
        )*
    };
}

impl_mat_expr_ops! {
    impl['a, T] for MatrixView<'a, T>;
    impl['a, T] for &'a Matrix<T>;
    impl[A, B] for MatSumExpr<A, B>;
    impl[A, B] for MatSubExpr<A, B>;
    impl[A] for MatNegExpr<A>;
    impl[S, A] for MatScaleExpr<S, A>;
    impl[A, B] for MatMulExpr<A, B>;
}
