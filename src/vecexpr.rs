//! Lazy vector expressions.
//!
//! Arithmetic on vector views and containers does not compute anything: it builds a
//! small tree of expression nodes that hold their operands by value. A node is a pure
//! function of the index, evaluated when the tree is assigned into a mutable view
//! (or materialized with [`Vector::from_expr`](crate::Vector::from_expr)).
//!
//! Element types combine through the `std::ops` output types, so a real vector plus
//! a complex vector is a complex expression.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{Float, Zero};

use crate::scalar::Magnitude;
use crate::vector::{check_len, FixedVector, Vector, VectorView};
use crate::Result;

/// A length plus an element function.
pub trait VecExpr {
    type Elem: Copy;

    fn len(&self) -> usize;

    /// Element `i`. Implementations may panic for `i >= len()`.
    fn at(&self, i: usize) -> Self::Elem;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy> VecExpr for VectorView<'_, T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        VectorView::len(self)
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.get(i)
    }
}

impl<T: Copy> VecExpr for &Vector<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        Vector::len(self)
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.get(i)
    }
}

impl<T: Copy, const N: usize> VecExpr for FixedVector<T, N> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        self.get(i)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// `a + b`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct SumExpr<A, B> {
    a: A,
    b: B,
}

impl<A: VecExpr, B: VecExpr> SumExpr<A, B> {
    /// # Errors
    /// `ShapeMismatch` if the operand lengths differ.
    pub fn try_new(a: A, b: B) -> Result<Self> {
        check_len(a.len(), b.len())?;
        Ok(Self { a, b })
    }

    /// # Panics
    /// Panics if the operand lengths differ.
    pub fn new(a: A, b: B) -> Self {
        match Self::try_new(a, b) {
            Ok(expr) => expr,
            Err(e) => panic!("vector sum: {e}"),
        }
    }
}

impl<A, B> VecExpr for SumExpr<A, B>
where
    A: VecExpr,
    B: VecExpr,
    A::Elem: Add<B::Elem>,
    <A::Elem as Add<B::Elem>>::Output: Copy,
{
    type Elem = <A::Elem as Add<B::Elem>>::Output;

    #[inline]
    fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        self.a.at(i) + self.b.at(i)
    }
}

/// `a - b`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct SubExpr<A, B> {
    a: A,
    b: B,
}

impl<A: VecExpr, B: VecExpr> SubExpr<A, B> {
    /// # Errors
    /// `ShapeMismatch` if the operand lengths differ.
    pub fn try_new(a: A, b: B) -> Result<Self> {
        check_len(a.len(), b.len())?;
        Ok(Self { a, b })
    }

    /// # Panics
    /// Panics if the operand lengths differ.
    pub fn new(a: A, b: B) -> Self {
        match Self::try_new(a, b) {
            Ok(expr) => expr,
            Err(e) => panic!("vector difference: {e}"),
        }
    }
}

impl<A, B> VecExpr for SubExpr<A, B>
where
    A: VecExpr,
    B: VecExpr,
    A::Elem: Sub<B::Elem>,
    <A::Elem as Sub<B::Elem>>::Output: Copy,
{
    type Elem = <A::Elem as Sub<B::Elem>>::Output;

    #[inline]
    fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        self.a.at(i) - self.b.at(i)
    }
}

/// `-a`, element-wise.
#[derive(Debug, Clone, Copy)]
pub struct NegExpr<A> {
    a: A,
}

impl<A: VecExpr> NegExpr<A> {
    pub fn new(a: A) -> Self {
        Self { a }
    }
}

impl<A> VecExpr for NegExpr<A>
where
    A: VecExpr,
    A::Elem: Neg,
    <A::Elem as Neg>::Output: Copy,
{
    type Elem = <A::Elem as Neg>::Output;

    #[inline]
    fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        -self.a.at(i)
    }
}

/// `scalar * a`, element-wise, scalar on the left.
#[derive(Debug, Clone, Copy)]
pub struct ScaleExpr<S, A> {
    scalar: S,
    a: A,
}

impl<S: Copy, A: VecExpr> ScaleExpr<S, A> {
    pub fn new(scalar: S, a: A) -> Self {
        Self { scalar, a }
    }
}

impl<S, A> VecExpr for ScaleExpr<S, A>
where
    A: VecExpr,
    S: Copy + Mul<A::Elem>,
    <S as Mul<A::Elem>>::Output: Copy,
{
    type Elem = <S as Mul<A::Elem>>::Output;

    #[inline]
    fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    fn at(&self, i: usize) -> Self::Elem {
        self.scalar * self.a.at(i)
    }
}

// ============================================================================
// Reductions
// ============================================================================

/// `Σ a(i) * b(i)`, accumulated from zero.
///
/// # Errors
/// `ShapeMismatch` if the lengths differ.
///
/// # Example
/// ```rust
/// use strided_blas::{dot, Vector};
///
/// let x = Vector::from(vec![1.0, 2.0, 3.0]);
/// let y = Vector::from(vec![4.0, 5.0, 6.0]);
/// assert_eq!(dot(&x, &y).unwrap(), 32.0);
/// ```
pub fn dot<A, B, O>(a: A, b: B) -> Result<O>
where
    A: VecExpr,
    B: VecExpr,
    A::Elem: Mul<B::Elem, Output = O>,
    O: Zero,
{
    check_len(a.len(), b.len())?;
    Ok((0..a.len()).fold(O::zero(), |acc, i| acc + a.at(i) * b.at(i)))
}

/// Euclidean norm `sqrt(Σ |a(i)|²)` in the element's real type.
pub fn norm<A>(a: A) -> <A::Elem as Magnitude>::Real
where
    A: VecExpr,
    A::Elem: Magnitude,
{
    let zero: <A::Elem as Magnitude>::Real = Zero::zero();
    let sum = (0..a.len()).fold(zero, |acc, i| acc + a.at(i).abs_sqr());
    Float::sqrt(sum)
}

// ============================================================================
// Printing
// ============================================================================

/// Write `v0, v1, v2`.
pub(crate) fn fmt_elements<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    mut iter: impl Iterator<Item = T>,
) -> fmt::Result {
    if let Some(first) = iter.next() {
        write!(f, "{first}")?;
        for x in iter {
            write!(f, ", {x}")?;
        }
    }
    Ok(())
}

macro_rules! impl_vec_expr_display {
    ($(impl[$($gen:tt)*] for $ty:ty;)*) => {
        $(
            impl<$($gen)*> ::std::fmt::Display for $ty
            where
                $ty: $crate::vecexpr::VecExpr,
                <$ty as $crate::vecexpr::VecExpr>::Elem: ::std::fmt::Display,
            {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    use $crate::vecexpr::VecExpr;
                    $crate::vecexpr::fmt_elements(f, (0..self.len()).map(|i| self.at(i)))
                }
            }
        )*
    };
}

pub(crate) use impl_vec_expr_display;

impl_vec_expr_display! {
    impl[A, B] for SumExpr<A, B>;
    impl[A, B] for SubExpr<A, B>;
    impl[A] for NegExpr<A>;
    impl[S, A] for ScaleExpr<S, A>;
}

// ============================================================================
// Operators
// ============================================================================

/// `+`, `-`, unary `-` and scalar-on-the-left `*` for a vector expression type.
macro_rules! impl_vec_expr_ops {
    (@scalar $gen:tt $ty:ty; $($s:ty),*) => {
        $(
            $crate::vecexpr::impl_vec_expr_ops!(@scale $gen $ty; $s);
        )*
    };
    (@scale [$($gen:tt)*] $ty:ty; $s:ty) => {
        impl<$($gen)*> ::std::ops::Mul<$ty> for $s
        where
            $ty: $crate::vecexpr::VecExpr,
            $s: ::std::ops::Mul<<$ty as $crate::vecexpr::VecExpr>::Elem>,
        {
            type Output = $crate::vecexpr::ScaleExpr<$s, $ty>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                $crate::vecexpr::ScaleExpr::new(self, rhs)
            }
        }
    };
    ($(impl[$($gen:tt)*] for $ty:ty;)*) => {
        $(
            impl<$($gen)*, Rhs> ::std::ops::Add<Rhs> for $ty
            where
                $ty: $crate::vecexpr::VecExpr,
                Rhs: $crate::vecexpr::VecExpr,
                <$ty as $crate::vecexpr::VecExpr>::Elem:
                    ::std::ops::Add<<Rhs as $crate::vecexpr::VecExpr>::Elem>,
            {
                type Output = $crate::vecexpr::SumExpr<$ty, Rhs>;

                /// # Panics
                /// Panics if the lengths differ.
                #[inline]
                fn add(self, rhs: Rhs) -> Self::Output {
                    $crate::vecexpr::SumExpr::new(self, rhs)
                }
            }

            impl<$($gen)*, Rhs> ::std::ops::Sub<Rhs> for $ty
            where
                $ty: $crate::vecexpr::VecExpr,
                Rhs: $crate::vecexpr::VecExpr,
                <$ty as $crate::vecexpr::VecExpr>::Elem:
                    ::std::ops::Sub<<Rhs as $crate::vecexpr::VecExpr>::Elem>,
            {
                type Output = $crate::vecexpr::SubExpr<$ty, Rhs>;

                /// # Panics
                /// Panics if the lengths differ.
                #[inline]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    $crate::vecexpr::SubExpr::new(self, rhs)
                }
            }

            impl<$($gen)*> ::std::ops::Neg for $ty
            where
                $ty: $crate::vecexpr::VecExpr,
                <$ty as $crate::vecexpr::VecExpr>::Elem: ::std::ops::Neg,
            {
                type Output = $crate::vecexpr::NegExpr<$ty>;

                #[inline]
                fn neg(self) -> Self::Output {
                    $crate::vecexpr::NegExpr::new(self)
                }
            }

            $crate::vecexpr::impl_vec_expr_ops!(@scalar [$($gen)*] $ty;
                f32, f64, i32, i64,
                ::num_complex::Complex<f32>, ::num_complex::Complex<f64>);
        )*
    };
}

pub(crate) use impl_vec_expr_ops;

impl_vec_expr_ops! {
    impl['a, T] for VectorView<'a, T>;
    impl['a, T] for &'a Vector<T>;
    impl[T, const N: usize] for FixedVector<T, N>;
    impl[A, B] for SumExpr<A, B>;
    impl[A, B] for SubExpr<A, B>;
    impl[A] for NegExpr<A>;
    impl[S, A] for ScaleExpr<S, A>;
}
