//! Element type bounds.
//!
//! - [`Scalar`]: anything views, expressions and GEMM can store and combine
//! - [`Magnitude`]: real/complex modulus, used by `norm` and pivot search
//! - [`Field`]: `Scalar` with division and negation, required by inversion

use num_complex::Complex;
use num_traits::{Float, One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Shared trait bounds for all element types.
///
/// Blanket-implemented, so `f32`, `f64`, the signed and unsigned integers and
/// `Complex<f32>` / `Complex<f64>` all qualify.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Zero
    + One
    + PartialEq
{
}

impl<T> Scalar for T where
    T: Copy
        + Send
        + Sync
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Zero
        + One
        + PartialEq
{
}

/// Absolute value of a real or complex element.
pub trait Magnitude: Copy {
    /// The real type the magnitude is expressed in (`Self` for reals).
    type Real: Float + Send + Sync;

    /// Squared magnitude: `x*x` for reals, `re² + im²` for complex values.
    fn abs_sqr(self) -> Self::Real;

    /// Magnitude: `|x|` for reals, `sqrt(re² + im²)` for complex values.
    fn modulus(self) -> Self::Real;
}

macro_rules! impl_magnitude_real {
    ($($t:ty),*) => {
        $(
            impl Magnitude for $t {
                type Real = $t;

                #[inline(always)]
                fn abs_sqr(self) -> $t { self * self }
                #[inline(always)]
                fn modulus(self) -> $t { Float::abs(self) }
            }
        )*
    };
}

impl_magnitude_real!(f32, f64);

impl<T: Float + Send + Sync> Magnitude for Complex<T> {
    type Real = T;

    #[inline(always)]
    fn abs_sqr(self) -> T {
        self.norm_sqr()
    }

    #[inline(always)]
    fn modulus(self) -> T {
        self.norm()
    }
}

/// Element types that support the division and negation Gauss-Jordan needs.
pub trait Field: Scalar + Div<Output = Self> + Neg<Output = Self> + Magnitude {}

impl<T> Field for T where T: Scalar + Div<Output = T> + Neg<Output = T> + Magnitude {}
