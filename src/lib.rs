//! Strided vector/matrix views, lazy expressions, blocked GEMM and in-place inversion.
//!
//! This crate is a small dense linear-algebra core built around non-owning strided
//! views. Everything higher up (expression evaluation, GEMM, inversion) reads and
//! writes through those views.
//!
//! # Core Types
//!
//! - [`VectorView`] / [`VectorViewMut`]: borrowed 1D windows with an element stride
//! - [`MatrixView`] / [`MatrixViewMut`]: borrowed 2D windows with a leading dimension
//!   and a runtime storage [`Order`]
//! - [`Vector`], [`FixedVector`], [`Matrix`]: owning containers exposing the view API
//!
//! # Expressions
//!
//! Arithmetic on views and containers builds lazy expression nodes ([`VecExpr`],
//! [`MatExpr`]). Nothing is computed until the expression is assigned into a
//! mutable view:
//!
//! ```rust
//! use strided_blas::{Vector, VecExpr};
//!
//! let x = Vector::from(vec![0.0, 1.0, 2.0]);
//! let y = Vector::from(vec![10.0, 10.0, 10.0]);
//!
//! let expr = &x + 3.0 * &y;
//! assert_eq!(expr.at(2), 32.0);
//!
//! let z = Vector::from_expr(expr);
//! assert_eq!(z.to_string(), "30, 31, 32");
//! ```
//!
//! # Blocked GEMM
//!
//! [`add_mat_mat`] computes `C += A * B` on column-major views with packed
//! [`GEMM_BLOCK_ROWS`] x [`GEMM_BLOCK_COLS`] macro tiles and a
//! [`GEMM_MICRO_ROWS`] x [`GEMM_MICRO_COLS`] register-blocked micro-kernel.
//! Row-major operands go through transposed views, see [`matmul_into`].
//!
//! # Inversion
//!
//! [`calc_inverse`] inverts a square matrix in place with Gauss-Jordan elimination
//! and partial pivoting:
//!
//! ```rust
//! use strided_blas::{calc_inverse, Matrix};
//!
//! let mut a = Matrix::from_rows(&[[2.0f64, -1.0], [-1.0, 2.0]]);
//! calc_inverse(&mut a.view_mut()).unwrap();
//! assert!((a[(0, 0)] - 2.0 / 3.0).abs() < 1e-12);
//! ```

mod blas;
mod gemm;
mod inverse;
mod linalg;
mod matexpr;
mod matrix;
mod order;
mod scalar;
#[cfg(feature = "parallel")]
mod threading;
mod vecexpr;
mod vector;

// ============================================================================
// Views and containers
// ============================================================================
pub use matrix::{Matrix, MatrixView, MatrixViewMut};
pub use order::Order;
pub use vector::{FixedVector, Vector, VectorView, VectorViewMut};

// ============================================================================
// Element traits
// ============================================================================
pub use scalar::{Field, Magnitude, Scalar};

// ============================================================================
// Expressions
// ============================================================================
pub use matexpr::{
    mat_vec, MatExpr, MatMulExpr, MatNegExpr, MatScaleExpr, MatSubExpr, MatSumExpr, MatVecExpr,
};
pub use vecexpr::{dot, norm, NegExpr, ScaleExpr, SubExpr, SumExpr, VecExpr};

// ============================================================================
// Kernels
// ============================================================================
pub use gemm::add_mat_mat;
pub use inverse::{calc_inverse, SINGULAR_TOLERANCE};

// ============================================================================
// Library-style interface
// ============================================================================
pub use blas::{BlasMatrix, BlasTranspose, BlasVector};
pub use linalg::{axpby, axpy, gemv, inverse, matmul, matmul_into};

#[cfg(feature = "parallel")]
pub use threading::{par_add_mat_mat, par_assign, par_assign_vec, WorkerPool};

// ============================================================================
// Constants
// ============================================================================

/// Rows of `A` packed per GEMM macro tile.
///
/// The packed tile (`GEMM_BLOCK_ROWS * GEMM_BLOCK_COLS` elements) is sized to stay
/// resident in L2 while the micro-kernel sweeps the columns of `C`.
pub const GEMM_BLOCK_ROWS: usize = 96;

/// Reduction-dimension extent (columns of `A`, rows of `B`) per GEMM macro tile.
pub const GEMM_BLOCK_COLS: usize = 96;

/// Rows of `C` accumulated in registers by one micro-kernel call.
pub const GEMM_MICRO_ROWS: usize = 4;

/// Columns of `C` accumulated in registers by one micro-kernel call.
pub const GEMM_MICRO_COLS: usize = 12;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during view construction, expression assignment,
/// multiplication and inversion.
#[derive(Debug, thiserror::Error)]
pub enum StridedError {
    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Elimination found no usable pivot.
    #[error("matrix is singular (no usable pivot in column {column})")]
    Singular { column: usize },

    /// Zero stride is not allowed for vector views.
    #[error("invalid stride 0")]
    ZeroStride,

    /// Leading dimension shorter than the contiguous extent.
    #[error("leading dimension {dist} is smaller than the contiguous extent {required}")]
    InvalidDistance { dist: usize, required: usize },

    /// The view would address memory past the end of the buffer.
    #[error("view needs {required} elements but the buffer holds {len}")]
    OutOfBounds { required: usize, len: usize },

    /// The operation only supports one storage order.
    #[error("unsupported storage order: expected {expected:?}, found {found:?}")]
    UnsupportedOrder { expected: Order, found: Order },

    /// Failed to convert a numeric constant into the element's real type.
    #[error("failed to convert scalar constant")]
    ScalarConversion,

    /// The worker pool could not be built.
    #[cfg(feature = "parallel")]
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for strided operations.
pub type Result<T> = std::result::Result<T, StridedError>;
