mod common;

use approx::assert_relative_eq;
use num_complex::Complex64;
use strided_blas::{
    axpy, dot, matmul, norm, FixedVector, MatExpr, Matrix, MatrixView, Order, StridedError,
    VecExpr, Vector, VectorView,
};

fn sum_matrix(order: Order) -> Matrix<f64> {
    Matrix::from_fn(3, 3, order, |i, j| (i + j) as f64)
}

fn prod_matrix(order: Order) -> Matrix<f64> {
    Matrix::from_fn(3, 3, order, |i, j| (i * j) as f64)
}

const GOLDEN_AB: [[f64; 3]; 3] = [[0.0, 5.0, 10.0], [0.0, 8.0, 16.0], [0.0, 11.0, 22.0]];

#[test]
fn test_range_and_slice_fill() {
    let mut x: Vector<f64> = (0..10).map(|i| i as f64).collect();
    x.range_mut(2, 9).fill(3.0);
    x.slice_mut(1, 5).fill(10.0);
    assert_eq!(
        x.as_slice(),
        &[0.0, 10.0, 3.0, 3.0, 3.0, 3.0, 10.0, 3.0, 3.0, 9.0]
    );
}

#[test]
fn test_strided_view_over_raw_buffer() {
    let data: Vec<i32> = (0..10).collect();
    let v = VectorView::from_slice(&data, 4, 3).unwrap();
    assert_eq!(v.to_vec(), vec![0, 3, 6, 9]);

    let err = VectorView::from_slice(&data, 5, 3).unwrap_err();
    assert!(matches!(err, StridedError::OutOfBounds { required: 13, len: 10 }));
}

#[test]
fn test_elementwise_expressions() {
    let a = Vector::from(vec![1.0, 2.0, 3.0]);
    let b = Vector::from(vec![0.5, -1.0, 4.0]);
    let e = &a + 2.0 * &b - (-&a);
    for i in 0..3 {
        assert_eq!(e.at(i), a[i] + 2.0 * b[i] + a[i]);
    }
    let mut out = Vector::new(3);
    out.assign(e).unwrap();
    assert_eq!(out.as_slice(), &[3.0, 2.0, 14.0]);
}

#[test]
fn test_expression_mismatch_leaves_destination() {
    let a = Vector::from(vec![1.0, 2.0, 3.0]);
    let b = Vector::from(vec![1.0, 2.0]);
    let mut out = Vector::from(vec![7.0; 2]);
    assert!(out.assign(&a).is_err());
    assert_eq!(out.as_slice(), &[7.0, 7.0]);
    assert!(dot(&a, &b).is_err());
}

#[test]
fn test_dot_and_norm() {
    let a = Vector::from(vec![3.0, 4.0]);
    let b = Vector::from(vec![2.0, -1.0]);
    assert_eq!(dot(&a, &b).unwrap(), 2.0);
    assert_relative_eq!(norm(&a), 5.0);

    let z = Vector::from(vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, 12.0)]);
    // |3+4i|^2 + |12i|^2 = 25 + 144
    assert_relative_eq!(norm(z.view()), 13.0);
}

#[test]
fn test_fixed_vector_expression() {
    let a = FixedVector::from_array([1.0, 2.0, 3.0]);
    let b = FixedVector::<f64, 3>::splat(1.0);
    let c = FixedVector::<f64, 3>::from_expr(a + b).unwrap();
    assert_eq!(c.as_array(), &[2.0, 3.0, 4.0]);
}

#[test]
fn test_axpy_golden() {
    let x = Vector::from(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    let mut y = Vector::from(vec![2.0; 5]);
    axpy(2.0, x.view(), &mut y.view_mut()).unwrap();
    assert_eq!(y.as_slice(), &[2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn test_lazy_product_and_matmul_agree() {
    for oa in [Order::RowMajor, Order::ColMajor] {
        for ob in [Order::RowMajor, Order::ColMajor] {
            let a = sum_matrix(oa);
            let b = prod_matrix(ob);
            let lazy = &a * &b;
            let eager = matmul(a.view(), b.view()).unwrap();
            for (i, row) in GOLDEN_AB.iter().enumerate() {
                for (j, &v) in row.iter().enumerate() {
                    assert_eq!(lazy.at(i, j), v);
                    assert_eq!(eager[(i, j)], v);
                }
            }
        }
    }
}

#[test]
fn test_transpose_round_trip() {
    let m = Matrix::from_fn(3, 5, Order::RowMajor, |i, j| (10 * i + j) as f64);
    let v = m.view();
    let tt = v.t().t();
    assert_eq!(tt.as_ptr(), v.as_ptr());
    assert_eq!(tt.shape(), v.shape());
    assert_eq!(tt.order(), v.order());
    assert_eq!(tt.dist(), v.dist());
    for i in 0..3 {
        for j in 0..5 {
            assert_eq!(v.t()[(j, i)], m[(i, j)]);
        }
    }
}

#[test]
fn test_padded_view_and_sub_views() {
    // 3x2 row-major with leading dimension 4
    let data: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let m = MatrixView::with_dist(&data, 3, 2, 4, Order::RowMajor).unwrap();
    assert_eq!(m.row(2).to_vec(), vec![8.0, 9.0]);
    assert_eq!(m.col(1).to_vec(), vec![1.0, 5.0, 9.0]);
    assert_eq!(m.diag().to_vec(), vec![0.0, 5.0]);
    assert_eq!(m.rows(1, 3).to_matrix().as_slice(), &[4.0, 5.0, 8.0, 9.0]);

    assert!(MatrixView::with_dist(&data, 3, 2, 1, Order::RowMajor).is_err());
    assert!(MatrixView::with_dist(&data, 3, 4, 5, Order::RowMajor).is_err());
}

#[test]
fn test_matrix_vector_expression() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let x = Vector::from(vec![1.0, -1.0]);
    let y = Vector::from_expr(&a * &x);
    assert_eq!(y.as_slice(), &[-1.0, -1.0, -1.0]);
}

#[test]
fn test_display() {
    let x = Vector::from(vec![1.0, 2.5]);
    assert_eq!(x.to_string(), "1, 2.5");
    let m = Matrix::from_rows(&[[1, 2], [3, 4]]);
    assert_eq!(m.to_string(), "1 2\n3 4\n");
    assert_eq!((&m + &m).to_string(), "2 4\n6 8\n");
}

#[test]
#[should_panic]
fn test_operator_shape_violation_panics() {
    let a = Matrix::<f64>::zeros(2, 3, Order::RowMajor);
    let _ = &a * &a;
}
