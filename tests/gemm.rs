mod common;

use common::{init_test_subscriber, max_abs_diff, naive_product, random_matrix, rng};
use strided_blas::{add_mat_mat, matmul, matmul_into, Matrix, Order, StridedError};

#[test]
fn test_blocked_gemm_matches_naive_on_awkward_sizes() {
    let _guard = init_test_subscriber();
    let mut rng = rng(42);
    // none of these are multiples of 96, 12 or 4
    for &(m, n, k) in &[(1, 1, 1), (5, 7, 3), (97, 13, 101), (193, 25, 97), (50, 150, 200)] {
        let a = random_matrix(&mut rng, m, k, Order::ColMajor);
        let b = random_matrix(&mut rng, k, n, Order::ColMajor);
        let mut c = Matrix::zeros(m, n, Order::ColMajor);
        add_mat_mat(a.view(), b.view(), &mut c.view_mut()).unwrap();
        let expected = naive_product(a.view(), b.view());
        assert!(
            max_abs_diff(c.view(), expected.view()) < 1e-12 * k as f64,
            "{m}x{n}x{k}"
        );
    }
}

#[test]
fn test_matmul_every_order_combination() {
    let mut rng = rng(5);
    let orders = [Order::RowMajor, Order::ColMajor];
    for oa in orders {
        for ob in orders {
            for oc in orders {
                let a = random_matrix(&mut rng, 110, 37, oa);
                let b = random_matrix(&mut rng, 37, 29, ob);
                let mut c = Matrix::from_fn(110, 29, oc, |_, _| f64::NAN);
                matmul_into(a.view(), b.view(), &mut c.view_mut()).unwrap();
                let expected = naive_product(a.view(), b.view());
                assert!(max_abs_diff(c.view(), expected.view()) < 1e-12);
            }
        }
    }
}

#[test]
fn test_gemm_into_interior_block() {
    let mut rng = rng(9);
    let a = random_matrix(&mut rng, 20, 8, Order::ColMajor);
    let b = random_matrix(&mut rng, 8, 6, Order::ColMajor);
    let mut big = Matrix::from_fn(30, 10, Order::ColMajor, |_, _| 1.0);
    {
        let mut inner = big.view_mut().into_rows(5, 25).into_cols(2, 8);
        inner.fill(0.0);
        add_mat_mat(a.view(), b.view(), &mut inner).unwrap();
    }
    let expected = naive_product(a.view(), b.view());
    assert!(max_abs_diff(big.rows(5, 25).cols(2, 8), expected.view()) < 1e-12);
    assert_eq!(big[(4, 3)], 1.0);
    assert_eq!(big[(25, 3)], 1.0);
    assert_eq!(big[(10, 1)], 1.0);
    assert_eq!(big[(10, 8)], 1.0);
}

#[test]
fn test_gemm_errors() {
    let a = Matrix::<f64>::zeros(4, 3, Order::ColMajor);
    let b = Matrix::<f64>::zeros(4, 3, Order::ColMajor);
    let mut c = Matrix::<f64>::zeros(4, 3, Order::ColMajor);
    assert!(matches!(
        add_mat_mat(a.view(), b.view(), &mut c.view_mut()),
        Err(StridedError::ShapeMismatch(_, _))
    ));
    assert!(matches!(
        add_mat_mat(a.view(), b.t(), &mut c.view_mut()),
        Err(StridedError::UnsupportedOrder { .. })
    ));
    assert!(matmul(a.view(), b.view()).is_err());
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use strided_blas::{par_add_mat_mat, par_assign, WorkerPool};

    #[test]
    fn test_parallel_equals_sequential() {
        let _guard = init_test_subscriber();
        let mut rng = rng(77);
        let a = random_matrix(&mut rng, 401, 97, Order::ColMajor);
        let b = random_matrix(&mut rng, 97, 33, Order::ColMajor);
        let mut seq = Matrix::zeros(401, 33, Order::ColMajor);
        add_mat_mat(a.view(), b.view(), &mut seq.view_mut()).unwrap();

        let pool = WorkerPool::start(4).unwrap();
        let mut par = Matrix::zeros(401, 33, Order::ColMajor);
        pool.install(|| par_add_mat_mat(a.view(), b.view(), &mut par.view_mut()))
            .unwrap();
        pool.stop();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_parallel_assignment_of_lazy_product() {
        let mut rng = rng(13);
        let a = random_matrix(&mut rng, 64, 20, Order::RowMajor);
        let b = random_matrix(&mut rng, 20, 600, Order::ColMajor);
        let mut c = Matrix::zeros(64, 600, Order::ColMajor);
        par_assign(&mut c.view_mut(), &a * &b).unwrap();
        let expected = naive_product(a.view(), b.view());
        assert!(max_abs_diff(c.view(), expected.view()) < 1e-12);
    }
}
