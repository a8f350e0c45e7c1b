use num_complex::Complex64;
use num_rational::Rational64;
use rust_decimal::Decimal;
use num_rs_compose::error::codes;
use num_rs_compose::kernel::{
    apply_cholesky, apply_ldl, apply_lu, compute_in_place_schur, rotate_left, substitute_backwards,
    substitute_forwards, transform_left, tridiagonalize, Householder, Rotation,
};
use num_rs_compose::view::{Conjugated, Transposed, Triangular};
use num_rs_compose::{DenseStore, MatrixView, Quaternion};

fn close(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() < 1e-10
}

fn known_factor() -> DenseStore<Complex64> {
    DenseStore::from_rows(&[
        [Complex64::new(2.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(1.0, 1.0), Complex64::new(2.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
    ])
    .expect("rows")
}

#[test]
fn cholesky_sweeps_and_substitution_solve_a_hermitian_system() {
    let factor = known_factor();
    let adjoint = Conjugated::new(Transposed::new(&factor));
    let a = factor.multiply(&adjoint).expect("square");
    assert!(a.is_hermitian());

    let mut work = a.clone();
    for k in 0..3 {
        let d = Complex64::new(work.get(k, k).re.sqrt(), 0.0);
        work.set(k, k, d);
        for i in k + 1..3 {
            work.set(i, k, work.get(i, k) / d);
        }
        if k + 1 < 3 {
            let multipliers = work.column(k).to_vec();
            apply_cholesky(&mut work, k, &multipliers).expect("square");
        }
    }
    let lower = Triangular::lower(&work);
    for row in 0..3 {
        for col in 0..3 {
            assert!(close(lower.get(row, col), factor.get(row, col)), "({row},{col})");
        }
    }

    let solution = DenseStore::from_rows(&[
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 2.0)],
        [Complex64::new(-1.0, 1.0), Complex64::new(3.0, 0.0)],
        [Complex64::new(0.5, 0.0), Complex64::new(1.0, -1.0)],
    ])
    .expect("rows");
    let mut rhs = a.multiply(&solution).expect("chain");
    substitute_forwards(&work, false, false, false, &mut rhs).expect("forward");
    substitute_backwards(&work, false, true, false, &mut rhs).expect("backward");
    for (got, want) in rhs.as_slice().iter().zip(solution.as_slice()) {
        assert!(close(*got, *want));
    }
}

#[test]
fn ldl_sweeps_factor_exactly_over_rationals() {
    let r = |n: i64| Rational64::from_integer(n);
    let original = DenseStore::from_rows(&[[r(4), r(2), r(-2)], [r(2), r(5), r(1)], [r(-2), r(1), r(6)]])
        .expect("rows");
    let mut work = original.clone();
    for k in 0..2 {
        let pivot = work.get(k, k);
        let mut multipliers = vec![r(0); 3];
        for (i, slot) in multipliers.iter_mut().enumerate().skip(k + 1) {
            *slot = work.get(i, k) / pivot;
        }
        apply_ldl(&mut work, k, &multipliers).expect("square");
        for i in k + 1..3 {
            work.set(i, k, multipliers[i]);
        }
    }
    let unit_lower = Triangular::new(&work, false, true);
    let diagonal = DenseStore::from_fn(3, 3, |i, j| if i == j { work.get(i, i) } else { r(0) });
    let rebuilt = DenseStore::copy_of(&unit_lower)
        .multiply(&diagonal)
        .expect("chain")
        .multiply(&Transposed::new(&unit_lower))
        .expect("chain");
    assert_eq!(rebuilt, original);
}

#[test]
fn decimal_products_and_sweeps_stay_in_base_ten() {
    let d = |units: i64, scale: u32| Decimal::new(units, scale);
    let row = DenseStore::from_rows(&[[d(1, 1), d(2, 1)]]).expect("rows");
    let column = DenseStore::column_vector(&[d(2, 1), d(1, 1)]);
    let product = row.multiply(&column).expect("chain");
    assert_eq!(product.get(0, 0), d(4, 2));

    let mut work = DenseStore::from_rows(&[[d(2, 1), d(1, 1)], [d(6, 1), d(7, 1)]]).expect("rows");
    apply_lu(&mut work, 0, &[d(0, 0), d(3, 0)]).expect("square");
    assert_eq!(work.get(1, 1), d(4, 1));
    assert_eq!(work.get(0, 1), d(1, 1));
}

#[test]
fn householder_and_givens_triangularize() {
    let original: DenseStore<f64> = DenseStore::from_rows(&[
        [3.0, 1.0, 2.0],
        [4.0, -1.0, 0.0],
        [0.0, 2.0, 1.0],
        [1.0, 1.0, -3.0],
    ])
    .expect("rows");

    let mut reflected = original.clone();
    for k in 0..3 {
        let reflector = Householder::annihilating(reflected.column(k), k);
        transform_left(&reflector, &mut reflected).expect("rows match");
    }
    for col in 0..3 {
        for row in col + 1..4 {
            assert!(reflected.get(row, col).abs() < 1e-12, "({row},{col})");
        }
    }
    let norms = |store: &DenseStore<f64>| -> Vec<f64> {
        (0..3)
            .map(|c| store.column(c).iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect()
    };
    for (before, after) in norms(&original).iter().zip(norms(&reflected)) {
        assert!((before - after).abs() < 1e-12);
    }

    let mut rotated = original.clone();
    for col in 0..3 {
        for row in (col + 1..4).rev() {
            let rotation =
                Rotation::annihilating(col, row, rotated.get(col, col), rotated.get(row, col));
            rotate_left(&rotation, &mut rotated).expect("plane");
        }
    }
    for col in 0..3 {
        assert!((rotated.get(col, col).abs() - reflected.get(col, col).abs()).abs() < 1e-12);
        for row in col + 1..4 {
            assert!(rotated.get(row, col).abs() < 1e-12);
        }
    }
}

#[test]
fn preconditions_fail_with_stable_codes() {
    let mut rect = DenseStore::<f64>::zeros(3, 2);
    let err = apply_cholesky(&mut rect, 0, &[0.0; 3]).expect_err("not square");
    assert_eq!(err.code(), codes::SHAPE_MISMATCH);

    let mut square = DenseStore::<f64>::identity(3);
    let err = apply_cholesky(&mut square, 3, &[0.0; 3]).expect_err("iteration");
    assert_eq!(err.code(), codes::INDEX_BOUNDS);

    let err = rotate_left(&Rotation::new(1, 1, 1.0, 0.0), &mut square).expect_err("plane");
    assert_eq!(err.code(), codes::INVALID_ARGUMENT);

    let err = tridiagonalize(&mut DenseStore::<Quaternion>::identity(3)).expect_err("kind");
    assert_eq!(err.code(), codes::UNSUPPORTED);
    assert!(compute_in_place_schur(&mut square).is_err());

    let body = DenseStore::<f64>::identity(2);
    let err = substitute_forwards(&body, false, false, false, &mut square).expect_err("rows");
    assert_eq!(err.code(), codes::SHAPE_MISMATCH);
    assert_eq!(square, DenseStore::identity(3));
}
