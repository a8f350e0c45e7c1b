//! Triangular solves in place, split over right-hand-side columns.
//!
//! `body` supplies the triangle: its lower part for forward substitution
//! and its upper part for backward substitution. With `conjugated` the
//! conjugate transpose of the opposite triangle is used instead, so one
//! stored factor serves both `L` and `Lᴴ`.

use crate::dense::DenseStore;
use crate::error::{ensure_dim, CoreResult};
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, Op, Split};
use crate::view::MatrixView;

/// `d⁻¹ · value`, as a left division for non-commutative kinds.
#[inline]
fn left_divide<N: Scalar>(value: N, diagonal: N) -> N {
    if N::KIND.is_commutative() {
        value / diagonal
    } else {
        diagonal.invert() * value
    }
}

#[inline]
fn element<N: Scalar>(body: &dyn MatrixView<N>, row: usize, col: usize, conjugated: bool) -> N {
    if conjugated {
        body.get(col, row).conjugate()
    } else {
        body.get(row, col)
    }
}

fn check<N: Scalar>(
    operation: &'static str,
    body: &dyn MatrixView<N>,
    rhs: &DenseStore<N>,
) -> CoreResult<()> {
    ensure_dim(operation, body.count_rows(), body.count_columns())?;
    ensure_dim(operation, body.count_rows(), rhs.count_rows())
}

/// Solves `L · X = B` in place of `rhs`.
///
/// With `identity` the incoming contents of `rhs` are ignored and `B` is
/// taken to be the identity, so column `j` of the result is zero above row
/// `j` and the solve starts there.
pub fn substitute_forwards<N: Scalar>(
    body: &dyn MatrixView<N>,
    unit_diagonal: bool,
    conjugated: bool,
    identity: bool,
    rhs: &mut DenseStore<N>,
) -> CoreResult<()> {
    substitute_forwards_with(
        Split::for_op(Op::Substitute),
        body,
        unit_diagonal,
        conjugated,
        identity,
        rhs,
    )
}

pub fn substitute_forwards_with<N: Scalar>(
    split: Split,
    body: &dyn MatrixView<N>,
    unit_diagonal: bool,
    conjugated: bool,
    identity: bool,
    rhs: &mut DenseStore<N>,
) -> CoreResult<()> {
    check("substitute_forwards", body, rhs)?;
    let (size, cols) = rhs.shape();
    if size == 0 || cols == 0 {
        return Ok(());
    }
    divide_columns_mut(split, rhs.as_mut_slice(), size, cols, |first, block| {
        for (offset, column) in block.chunks_mut(size).enumerate() {
            let j = first + offset;
            let start = if identity {
                column.fill(N::zero());
                if j >= size {
                    continue;
                }
                column[j] = N::one();
                j
            } else {
                0
            };
            for i in start..size {
                let mut sum = column[i];
                for k in start..i {
                    sum = sum - element(body, i, k, conjugated) * column[k];
                }
                column[i] = if unit_diagonal {
                    sum
                } else {
                    left_divide(sum, element(body, i, i, conjugated))
                };
            }
        }
    });
    Ok(())
}

/// Solves `U · X = B` in place of `rhs`.
///
/// With `hermitian` the solution is known to be hermitian. Only rows
/// `0..=j` of right-hand-side column `j` are read and solved; the rows
/// below are mirrored from the columns already finished, which are
/// processed last to first on the calling thread. This turns `L⁻¹` from
/// [`substitute_forwards`] with `identity` into `(L·Lᴴ)⁻¹` when `body` is
/// `L` read `conjugated`.
pub fn substitute_backwards<N: Scalar>(
    body: &dyn MatrixView<N>,
    unit_diagonal: bool,
    conjugated: bool,
    hermitian: bool,
    rhs: &mut DenseStore<N>,
) -> CoreResult<()> {
    substitute_backwards_with(
        Split::for_op(Op::Substitute),
        body,
        unit_diagonal,
        conjugated,
        hermitian,
        rhs,
    )
}

pub fn substitute_backwards_with<N: Scalar>(
    split: Split,
    body: &dyn MatrixView<N>,
    unit_diagonal: bool,
    conjugated: bool,
    hermitian: bool,
    rhs: &mut DenseStore<N>,
) -> CoreResult<()> {
    check("substitute_backwards", body, rhs)?;
    if hermitian {
        ensure_dim("substitute_backwards", rhs.count_rows(), rhs.count_columns())?;
        backwards_hermitian(body, unit_diagonal, conjugated, rhs);
        return Ok(());
    }
    let (size, cols) = rhs.shape();
    if size == 0 || cols == 0 {
        return Ok(());
    }
    divide_columns_mut(split, rhs.as_mut_slice(), size, cols, |_, block| {
        for column in block.chunks_mut(size) {
            for i in (0..size).rev() {
                let mut sum = column[i];
                for k in i + 1..size {
                    sum = sum - element(body, i, k, conjugated) * column[k];
                }
                column[i] = if unit_diagonal {
                    sum
                } else {
                    left_divide(sum, element(body, i, i, conjugated))
                };
            }
        }
    });
    Ok(())
}

/// Column `j` needs rows `j + 1..` of the solution, which are the
/// conjugates of row `j` in the later columns.
fn backwards_hermitian<N: Scalar>(
    body: &dyn MatrixView<N>,
    unit_diagonal: bool,
    conjugated: bool,
    rhs: &mut DenseStore<N>,
) {
    let size = rhs.count_rows();
    let data = rhs.as_mut_slice();
    for j in (0..size).rev() {
        for k in j + 1..size {
            data[k + j * size] = data[j + k * size].conjugate();
        }
        let column = &mut data[j * size..(j + 1) * size];
        for i in (0..=j).rev() {
            let mut sum = column[i];
            for k in i + 1..size {
                sum = sum - element(body, i, k, conjugated) * column[k];
            }
            column[i] = if unit_diagonal {
                sum
            } else {
                left_divide(sum, element(body, i, i, conjugated))
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    fn lower() -> DenseStore<f64> {
        DenseStore::from_rows(&[[2.0, 9.0, 9.0], [1.0, 4.0, 9.0], [-1.0, 2.0, 5.0]]).unwrap()
    }

    #[test]
    fn forward_solves_lower_system() {
        let body = lower();
        let mut rhs = DenseStore::column_vector(&[2.0, 5.0, 6.0]);
        substitute_forwards(&body, false, false, false, &mut rhs).unwrap();
        // x0 = 1, x1 = (5 - 1) / 4 = 1, x2 = (6 + 1 - 2) / 5 = 1
        assert_eq!(rhs.as_slice(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn conjugated_forward_uses_upper_triangle() {
        let upper = lower().transpose();
        let mut rhs = DenseStore::column_vector(&[2.0, 5.0, 6.0]);
        substitute_forwards(&upper, false, true, false, &mut rhs).unwrap();
        assert_eq!(rhs.as_slice(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn identity_flag_inverts_triangle() {
        let body = lower();
        let mut inverse: DenseStore<f64> = DenseStore::filled(3, 3, 42.0);
        substitute_forwards(&body, false, false, true, &mut inverse).unwrap();
        assert_eq!(inverse.get(0, 1), 0.0);
        assert_eq!(inverse.get(0, 2), 0.0);
        assert_eq!(inverse.get(1, 2), 0.0);
        let mut triangle = DenseStore::zeros(3, 3);
        for col in 0..3 {
            for row in col..3 {
                triangle.set(row, col, body.get(row, col));
            }
        }
        let product = triangle.multiply(&inverse).unwrap();
        for (value, expected) in product.as_slice().iter().zip(DenseStore::<f64>::identity(3).as_slice()) {
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn backward_solves_upper_system() {
        let body = lower().transpose();
        let mut rhs = DenseStore::from_rows(&[[2.0, 4.0], [6.0, 12.0], [5.0, 10.0]]).unwrap();
        substitute_backwards(&body, false, false, false, &mut rhs).unwrap();
        assert_eq!(rhs.to_row_major_vec(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);

        let mut unit = DenseStore::column_vector(&[3.0, 2.0, 1.0]);
        substitute_backwards(&body, true, false, false, &mut unit).unwrap();
        // x2 = 1, x1 = 2 - 2 = 0, x0 = 3 - 1 * 0 + 1 * 1 = 4
        assert_eq!(unit.as_slice(), &[4.0, 0.0, 1.0]);
    }

    #[test]
    fn hermitian_backward_keeps_the_given_rhs() {
        let mut doubled = DenseStore::from_rows(&[[2.0, 0.0], [0.0, 2.0]]).unwrap();
        substitute_backwards(&DenseStore::identity(2), false, false, true, &mut doubled).unwrap();
        assert_eq!(doubled.as_slice(), &[2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn inverse_chain_yields_inverse_of_gram_matrix() {
        // A = L·Lᵀ = [[4, 2], [2, 10]], A⁻¹ = [[10, -2], [-2, 4]] / 36
        let factor: DenseStore<f64> = DenseStore::from_rows(&[[2.0, 0.0], [1.0, 3.0]]).unwrap();
        let mut work: DenseStore<f64> = DenseStore::zeros(2, 2);
        substitute_forwards(&factor, false, false, true, &mut work).unwrap();
        substitute_backwards(&factor, false, true, true, &mut work).unwrap();
        let expected = [10.0 / 36.0, -2.0 / 36.0, -2.0 / 36.0, 4.0 / 36.0];
        for (got, want) in work.as_slice().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }

        let mut rect = DenseStore::zeros(2, 3);
        let err = substitute_backwards(&factor, false, true, true, &mut rect).unwrap_err();
        assert_eq!(err.code(), codes::SHAPE_MISMATCH);
    }

    #[test]
    fn split_matches_inline_and_shapes_are_checked() {
        let body = DenseStore::from_fn(5, 5, |r, c| if r == c { 2.0 } else { (r + c) as f64 * 0.25 });
        let rhs = DenseStore::from_fn(5, 200, |r, c| (r * c % 7) as f64);
        let mut inline = rhs.clone();
        let mut split = rhs.clone();
        substitute_forwards_with(Split::sequential(), &body, false, false, false, &mut inline).unwrap();
        substitute_forwards_with(Split::eager().with_parallelism(4), &body, false, false, false, &mut split)
            .unwrap();
        assert_eq!(inline, split);

        let mut wrong = DenseStore::<f64>::zeros(4, 1);
        let err = substitute_backwards(&body, false, false, false, &mut wrong).unwrap_err();
        assert_eq!(err.code(), codes::SHAPE_MISMATCH);
    }
}
