//! Matrix multiplication kernels and their dispatch.
//!
//! Every kernel accumulates `dest[i,j]` as `0 + l[i,0]·r[0,j] + l[i,1]·r[1,j]
//! + …` in ascending `k`, skipping only terms with a structurally zero
//! factor, so all paths agree exactly on finite input. Operand order is
//! always `left * right`.

use crate::dense::DenseStore;
use crate::error::CoreResult;
use crate::metrics::record_materialized;
use crate::region::{check_product_shape, Region};
use crate::scalar::Scalar;
use crate::sparse::multiply::{axpy_columns, axpy_rows};
use crate::threading::{divide_columns_mut, Op, Split};
use crate::view::{MatrixView, Storage};
use tracing::{debug, trace};

/// Which kernel a product is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    BothDense,
    LeftDense,
    RightDense,
    /// Neither operand is physical; the left one is materialized first.
    Generic,
    /// Row AXPY over the left operand's nonzeros.
    LeftSparse,
    /// Column AXPY over the right operand's nonzeros.
    RightSparse,
}

pub fn select<N: Scalar>(left: &dyn MatrixView<N>, right: &dyn MatrixView<N>) -> Strategy {
    match (left.storage(), right.storage()) {
        (_, Storage::Sparse(_)) => Strategy::RightSparse,
        (Storage::Sparse(_), _) => Strategy::LeftSparse,
        (Storage::Dense(_), Storage::Dense(_)) => Strategy::BothDense,
        (Storage::Dense(_), Storage::Logical) => Strategy::LeftDense,
        (Storage::Logical, Storage::Dense(_)) => Strategy::RightDense,
        (Storage::Logical, Storage::Logical) => Strategy::Generic,
    }
}

/// Overwrites `dest` with `left · right` using the configured split.
pub fn multiply_into<N: Scalar>(
    dest: &mut DenseStore<N>,
    left: &dyn MatrixView<N>,
    right: &dyn MatrixView<N>,
) -> CoreResult<()> {
    multiply_into_with(Split::for_op(Op::Multiply), dest, left, right)
}

pub fn multiply_into_with<N: Scalar>(
    split: Split,
    dest: &mut DenseStore<N>,
    left: &dyn MatrixView<N>,
    right: &dyn MatrixView<N>,
) -> CoreResult<()> {
    check_product_shape(dest.shape(), left, right)?;
    let strategy = select(left, right);
    trace!(?strategy, shape = ?dest.shape(), inner = left.count_columns(), "multiply");
    let (rows, cols) = dest.shape();
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let inner = left.count_columns();
    let data = dest.as_mut_slice();
    match strategy {
        Strategy::BothDense => {
            if let (Storage::Dense(l), Storage::Dense(r)) = (left.storage(), right.storage()) {
                both_dense(split, data, rows, cols, inner, l.as_slice(), r.as_slice());
            }
        }
        Strategy::LeftDense => {
            if let Storage::Dense(l) = left.storage() {
                left_dense(split, data, rows, cols, inner, l.as_slice(), right);
            }
        }
        Strategy::RightDense => {
            if let Storage::Dense(r) = right.storage() {
                right_dense(split, data, rows, cols, inner, left, r.as_slice());
            }
        }
        Strategy::Generic => {
            debug!(rows = left.count_rows(), cols = inner, "materializing left operand");
            let copy = DenseStore::copy_of(left);
            record_materialized(copy.as_slice().len());
            left_dense(split, data, rows, cols, inner, copy.as_slice(), right);
        }
        Strategy::LeftSparse => {
            if let Storage::Sparse(l) = left.storage() {
                axpy_rows(split, data, rows, cols, l, right);
            }
        }
        Strategy::RightSparse => {
            if let Storage::Sparse(r) = right.storage() {
                axpy_columns(split, data, rows, cols, left, r);
            }
        }
    }
    Ok(())
}

fn both_dense<N: Scalar>(
    split: Split,
    data: &mut [N],
    rows: usize,
    cols: usize,
    inner: usize,
    left: &[N],
    right: &[N],
) {
    divide_columns_mut(split, data, rows, cols, |first, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            let j = first + offset;
            column.fill(N::zero());
            for k in 0..inner {
                let factor = right[k + j * inner];
                let left_column = &left[k * rows..(k + 1) * rows];
                for (slot, &l) in column.iter_mut().zip(left_column) {
                    *slot = *slot + l * factor;
                }
            }
        }
    });
}

fn left_dense<N: Scalar>(
    split: Split,
    data: &mut [N],
    rows: usize,
    cols: usize,
    inner: usize,
    left: &[N],
    right: &dyn MatrixView<N>,
) {
    divide_columns_mut(split, data, rows, cols, |first, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            let j = first + offset;
            column.fill(N::zero());
            for k in 0..inner {
                let factor = right.get(k, j);
                let left_column = &left[k * rows..(k + 1) * rows];
                for (slot, &l) in column.iter_mut().zip(left_column) {
                    *slot = *slot + l * factor;
                }
            }
        }
    });
}

fn right_dense<N: Scalar>(
    split: Split,
    data: &mut [N],
    rows: usize,
    cols: usize,
    inner: usize,
    left: &dyn MatrixView<N>,
    right: &[N],
) {
    divide_columns_mut(split, data, rows, cols, |first, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            let j = first + offset;
            column.fill(N::zero());
            for k in 0..inner {
                let factor = right[k + j * inner];
                for (i, slot) in column.iter_mut().enumerate() {
                    *slot = *slot + left.get(i, k) * factor;
                }
            }
        }
    });
}

/// Element-at-a-time product into any region; the fallback when the
/// destination has no bulk path.
pub(crate) fn generic_into<N: Scalar, R: Region<N> + ?Sized>(
    dest: &mut R,
    left: &dyn MatrixView<N>,
    right: &dyn MatrixView<N>,
) {
    let inner = left.count_columns();
    for j in 0..right.count_columns() {
        for i in 0..left.count_rows() {
            let mut sum = N::zero();
            for k in 0..inner {
                sum = sum + left.get(i, k) * right.get(k, j);
            }
            dest.set(i, j, sum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::SparseStore;
    use crate::view::Wrapped;

    fn operands() -> (DenseStore<f64>, DenseStore<f64>) {
        let left = DenseStore::from_fn(5, 4, |r, c| (r * 4 + c) as f64 - 7.0);
        let right = DenseStore::from_fn(4, 6, |r, c| ((r + 2 * c) % 5) as f64 - 1.5);
        (left, right)
    }

    #[test]
    fn dispatch_table() {
        let (left, right) = operands();
        let hidden = Wrapped::hiding(&left);
        let sparse = SparseStore::copy_of(&right);
        assert_eq!(select(&left, &right), Strategy::BothDense);
        assert_eq!(select(&left, &hidden), Strategy::LeftDense);
        assert_eq!(select(&hidden, &right), Strategy::RightDense);
        assert_eq!(select(&hidden, &hidden), Strategy::Generic);
        assert_eq!(select(&sparse, &right), Strategy::LeftSparse);
        assert_eq!(select(&left, &sparse), Strategy::RightSparse);
        assert_eq!(select(&sparse, &sparse), Strategy::RightSparse);
    }

    #[test]
    fn every_strategy_agrees() {
        let (left, right) = operands();
        let mut expected = DenseStore::zeros(5, 6);
        generic_into(&mut expected, &left, &right);

        let hidden_left = Wrapped::hiding(&left);
        let hidden_right = Wrapped::hiding(&right);
        let sparse_left = SparseStore::copy_of(&left);
        let sparse_right = SparseStore::copy_of(&right);
        let pairs: [(&dyn MatrixView<f64>, &dyn MatrixView<f64>); 6] = [
            (&left, &right),
            (&left, &hidden_right),
            (&hidden_left, &right),
            (&hidden_left, &hidden_right),
            (&sparse_left, &hidden_right),
            (&hidden_left, &sparse_right),
        ];
        for split in [Split::sequential(), Split::eager().with_parallelism(3)] {
            for (l, r) in pairs {
                let mut dest = DenseStore::filled(5, 6, f64::NAN);
                multiply_into_with(split, &mut dest, l, r).unwrap();
                assert_eq!(dest, expected, "{:?}", select(l, r));
            }
        }
    }

    #[test]
    fn generic_records_materialization() {
        let (left, right) = operands();
        let hidden_left = Wrapped::hiding(&left);
        let hidden_right = Wrapped::hiding(&right);
        crate::metrics::reset_materialized();
        let mut dest = DenseStore::zeros(5, 6);
        multiply_into(&mut dest, &hidden_left, &hidden_right).unwrap();
        assert_eq!(crate::metrics::take_materialized(), 20);
    }

    #[test]
    fn empty_inner_dimension_gives_zeros() {
        let left = DenseStore::<f64>::zeros(2, 0);
        let right = DenseStore::<f64>::zeros(0, 3);
        let mut dest = DenseStore::filled(2, 3, 1.0);
        multiply_into(&mut dest, &left, &right).unwrap();
        assert_eq!(dest, DenseStore::zeros(2, 3));
    }
}
