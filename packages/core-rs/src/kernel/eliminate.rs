//! Rank-one update sweeps used by the Cholesky, LU and LDL drivers.
//!
//! Each sweep applies one elimination step `iteration` to the trailing
//! columns `iteration + 1..`. `multipliers` is indexed by row; entries at
//! or above `iteration` are not read.

use crate::dense::DenseStore;
use crate::error::{ensure_dim, CoreResult, Error};
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, Op, Split};

fn check<N: Scalar>(
    operation: &'static str,
    store: &DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
    square: bool,
) -> CoreResult<()> {
    let (rows, cols) = store.shape();
    if square {
        ensure_dim(operation, rows, cols)?;
    }
    ensure_dim(operation, rows, multipliers.len())?;
    let bound = rows.min(cols);
    if iteration >= bound {
        return Err(Error::IndexOutOfBounds {
            index: iteration,
            bound,
        });
    }
    Ok(())
}

/// `a[i,j] -= m[i]·conj(m[j])` for `j > iteration`, `i >= j`. Only the
/// lower triangle is updated.
pub fn apply_cholesky<N: Scalar>(
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    apply_cholesky_with(Split::for_op(Op::Eliminate), store, iteration, multipliers)
}

pub fn apply_cholesky_with<N: Scalar>(
    split: Split,
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    check("apply_cholesky", store, iteration, multipliers, true)?;
    sweep(split, store, iteration, |j, column| {
        let factor = multipliers[j].conjugate();
        for i in j..column.len() {
            column[i] = column[i] - multipliers[i] * factor;
        }
    });
    Ok(())
}

/// `a[i,j] -= m[i]·a[iteration,j]` for `i, j > iteration`.
pub fn apply_lu<N: Scalar>(
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    apply_lu_with(Split::for_op(Op::Eliminate), store, iteration, multipliers)
}

pub fn apply_lu_with<N: Scalar>(
    split: Split,
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    check("apply_lu", store, iteration, multipliers, false)?;
    sweep(split, store, iteration, |_, column| {
        let pivot_row = column[iteration];
        for i in iteration + 1..column.len() {
            column[i] = column[i] - multipliers[i] * pivot_row;
        }
    });
    Ok(())
}

/// `a[i,j] -= m[i]·d·conj(m[j])` for `j > iteration`, `i >= j`, where `d`
/// is the pivot `a[iteration, iteration]`.
pub fn apply_ldl<N: Scalar>(
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    apply_ldl_with(Split::for_op(Op::Eliminate), store, iteration, multipliers)
}

pub fn apply_ldl_with<N: Scalar>(
    split: Split,
    store: &mut DenseStore<N>,
    iteration: usize,
    multipliers: &[N],
) -> CoreResult<()> {
    check("apply_ldl", store, iteration, multipliers, true)?;
    let pivot = store.get(iteration, iteration);
    sweep(split, store, iteration, |j, column| {
        let factor = pivot * multipliers[j].conjugate();
        for i in j..column.len() {
            column[i] = column[i] - multipliers[i] * factor;
        }
    });
    Ok(())
}

/// Runs `update(j, column_j)` for every column after `iteration`.
fn sweep<N, F>(split: Split, store: &mut DenseStore<N>, iteration: usize, update: F)
where
    N: Scalar,
    F: Fn(usize, &mut [N]) + Send + Sync,
{
    let (rows, cols) = store.shape();
    let trailing = iteration + 1;
    if trailing >= cols {
        return;
    }
    let data = &mut store.as_mut_slice()[trailing * rows..];
    divide_columns_mut(split, data, rows, cols - trailing, |first, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            update(trailing + first + offset, column);
        }
    });
}
