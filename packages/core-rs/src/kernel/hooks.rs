//! Entry points for reductions that only some scalar kinds support.
//!
//! Callers reach these through the generic store type; kinds that cannot
//! honour the request fail with [`Error::Unsupported`](crate::error::Error)
//! instead of producing a silently wrong result.

use super::householder::{transform_left, transform_right, Householder};
use crate::dense::DenseStore;
use crate::error::{ensure_dim, unsupported, CoreResult};
use crate::scalar::Scalar;
use tracing::trace;

fn require_real_float<N: Scalar>(operation: &'static str) -> CoreResult<()> {
    if N::KIND.is_real_float() {
        Ok(())
    } else {
        Err(unsupported(operation, N::KIND))
    }
}

/// Reduces a symmetric matrix to tridiagonal form `Qᵀ·A·Q` in place and
/// returns the reflectors whose product is `Q`.
pub fn tridiagonalize<N: Scalar>(store: &mut DenseStore<N>) -> CoreResult<Vec<Householder<N>>> {
    require_real_float::<N>("tridiagonalize")?;
    let reflectors = reduce_below_subdiagonal("tridiagonalize", store)?;
    let size = store.count_rows();
    for col in 0..size {
        for row in 0..col.saturating_sub(1) {
            store.set(row, col, N::zero());
        }
    }
    Ok(reflectors)
}

/// Reduces a square matrix to upper Hessenberg form `Qᵀ·A·Q` in place and
/// returns the reflectors whose product is `Q`.
pub fn reduce_to_hessenberg<N: Scalar>(store: &mut DenseStore<N>) -> CoreResult<Vec<Householder<N>>> {
    require_real_float::<N>("reduce_to_hessenberg")?;
    reduce_below_subdiagonal("reduce_to_hessenberg", store)
}

/// In-place Schur decomposition is left to decomposition drivers built on
/// top of these kernels.
pub fn compute_in_place_schur<N: Scalar>(_store: &mut DenseStore<N>) -> CoreResult<()> {
    Err(unsupported("compute_in_place_schur", N::KIND))
}

fn reduce_below_subdiagonal<N: Scalar>(
    operation: &'static str,
    store: &mut DenseStore<N>,
) -> CoreResult<Vec<Householder<N>>> {
    let (rows, cols) = store.shape();
    ensure_dim(operation, rows, cols)?;
    let mut reflectors = Vec::with_capacity(rows.saturating_sub(2));
    for k in 0..rows.saturating_sub(2) {
        let reflector = Householder::annihilating(store.column(k), k + 1);
        transform_left(&reflector, store)?;
        transform_right(store, &reflector)?;
        for row in k + 2..rows {
            store.set(row, k, N::zero());
        }
        trace!(operation, step = k, "reflected");
        reflectors.push(reflector);
    }
    Ok(reflectors)
}
