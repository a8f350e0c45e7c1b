//! Full-matrix aggregation and per-row/per-column reductions.
//!
//! Chunks aggregate columns into private [`AggregatorState`]s which are
//! merged in column order once every chunk has joined. A split run is
//! reproducible for a given split; it matches a sequential one exactly
//! only when the partial sums are exact.

use crate::aggregator::{Aggregator, AggregatorState};
use crate::dense::DenseStore;
use crate::scalar::Scalar;
use crate::threading::{divide_and_merge, Op, Split};
use crate::view::{MatrixView, Storage};

pub fn aggregate_all<N: Scalar>(view: &dyn MatrixView<N>, aggregator: Aggregator) -> N {
    aggregate_all_with(Split::for_op(Op::Aggregate), view, aggregator)
}

pub fn aggregate_all_with<N: Scalar>(
    split: Split,
    view: &dyn MatrixView<N>,
    aggregator: Aggregator,
) -> N {
    let rows = view.count_rows();
    let dense = match view.storage() {
        Storage::Dense(store) => Some(store),
        _ => None,
    };
    let state = divide_and_merge(
        split,
        view.count_columns(),
        || AggregatorState::new(aggregator),
        |columns, state| match dense {
            Some(store) => {
                let slice = &store.as_slice()[columns.start * rows..columns.end * rows];
                slice.iter().for_each(|&value| state.invoke(value));
            }
            None => {
                for col in columns {
                    for row in 0..rows {
                        state.invoke(view.get(row, col));
                    }
                }
            }
        },
        |merged, partial| merged.merge(partial),
    );
    state.get()
}

/// One aggregate per row, as a `rows × 1` store. Each row is scanned in
/// column order.
pub fn reduce_rows<N: Scalar>(view: &dyn MatrixView<N>, aggregator: Aggregator) -> DenseStore<N> {
    let cols = view.count_columns();
    DenseStore::from_fn(view.count_rows(), 1, |row, _| {
        aggregator.over((0..cols).map(|col| view.get(row, col)))
    })
}

/// One aggregate per column, as a `1 × cols` store.
pub fn reduce_columns<N: Scalar>(
    view: &dyn MatrixView<N>,
    aggregator: Aggregator,
) -> DenseStore<N> {
    let rows = view.count_rows();
    DenseStore::from_fn(1, view.count_columns(), |_, col| {
        aggregator.over((0..rows).map(|row| view.get(row, col)))
    })
}
