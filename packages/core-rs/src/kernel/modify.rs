use crate::dense::DenseStore;
use crate::function::UnaryOp;
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, Op, Split};

/// Applies `function` to every element in place.
pub fn modify_all<N: Scalar>(store: &mut DenseStore<N>, function: &UnaryOp<N>) {
    modify_all_with(Split::for_op(Op::Modify), store, function);
}

pub fn modify_all_with<N: Scalar>(split: Split, store: &mut DenseStore<N>, function: &UnaryOp<N>) {
    let (rows, cols) = store.shape();
    if rows == 0 || cols == 0 {
        return;
    }
    divide_columns_mut(split, store.as_mut_slice(), rows, cols, |_, block| {
        for slot in block.iter_mut() {
            *slot = function.apply(*slot);
        }
    });
}
