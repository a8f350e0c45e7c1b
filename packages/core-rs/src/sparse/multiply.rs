//! AXPY style products that only touch stored nonzeros.
//!
//! Each kernel still accumulates every output element in ascending inner
//! index, so results match the dense kernels exactly on finite input.

use super::SparseStore;
use crate::region::Region;
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, Split};
use crate::view::{MatrixView, Storage};

/// `dest[i,:] += l[i,k] · right[k,:]` for every stored `l[i,k]`.
///
/// `dest` is a column-major `rows × cols` buffer; it is split over columns
/// and each block walks the full nonzero stream of `left`.
pub(crate) fn axpy_rows<N: Scalar>(
    split: Split,
    data: &mut [N],
    rows: usize,
    cols: usize,
    left: &SparseStore<N>,
    right: &dyn MatrixView<N>,
) {
    let dense_right = match right.storage() {
        Storage::Dense(r) => Some(r),
        _ => None,
    };
    divide_columns_mut(split, data, rows, cols, |first, block| {
        block.fill(N::zero());
        let width = block.len() / rows;
        for (i, k, l) in left.nonzeros() {
            for offset in 0..width {
                let j = first + offset;
                let factor = match dense_right {
                    Some(r) => r.get(k, j),
                    None => right.get(k, j),
                };
                let slot = &mut block[i + offset * rows];
                *slot = *slot + l * factor;
            }
        }
    });
}

/// `dest[:,j] += left[:,k] · r[k,j]` for every stored `r[k,j]`.
pub(crate) fn axpy_columns<N: Scalar>(
    split: Split,
    data: &mut [N],
    rows: usize,
    cols: usize,
    left: &dyn MatrixView<N>,
    right: &SparseStore<N>,
) {
    let by_column = right.column_entries();
    let dense_left = match left.storage() {
        Storage::Dense(l) => Some(l),
        _ => None,
    };
    divide_columns_mut(split, data, rows, cols, |first, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            column.fill(N::zero());
            for &(k, factor) in &by_column[first + offset] {
                match dense_left {
                    Some(l) => {
                        for (slot, &value) in column.iter_mut().zip(l.column(k)) {
                            *slot = *slot + value * factor;
                        }
                    }
                    None => {
                        for (i, slot) in column.iter_mut().enumerate() {
                            *slot = *slot + left.get(i, k) * factor;
                        }
                    }
                }
            }
        }
    });
}

/// Overwrites a sparse `dest` with `left · right`, one output row at a
/// time. The inner loop is bounded by the left operand's row occupancy, and
/// a sparse right operand contributes only its stored row entries.
pub(crate) fn fill_sparse<N: Scalar>(
    dest: &mut SparseStore<N>,
    left: &dyn MatrixView<N>,
    right: &dyn MatrixView<N>,
) {
    let cols = right.count_columns();
    let sparse_right = match right.storage() {
        Storage::Sparse(r) => Some(r),
        _ => None,
    };
    let mut products = Vec::with_capacity(left.count_rows());
    let mut row_sum = vec![N::zero(); cols];
    for i in 0..left.count_rows() {
        row_sum.fill(N::zero());
        let first = left.first_in_row(i);
        let limit = left.limit_of_row(i).min(left.count_columns());
        for k in first..limit {
            let l = left.get(i, k);
            if l.is_zero() {
                continue;
            }
            match sparse_right {
                Some(r) => {
                    for (j, value) in r.row_nonzeros(k) {
                        row_sum[j] = row_sum[j] + l * value;
                    }
                }
                None => {
                    for (j, slot) in row_sum.iter_mut().enumerate() {
                        *slot = *slot + l * right.get(k, j);
                    }
                }
            }
        }
        products.push(row_sum.clone());
    }
    dest.reset();
    for (i, row) in products.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            dest.set(i, j, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;

    fn scenario() -> SparseStore<f64> {
        SparseStore::from_triplets(4, 4, [(0, 0, 2.0), (3, 2, 5.0)]).unwrap()
    }

    #[test]
    fn identity_product_reproduces_pattern() {
        let sparse = scenario();
        let product = sparse.multiply(&DenseStore::identity(4)).unwrap();
        assert_eq!(product, sparse.to_dense());

        let premultiplied = DenseStore::<f64>::identity(4).multiply(&sparse).unwrap();
        assert_eq!(premultiplied, sparse.to_dense());
    }

    #[test]
    fn sparse_destination_keeps_sparsity() {
        let sparse = scenario();
        let mut dest = SparseStore::new(4, 4);
        dest.fill_by_multiplying(&sparse, &SparseStore::copy_of(&DenseStore::<f64>::identity(4)))
            .unwrap();
        assert_eq!(dest.nnz(), 2);
        assert_eq!(dest.get(3, 2), 5.0);
        assert_eq!(dest.limit_of_row(3), 3);
    }

    #[test]
    fn sparse_destination_drops_stale_entries() {
        let mut dest = SparseStore::from_triplets(4, 4, [(1, 1, 7.0), (2, 3, -1.0)]).unwrap();
        fill_sparse(&mut dest, &scenario(), &DenseStore::<f64>::identity(4));
        assert_eq!(dest, scenario());
        assert_eq!(dest.limit_of_row(1), 0);
    }

    #[test]
    fn split_row_axpy_matches_sequential() {
        let sparse = SparseStore::from_triplets(
            6,
            5,
            (0..6).flat_map(|i| [(i, (i * 2) % 5, i as f64 + 1.0), (i, 4, -1.0)]),
        )
        .unwrap();
        let right = DenseStore::from_fn(5, 9, |r, c| (r + c) as f64);
        let mut sequential = vec![0.0; 6 * 9];
        let mut split = vec![0.0; 6 * 9];
        axpy_rows(Split::sequential(), &mut sequential, 6, 9, &sparse, &right);
        axpy_rows(Split::eager().with_parallelism(4), &mut split, 6, 9, &sparse, &right);
        assert_eq!(sequential, split);
        let expected = DenseStore::copy_of(&sparse).multiply(&right).unwrap();
        assert_eq!(sequential, expected.as_slice());
    }
}
