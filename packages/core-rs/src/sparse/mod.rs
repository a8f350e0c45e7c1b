//! Sparse matrix store with per-row occupancy bookkeeping.
//!
//! Nonzeros live in an ordered map keyed by the row-major linear index
//! `row * columns + col`, so iteration is row-major. Next to the map, each
//! row keeps `[first, limit)` bounds on the columns that can hold a
//! nonzero; they are widened on every write and only tightened by
//! [`Region::reset`].

pub mod multiply;
#[cfg(feature = "sprs")]
mod sprs;

use crate::aggregator::Aggregator;
use crate::dense::DenseStore;
use crate::error::{ensure_dim, CoreResult, Error};
use crate::kernel::aggregate;
use crate::region::{check_product_shape, Region, RegionKind};
use crate::scalar::Scalar;
use crate::view::{MatrixView, Storage};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct SparseStore<N> {
    rows: usize,
    cols: usize,
    elements: BTreeMap<usize, N>,
    first: Vec<usize>,
    limit: Vec<usize>,
}

impl<N: Scalar> SparseStore<N> {
    pub fn new(rows: usize, cols: usize) -> Self {
        SparseStore {
            rows,
            cols,
            elements: BTreeMap::new(),
            first: vec![cols; rows],
            limit: vec![0; rows],
        }
    }

    /// Copies the nonzeros of any view.
    pub fn copy_of(source: &dyn MatrixView<N>) -> Self {
        let mut store = SparseStore::new(source.count_rows(), source.count_columns());
        source.supply_to(&mut store);
        store
    }

    /// Builds a store from `(row, col, value)` triplets; duplicates add up.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, N)>,
    ) -> CoreResult<Self> {
        let mut store = SparseStore::new(rows, cols);
        for (row, col, value) in triplets {
            store.check_bounds(row, col)?;
            store.add(row, col, value);
        }
        Ok(store)
    }

    /// Builds a store from compressed sparse row arrays.
    pub fn from_csr(
        rows: usize,
        cols: usize,
        row_ptr: &[usize],
        col_idx: &[usize],
        values: &[N],
    ) -> CoreResult<Self> {
        ensure_dim("from_csr row_ptr", rows + 1, row_ptr.len())?;
        ensure_dim("from_csr values", col_idx.len(), values.len())?;
        let nnz = row_ptr.last().copied().unwrap_or(0);
        ensure_dim("from_csr col_idx", nnz, col_idx.len())?;
        if row_ptr.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(Error::InvalidArgument(
                "CSR row_ptr must be non-decreasing".into(),
            ));
        }
        let mut store = SparseStore::new(rows, cols);
        for row in 0..rows {
            for index in row_ptr[row]..row_ptr[row + 1] {
                let col = col_idx[index];
                store.check_bounds(row, col)?;
                store.add(row, col, values[index]);
            }
        }
        Ok(store)
    }

    fn check_bounds(&self, row: usize, col: usize) -> CoreResult<()> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                bound: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                bound: self.cols,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn count_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn count_columns(&self) -> usize {
        self.cols
    }

    #[inline]
    fn key(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> N {
        self.elements
            .get(&self.key(row, col))
            .copied()
            .unwrap_or_else(N::zero)
    }

    /// Stores `value`; an explicit zero removes the entry but leaves the
    /// row bounds as they were.
    pub fn set(&mut self, row: usize, col: usize, value: N) {
        let key = self.key(row, col);
        if value.is_zero() {
            self.elements.remove(&key);
        } else {
            self.elements.insert(key, value);
            self.widen(row, col);
        }
    }

    pub fn add(&mut self, row: usize, col: usize, addend: N) {
        let updated = self.get(row, col) + addend;
        self.set(row, col, updated);
    }

    fn widen(&mut self, row: usize, col: usize) {
        self.first[row] = self.first[row].min(col);
        self.limit[row] = self.limit[row].max(col + 1);
    }

    /// Number of stored nonzeros.
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    /// `(row, col, value)` for every stored nonzero, in row-major order.
    pub fn nonzeros(&self) -> impl Iterator<Item = (usize, usize, N)> + '_ {
        let cols = self.cols;
        self.elements
            .iter()
            .map(move |(&key, &value)| (key / cols, key % cols, value))
    }

    /// The stored nonzeros of `row`, in column order.
    pub fn row_nonzeros(&self, row: usize) -> impl Iterator<Item = (usize, N)> + '_ {
        let start = row * self.cols;
        let cols = self.cols;
        self.elements
            .range(start..start + cols)
            .map(move |(&key, &value)| (key - start, value))
    }

    /// Nonzeros grouped by column, each group in ascending row order.
    pub(crate) fn column_entries(&self) -> Vec<Vec<(usize, N)>> {
        let mut columns = vec![Vec::new(); self.cols];
        for (row, col, value) in self.nonzeros() {
            columns[col].push((row, value));
        }
        columns
    }

    pub fn to_dense(&self) -> DenseStore<N> {
        DenseStore::copy_of(self)
    }

    /// `self · right` into a new dense store.
    pub fn multiply(&self, right: &dyn MatrixView<N>) -> CoreResult<DenseStore<N>> {
        let mut product = DenseStore::zeros(self.rows, right.count_columns());
        product.fill_by_multiplying(self, right)?;
        Ok(product)
    }

    pub fn aggregate_all(&self, aggregator: Aggregator) -> N {
        if aggregator.ignores_zeros() {
            aggregator.over(self.elements.values().copied())
        } else {
            aggregate::aggregate_all(self, aggregator)
        }
    }

    /// One aggregate per row; sums accumulate straight from the nonzeros.
    pub fn reduce_rows(&self, aggregator: Aggregator) -> DenseStore<N> {
        if aggregator != Aggregator::Sum {
            debug!(?aggregator, "sparse reduce_rows falls back to dense");
            return aggregate::reduce_rows(self, aggregator);
        }
        let mut sums = DenseStore::zeros(self.rows, 1);
        for (row, _, value) in self.nonzeros() {
            sums.add(row, 0, value);
        }
        sums
    }

    /// One aggregate per column; sums accumulate straight from the nonzeros.
    pub fn reduce_columns(&self, aggregator: Aggregator) -> DenseStore<N> {
        if aggregator != Aggregator::Sum {
            debug!(?aggregator, "sparse reduce_columns falls back to dense");
            return aggregate::reduce_columns(self, aggregator);
        }
        let mut sums = DenseStore::zeros(1, self.cols);
        for (_, col, value) in self.nonzeros() {
            sums.add(0, col, value);
        }
        sums
    }
}

impl<N: Scalar> MatrixView<N> for SparseStore<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        SparseStore::get(self, row, col)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.first[row]
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.limit[row]
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.nonzeros()
            .find(|&(_, c, _)| c == col)
            .map_or(self.rows, |(row, _, _)| row)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.elements
            .iter()
            .rev()
            .map(|(&key, _)| (key / self.cols, key % self.cols))
            .find(|&(_, c)| c == col)
            .map_or(0, |(row, _)| row + 1)
    }

    /// Clears `dest`, then writes the nonzeros only.
    fn supply_to(&self, dest: &mut dyn Region<N>) {
        if let RegionKind::Sparse(target) = dest.kind() {
            target.clone_from(self);
            return;
        }
        dest.reset();
        for (row, col, value) in self.nonzeros() {
            dest.set(row, col, value);
        }
    }

    fn storage(&self) -> Storage<'_, N> {
        Storage::Sparse(self)
    }
}

impl<N: Scalar> Region<N> for SparseStore<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        SparseStore::get(self, row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        SparseStore::set(self, row, col, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        SparseStore::add(self, row, col, addend)
    }

    fn fill_all(&mut self, value: N) {
        if value.is_zero() {
            self.elements.clear();
            return;
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.set(row, col, value);
            }
        }
    }

    fn reset(&mut self) {
        self.elements.clear();
        self.first.fill(self.cols);
        self.limit.fill(0);
    }

    fn fill_by_multiplying(
        &mut self,
        left: &dyn MatrixView<N>,
        right: &dyn MatrixView<N>,
    ) -> CoreResult<()> {
        check_product_shape((self.rows, self.cols), left, right)?;
        multiply::fill_sparse(self, left, right);
        Ok(())
    }

    fn kind(&mut self) -> RegionKind<'_, N> {
        RegionKind::Sparse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> SparseStore<f64> {
        SparseStore::from_triplets(4, 4, [(0, 0, 2.0), (3, 2, 5.0)]).unwrap()
    }

    #[test]
    fn occupancy_bounds_follow_writes() {
        let mut store = scenario();
        assert_eq!(store.limit_of_row(0), 1);
        assert_eq!(store.first_in_row(3), 2);
        assert_eq!(store.limit_of_row(3), 3);
        assert_eq!(store.first_in_row(1), 4);
        assert_eq!(store.limit_of_row(1), 0);
        assert_eq!(store.first_in_column(2), 3);
        assert_eq!(store.limit_of_column(0), 1);
        assert_eq!(store.first_in_column(1), 4);

        store.set(0, 3, 1.0);
        assert_eq!(store.limit_of_row(0), 4);
        store.set(0, 3, 0.0);
        assert_eq!(store.nnz(), 2);
        assert_eq!(store.limit_of_row(0), 4);
        store.reset();
        assert_eq!(store.limit_of_row(0), 0);
    }

    #[test]
    fn triplet_bounds_are_checked() {
        let err = SparseStore::<f64>::from_triplets(2, 2, [(0, 2, 1.0)]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfBounds { index: 2, bound: 2 });
        let summed = SparseStore::from_triplets(2, 2, [(1, 1, 1.0), (1, 1, 2.5)]).unwrap();
        assert_eq!(summed.get(1, 1), 3.5);
    }

    #[test]
    fn csr_input_is_validated() {
        let store = SparseStore::from_csr(2, 3, &[0, 1, 3], &[2, 0, 1], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(store.to_dense().to_row_major_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
        assert!(SparseStore::from_csr(2, 3, &[0, 2, 1], &[0, 1], &[1.0, 2.0]).is_err());
        assert!(SparseStore::from_csr(2, 3, &[0, 1, 2], &[0, 3], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn supply_resets_destination() {
        let mut dest = DenseStore::filled(4, 4, 9.0);
        scenario().supply_to(&mut dest);
        assert_eq!(dest.get(0, 0), 2.0);
        assert_eq!(dest.get(3, 2), 5.0);
        assert_eq!(dest.get(1, 1), 0.0);

        let mut other = SparseStore::new(4, 4);
        scenario().supply_to(&mut other);
        assert_eq!(other, scenario());
    }

    #[test]
    fn sum_reductions_skip_zeros() {
        let store = scenario();
        assert_eq!(store.reduce_rows(Aggregator::Sum).as_slice(), &[2.0, 0.0, 0.0, 5.0]);
        assert_eq!(store.reduce_columns(Aggregator::Sum).as_slice(), &[2.0, 0.0, 5.0, 0.0]);
        assert_eq!(store.reduce_rows(Aggregator::Maximum).as_slice(), &[2.0, 0.0, 0.0, 5.0]);
        assert_eq!(store.aggregate_all(Aggregator::Count), 2.0);
        assert_eq!(store.aggregate_all(Aggregator::Product), 0.0);
    }
}
