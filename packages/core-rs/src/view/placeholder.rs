//! Views with no base: a constant fill, zeros and the identity.

use super::MatrixView;
use crate::region::Region;
use crate::scalar::Scalar;
use std::marker::PhantomData;

#[derive(Clone, Copy, Debug)]
pub struct Constant<N> {
    rows: usize,
    cols: usize,
    value: N,
}

impl<N: Scalar> Constant<N> {
    pub fn new(rows: usize, cols: usize, value: N) -> Self {
        Constant { rows, cols, value }
    }
}

impl<N: Scalar> MatrixView<N> for Constant<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, _row: usize, _col: usize) -> N {
        self.value
    }

    fn first_in_row(&self, _row: usize) -> usize {
        if self.value.is_zero() {
            self.cols
        } else {
            0
        }
    }

    fn limit_of_row(&self, _row: usize) -> usize {
        if self.value.is_zero() {
            0
        } else {
            self.cols
        }
    }

    fn first_in_column(&self, _col: usize) -> usize {
        if self.value.is_zero() {
            self.rows
        } else {
            0
        }
    }

    fn limit_of_column(&self, _col: usize) -> usize {
        if self.value.is_zero() {
            0
        } else {
            self.rows
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        dest.fill_all(self.value);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Zero<N> {
    rows: usize,
    cols: usize,
    marker: PhantomData<fn() -> N>,
}

impl<N: Scalar> Zero<N> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Zero {
            rows,
            cols,
            marker: PhantomData,
        }
    }
}

impl<N: Scalar> MatrixView<N> for Zero<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, _row: usize, _col: usize) -> N {
        N::zero()
    }

    fn first_in_row(&self, _row: usize) -> usize {
        self.cols
    }

    fn limit_of_row(&self, _row: usize) -> usize {
        0
    }

    fn first_in_column(&self, _col: usize) -> usize {
        self.rows
    }

    fn limit_of_column(&self, _col: usize) -> usize {
        0
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        dest.reset();
    }
}

/// Ones on the main diagonal, which may be rectangular.
#[derive(Clone, Copy, Debug)]
pub struct Identity<N> {
    rows: usize,
    cols: usize,
    marker: PhantomData<fn() -> N>,
}

impl<N: Scalar> Identity<N> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Identity {
            rows,
            cols,
            marker: PhantomData,
        }
    }

    pub fn square(size: usize) -> Self {
        Identity::new(size, size)
    }
}

impl<N: Scalar> MatrixView<N> for Identity<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        if row == col {
            N::one()
        } else {
            N::zero()
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        row.min(self.cols)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        if row < self.cols {
            row + 1
        } else {
            0
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        col.min(self.rows)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        if col < self.rows {
            col + 1
        } else {
            0
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        dest.reset();
        dest.fill_diagonal(0, 0, N::one());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::sparse::SparseStore;
    use crate::view::to_row_major;

    #[test]
    fn placeholders_push_what_they_read() {
        let identity = Identity::<f64>::new(2, 3);
        let mut dest = DenseStore::filled(2, 3, 7.0);
        identity.supply_to(&mut dest);
        assert_eq!(dest.to_row_major_vec(), to_row_major(&identity));
        assert_eq!(identity.limit_of_row(1), 2);

        let zero = Zero::<f64>::new(2, 3);
        zero.supply_to(&mut dest);
        assert_eq!(dest, DenseStore::zeros(2, 3));

        let constant = Constant::new(2, 3, 1.5);
        constant.supply_to(&mut dest);
        assert_eq!(dest, DenseStore::filled(2, 3, 1.5));
    }

    #[test]
    fn zero_into_sparse_clears_it() {
        let mut sparse = SparseStore::from_triplets(3, 3, [(1, 1, 4.0)]).unwrap();
        Zero::new(3, 3).supply_to(&mut sparse);
        assert_eq!(sparse.nnz(), 0);
        Identity::square(3).supply_to(&mut sparse);
        assert_eq!(sparse.nnz(), 3);
        assert_eq!(sparse.limit_of_row(2), 3);
    }
}
