//! Row and column re-ordering views.
//!
//! Indices may repeat. A negative index selects a row (column) of zeros,
//! which lets a selection pad a matrix without a separate placeholder.

use super::MatrixView;
use crate::error::{CoreResult, Error};
use crate::scalar::Scalar;

fn check_indices(indices: &[isize], bound: usize) -> CoreResult<()> {
    match indices.iter().find(|&&index| index >= 0 && index as usize >= bound) {
        Some(&index) => Err(Error::IndexOutOfBounds {
            index: index as usize,
            bound,
        }),
        None => Ok(()),
    }
}

fn resolve(index: isize) -> Option<usize> {
    usize::try_from(index).ok()
}

#[derive(Clone, Debug)]
pub struct RowsSelected<V> {
    base: V,
    rows: Vec<isize>,
}

impl<V> RowsSelected<V> {
    pub fn new<N: Scalar>(base: V, rows: &[isize]) -> CoreResult<Self>
    where
        V: MatrixView<N>,
    {
        check_indices(rows, base.count_rows())?;
        Ok(RowsSelected {
            base,
            rows: rows.to_vec(),
        })
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for RowsSelected<V> {
    fn count_rows(&self) -> usize {
        self.rows.len()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        match resolve(self.rows[row]) {
            Some(source) => self.base.get(source, col),
            None => N::zero(),
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        match resolve(self.rows[row]) {
            Some(source) => self.base.first_in_row(source),
            None => self.count_columns(),
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        match resolve(self.rows[row]) {
            Some(source) => self.base.limit_of_row(source),
            None => 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnsSelected<V> {
    base: V,
    columns: Vec<isize>,
}

impl<V> ColumnsSelected<V> {
    pub fn new<N: Scalar>(base: V, columns: &[isize]) -> CoreResult<Self>
    where
        V: MatrixView<N>,
    {
        check_indices(columns, base.count_columns())?;
        Ok(ColumnsSelected {
            base,
            columns: columns.to_vec(),
        })
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for ColumnsSelected<V> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.columns.len()
    }

    fn get(&self, row: usize, col: usize) -> N {
        match resolve(self.columns[col]) {
            Some(source) => self.base.get(row, source),
            None => N::zero(),
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        match resolve(self.columns[col]) {
            Some(source) => self.base.first_in_column(source),
            None => self.count_rows(),
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        match resolve(self.columns[col]) {
            Some(source) => self.base.limit_of_column(source),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::view::to_row_major;

    fn base() -> DenseStore<f64> {
        DenseStore::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap()
    }

    #[test]
    fn rows_repeat_and_pad() {
        let store = base();
        let selected = RowsSelected::new(&store, &[2, -1, 2, 0]).unwrap();
        assert_eq!(
            DenseStore::copy_of(&selected).to_row_major_vec(),
            vec![5.0, 6.0, 0.0, 0.0, 5.0, 6.0, 1.0, 2.0]
        );
        assert_eq!(selected.first_in_row(1), 2);
        assert_eq!(selected.limit_of_row(1), 0);
    }

    #[test]
    fn columns_select_and_validate() {
        let store = base();
        let selected = ColumnsSelected::new(&store, &[1, 1, -3]).unwrap();
        assert_eq!(
            to_row_major(&selected),
            vec![2.0, 2.0, 0.0, 4.0, 4.0, 0.0, 6.0, 6.0, 0.0]
        );
        let err = ColumnsSelected::new(&store, &[0, 2]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfBounds { index: 2, bound: 2 });
    }
}
