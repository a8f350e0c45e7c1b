use super::MatrixView;
use crate::error::{CoreResult, Error};
use crate::scalar::Scalar;

fn check_extent(requested: usize, bound: usize) -> CoreResult<()> {
    if requested > bound {
        Err(Error::IndexOutOfBounds {
            index: requested,
            bound,
        })
    } else {
        Ok(())
    }
}

/// The part of `base` from `(row_offset, col_offset)` to its bottom-right
/// corner.
#[derive(Clone, Debug)]
pub struct Window<V> {
    base: V,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl<V> Window<V> {
    pub fn new<N: Scalar>(base: V, row_offset: usize, col_offset: usize) -> CoreResult<Self>
    where
        V: MatrixView<N>,
    {
        check_extent(row_offset, base.count_rows())?;
        check_extent(col_offset, base.count_columns())?;
        let rows = base.count_rows() - row_offset;
        let cols = base.count_columns() - col_offset;
        Ok(Window {
            base,
            row_offset,
            col_offset,
            rows,
            cols,
        })
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Window<V> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row + self.row_offset, col + self.col_offset)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.base
            .first_in_row(row + self.row_offset)
            .saturating_sub(self.col_offset)
            .min(self.cols)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.base
            .limit_of_row(row + self.row_offset)
            .saturating_sub(self.col_offset)
            .min(self.cols)
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.base
            .first_in_column(col + self.col_offset)
            .saturating_sub(self.row_offset)
            .min(self.rows)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.base
            .limit_of_column(col + self.col_offset)
            .saturating_sub(self.row_offset)
            .min(self.rows)
    }
}

/// The top-left `rows × cols` corner of `base`.
#[derive(Clone, Debug)]
pub struct Limited<V> {
    base: V,
    rows: usize,
    cols: usize,
}

impl<V> Limited<V> {
    pub fn new<N: Scalar>(base: V, rows: usize, cols: usize) -> CoreResult<Self>
    where
        V: MatrixView<N>,
    {
        check_extent(rows, base.count_rows())?;
        check_extent(cols, base.count_columns())?;
        Ok(Limited { base, rows, cols })
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Limited<V> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row, col)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.base.first_in_row(row).min(self.cols)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.base.limit_of_row(row).min(self.cols)
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.base.first_in_column(col).min(self.rows)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.base.limit_of_column(col).min(self.rows)
    }
}
