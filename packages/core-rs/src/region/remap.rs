//! Coordinate-translating regions over a borrowed parent.

use super::Region;
use crate::scalar::Scalar;

pub struct OffsetRegion<'a, R: ?Sized> {
    base: &'a mut R,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl<'a, R: ?Sized> OffsetRegion<'a, R> {
    /// Offsets past the parent's extent give an empty region.
    pub fn new<N: Scalar>(base: &'a mut R, row_offset: usize, col_offset: usize) -> Self
    where
        R: Region<N>,
    {
        let rows = base.count_rows().saturating_sub(row_offset);
        let cols = base.count_columns().saturating_sub(col_offset);
        OffsetRegion {
            base,
            row_offset,
            col_offset,
            rows,
            cols,
        }
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> Region<N> for OffsetRegion<'_, R> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row + self.row_offset, col + self.col_offset)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        self.base
            .set(row + self.row_offset, col + self.col_offset, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        self.base
            .add(row + self.row_offset, col + self.col_offset, addend)
    }
}

pub struct LimitRegion<'a, R: ?Sized> {
    base: &'a mut R,
    rows: usize,
    cols: usize,
}

impl<'a, R: ?Sized> LimitRegion<'a, R> {
    /// Limits are clamped to the parent's extent.
    pub fn new<N: Scalar>(base: &'a mut R, rows: usize, cols: usize) -> Self
    where
        R: Region<N>,
    {
        let rows = rows.min(base.count_rows());
        let cols = cols.min(base.count_columns());
        LimitRegion { base, rows, cols }
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> Region<N> for LimitRegion<'_, R> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        self.base.set(row, col, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        self.base.add(row, col, addend)
    }
}

pub struct RowsRegion<'a, R: ?Sized> {
    base: &'a mut R,
    rows: Vec<usize>,
}

impl<'a, R: ?Sized> RowsRegion<'a, R> {
    /// Every entry of `rows` must be a row of the parent.
    pub fn new<N: Scalar>(base: &'a mut R, rows: &[usize]) -> Self
    where
        R: Region<N>,
    {
        debug_assert!(rows.iter().all(|&row| row < base.count_rows()));
        RowsRegion {
            base,
            rows: rows.to_vec(),
        }
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> Region<N> for RowsRegion<'_, R> {
    fn count_rows(&self) -> usize {
        self.rows.len()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(self.rows[row], col)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        self.base.set(self.rows[row], col, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        self.base.add(self.rows[row], col, addend)
    }
}

pub struct ColumnsRegion<'a, R: ?Sized> {
    base: &'a mut R,
    columns: Vec<usize>,
}

impl<'a, R: ?Sized> ColumnsRegion<'a, R> {
    pub fn new<N: Scalar>(base: &'a mut R, columns: &[usize]) -> Self
    where
        R: Region<N>,
    {
        debug_assert!(columns.iter().all(|&col| col < base.count_columns()));
        ColumnsRegion {
            base,
            columns: columns.to_vec(),
        }
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> Region<N> for ColumnsRegion<'_, R> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.columns.len()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row, self.columns[col])
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        self.base.set(row, self.columns[col], value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        self.base.add(row, self.columns[col], addend)
    }
}

pub struct TransposedRegion<'a, R: ?Sized> {
    base: &'a mut R,
}

impl<'a, R: ?Sized> TransposedRegion<'a, R> {
    pub fn new(base: &'a mut R) -> Self {
        TransposedRegion { base }
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> Region<N> for TransposedRegion<'_, R> {
    fn count_rows(&self) -> usize {
        self.base.count_columns()
    }

    fn count_columns(&self) -> usize {
        self.base.count_rows()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(col, row)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        self.base.set(col, row, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        self.base.add(col, row, addend)
    }

    fn fill_all(&mut self, value: N) {
        self.base.fill_all(value)
    }

    fn modify_all(&mut self, function: &crate::function::UnaryOp<N>) {
        self.base.modify_all(function)
    }

    fn reset(&mut self) {
        self.base.reset()
    }
}
