use super::MatrixView;
use crate::region::{Region, RegionExt};
use crate::scalar::Scalar;

/// `base` tiled `row_reps × col_reps` times.
#[derive(Clone, Debug)]
pub struct Repeated<V> {
    base: V,
    row_reps: usize,
    col_reps: usize,
}

impl<V> Repeated<V> {
    pub fn new(base: V, row_reps: usize, col_reps: usize) -> Self {
        Repeated {
            base,
            row_reps,
            col_reps,
        }
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Repeated<V> {
    fn count_rows(&self) -> usize {
        self.base.count_rows() * self.row_reps
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns() * self.col_reps
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row % self.base.count_rows(), col % self.base.count_columns())
    }

    fn first_in_row(&self, row: usize) -> usize {
        let source = row % self.base.count_rows();
        if self.base.limit_of_row(source) > self.base.first_in_row(source) {
            self.base.first_in_row(source)
        } else {
            self.count_columns()
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        match self.base.limit_of_row(row % self.base.count_rows()) {
            0 => 0,
            _ if self.col_reps == 0 => 0,
            limit => (self.col_reps - 1) * self.base.count_columns() + limit,
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        let source = col % self.base.count_columns();
        if self.base.limit_of_column(source) > self.base.first_in_column(source) {
            self.base.first_in_column(source)
        } else {
            self.count_rows()
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        match self.base.limit_of_column(col % self.base.count_columns()) {
            0 => 0,
            _ if self.row_reps == 0 => 0,
            limit => (self.row_reps - 1) * self.base.count_rows() + limit,
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        let (rows, cols) = (self.base.count_rows(), self.base.count_columns());
        for tile_col in 0..self.col_reps {
            for tile_row in 0..self.row_reps {
                let mut shifted = dest.region_by_offsets(tile_row * rows, tile_col * cols);
                self.base.supply_to(&mut shifted.region_by_limits(rows, cols));
            }
        }
    }
}
