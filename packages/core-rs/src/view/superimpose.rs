use super::MatrixView;
use crate::error::{CoreResult, Error};
use crate::function::BinaryOp;
use crate::region::{Region, RegionExt};
use crate::scalar::Scalar;

/// `base` with `overlay` added element by element, its top-left corner at
/// `(row, col)`.
#[derive(Clone, Debug)]
pub struct Superimposed<B, O> {
    base: B,
    overlay: O,
    row: usize,
    col: usize,
}

impl<B, O> Superimposed<B, O> {
    pub fn new<N: Scalar>(base: B, row: usize, col: usize, overlay: O) -> CoreResult<Self>
    where
        B: MatrixView<N>,
        O: MatrixView<N>,
    {
        let bottom = row + overlay.count_rows();
        let right = col + overlay.count_columns();
        if bottom > base.count_rows() {
            return Err(Error::IndexOutOfBounds {
                index: bottom,
                bound: base.count_rows(),
            });
        }
        if right > base.count_columns() {
            return Err(Error::IndexOutOfBounds {
                index: right,
                bound: base.count_columns(),
            });
        }
        Ok(Superimposed {
            base,
            overlay,
            row,
            col,
        })
    }
}

impl<B, O> Superimposed<B, O> {
    fn covers<N: Scalar>(&self, row: usize, col: usize) -> bool
    where
        O: MatrixView<N>,
    {
        row >= self.row
            && col >= self.col
            && row - self.row < self.overlay.count_rows()
            && col - self.col < self.overlay.count_columns()
    }
}

impl<N: Scalar, B: MatrixView<N>, O: MatrixView<N>> MatrixView<N> for Superimposed<B, O> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        let below = self.base.get(row, col);
        if self.covers::<N>(row, col) {
            below + self.overlay.get(row - self.row, col - self.col)
        } else {
            below
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        let base = self.base.first_in_row(row);
        if row < self.row || row - self.row >= self.overlay.count_rows() {
            return base;
        }
        let local = row - self.row;
        if self.overlay.limit_of_row(local) > self.overlay.first_in_row(local) {
            base.min(self.col + self.overlay.first_in_row(local))
        } else {
            base
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        let base = self.base.limit_of_row(row);
        if row < self.row || row - self.row >= self.overlay.count_rows() {
            return base;
        }
        match self.overlay.limit_of_row(row - self.row) {
            0 => base,
            limit => base.max(self.col + limit),
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        let base = self.base.first_in_column(col);
        if col < self.col || col - self.col >= self.overlay.count_columns() {
            return base;
        }
        let local = col - self.col;
        if self.overlay.limit_of_column(local) > self.overlay.first_in_column(local) {
            base.min(self.row + self.overlay.first_in_column(local))
        } else {
            base
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        let base = self.base.limit_of_column(col);
        if col < self.col || col - self.col >= self.overlay.count_columns() {
            return base;
        }
        match self.overlay.limit_of_column(col - self.col) {
            0 => base,
            limit => base.max(self.row + limit),
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        let (rows, cols) = (self.overlay.count_rows(), self.overlay.count_columns());
        let mut shifted = dest.region_by_offsets(self.row, self.col);
        let mut covered = shifted.region_by_limits(rows, cols);
        covered.modify_matching(&self.overlay, BinaryOp::Add);
    }
}
