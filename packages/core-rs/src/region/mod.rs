//! Write-side counterpart of [`MatrixView`]: a rectangle that views push
//! their elements into.
//!
//! Physical stores are regions over their own memory. The remapping
//! regions in [`remap`] own nothing and translate coordinates into a
//! mutably borrowed parent, so a composed view can fill part of a
//! destination without a temporary.

pub mod remap;

pub use remap::{ColumnsRegion, LimitRegion, OffsetRegion, RowsRegion, TransposedRegion};

use crate::dense::DenseStore;
use crate::error::{ensure_dim, ensure_shape, CoreResult};
use crate::function::{BinaryOp, UnaryOp};
use crate::kernel::multiply;
use crate::scalar::Scalar;
use crate::sparse::SparseStore;
use crate::view::MatrixView;

/// Physical backing of a region, for writers with a bulk path.
pub enum RegionKind<'a, N: Scalar> {
    Dense(&'a mut DenseStore<N>),
    Sparse(&'a mut SparseStore<N>),
    Generic,
}

pub trait Region<N: Scalar> {
    fn count_rows(&self) -> usize;

    fn count_columns(&self) -> usize;

    fn get(&self, row: usize, col: usize) -> N;

    fn set(&mut self, row: usize, col: usize, value: N);

    fn add(&mut self, row: usize, col: usize, addend: N) {
        let current = self.get(row, col);
        self.set(row, col, current + addend);
    }

    fn fill_one(&mut self, row: usize, col: usize, value: N) {
        self.set(row, col, value);
    }

    fn fill_all(&mut self, value: N) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                self.set(row, col, value);
            }
        }
    }

    /// Fills `row` from `first_col` to the last column.
    fn fill_row(&mut self, row: usize, first_col: usize, value: N) {
        for col in first_col..self.count_columns() {
            self.set(row, col, value);
        }
    }

    /// Fills `col` from `first_row` to the last row.
    fn fill_column(&mut self, col: usize, first_row: usize, value: N) {
        for row in first_row..self.count_rows() {
            self.set(row, col, value);
        }
    }

    /// Fills the diagonal starting at `(row, col)` until it leaves the region.
    fn fill_diagonal(&mut self, row: usize, col: usize, value: N) {
        let steps = self
            .count_rows()
            .saturating_sub(row)
            .min(self.count_columns().saturating_sub(col));
        for step in 0..steps {
            self.set(row + step, col + step, value);
        }
    }

    /// Copies `source`, which must have this region's shape.
    fn fill_matching(&mut self, source: &dyn MatrixView<N>) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                self.set(row, col, source.get(row, col));
            }
        }
    }

    fn modify_one(&mut self, row: usize, col: usize, function: &UnaryOp<N>) {
        let current = self.get(row, col);
        self.set(row, col, function.apply(current));
    }

    fn modify_all(&mut self, function: &UnaryOp<N>) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                self.modify_one(row, col, function);
            }
        }
    }

    fn modify_row(&mut self, row: usize, first_col: usize, function: &UnaryOp<N>) {
        for col in first_col..self.count_columns() {
            self.modify_one(row, col, function);
        }
    }

    fn modify_column(&mut self, col: usize, first_row: usize, function: &UnaryOp<N>) {
        for row in first_row..self.count_rows() {
            self.modify_one(row, col, function);
        }
    }

    fn modify_diagonal(&mut self, row: usize, col: usize, function: &UnaryOp<N>) {
        let steps = self
            .count_rows()
            .saturating_sub(row)
            .min(self.count_columns().saturating_sub(col));
        for step in 0..steps {
            self.modify_one(row + step, col + step, function);
        }
    }

    /// `self[i,j] = left[i,j] ∘ self[i,j]`.
    fn modify_matching(&mut self, left: &dyn MatrixView<N>, op: BinaryOp) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                let current = self.get(row, col);
                self.set(row, col, op.apply(left.get(row, col), current));
            }
        }
    }

    /// `self[i,j] = self[i,j] ∘ right[i,j]`.
    fn modify_matching_right(&mut self, op: BinaryOp, right: &dyn MatrixView<N>) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                let current = self.get(row, col);
                self.set(row, col, op.apply(current, right.get(row, col)));
            }
        }
    }

    fn reset(&mut self) {
        self.fill_all(N::zero());
    }

    /// Overwrites this region with `left · right`.
    ///
    /// Fails with [`Error::DimensionMismatch`](crate::error::Error) before
    /// writing anything when the shapes do not chain.
    fn fill_by_multiplying(
        &mut self,
        left: &dyn MatrixView<N>,
        right: &dyn MatrixView<N>,
    ) -> CoreResult<()> {
        check_product_shape(
            (self.count_rows(), self.count_columns()),
            left,
            right,
        )?;
        multiply::generic_into(self, left, right);
        Ok(())
    }

    fn kind(&mut self) -> RegionKind<'_, N> {
        RegionKind::Generic
    }
}

/// Validates `dest = left · right` shapes.
pub(crate) fn check_product_shape<N: Scalar>(
    dest: (usize, usize),
    left: &dyn MatrixView<N>,
    right: &dyn MatrixView<N>,
) -> CoreResult<()> {
    ensure_dim(
        "fill_by_multiplying",
        left.count_columns(),
        right.count_rows(),
    )?;
    ensure_shape(
        "fill_by_multiplying",
        (left.count_rows(), right.count_columns()),
        dest,
    )
}

/// Sub-region constructors available on every region, trait objects
/// included. Each returns a view of the parent; writes land in the parent.
pub trait RegionExt<N: Scalar>: Region<N> {
    /// The top-left `rows × cols` corner.
    fn region_by_limits(&mut self, rows: usize, cols: usize) -> LimitRegion<'_, Self> {
        LimitRegion::new::<N>(self, rows, cols)
    }

    /// Everything from `(row_offset, col_offset)` to the bottom-right corner.
    fn region_by_offsets(&mut self, row_offset: usize, col_offset: usize) -> OffsetRegion<'_, Self> {
        OffsetRegion::new::<N>(self, row_offset, col_offset)
    }

    /// Row `i` of the result is row `rows[i]` of the parent.
    fn region_by_rows(&mut self, rows: &[usize]) -> RowsRegion<'_, Self> {
        RowsRegion::new::<N>(self, rows)
    }

    fn region_by_columns(&mut self, columns: &[usize]) -> ColumnsRegion<'_, Self> {
        ColumnsRegion::new::<N>(self, columns)
    }

    fn region_by_transposing(&mut self) -> TransposedRegion<'_, Self> {
        TransposedRegion::new(self)
    }
}

impl<N: Scalar, R: Region<N> + ?Sized> RegionExt<N> for R {}
