//! Fluent composition of logical views.
//!
//! ```
//! use num_rs_compose::dense::DenseStore;
//! use num_rs_compose::view::{MatrixView, Zero};
//!
//! let store = DenseStore::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! let padded = store.logical().below(Zero::new(1, 3)).unwrap();
//! assert_eq!(padded.count_rows(), 3);
//! assert_eq!(padded.get(2, 1), 0.0);
//! ```

use super::{
    Above, ColumnsSelected, Conjugated, DiagonalEmbed, DiagonalSlice, Left, Limited, Mapped,
    MatrixView, Operated, Repeated, RowsSelected, ScalarOperated, Storage, Superimposed,
    Transposed, Triangular, Window,
};
use crate::dense::DenseStore;
use crate::error::CoreResult;
use crate::function::{BinaryOp, UnaryOp};
use crate::region::Region;
use crate::scalar::Scalar;

/// Wraps the view built so far; every step consumes the builder and wraps
/// the current view in one more decorator.
pub struct LogicalBuilder<'a, N: Scalar> {
    current: Box<dyn MatrixView<N> + 'a>,
}

impl<'a, N: Scalar> LogicalBuilder<'a, N> {
    pub fn new(view: impl MatrixView<N> + 'a) -> Self {
        LogicalBuilder {
            current: Box::new(view),
        }
    }

    fn wrap(view: impl MatrixView<N> + 'a) -> Self {
        LogicalBuilder::new(view)
    }

    /// Places `upper` above the current view.
    pub fn above(self, upper: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::wrap(Above::new(upper, self.current)?))
    }

    /// Places `lower` below the current view.
    pub fn below(self, lower: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::wrap(Above::new(self.current, lower)?))
    }

    /// Places `left` to the left of the current view.
    pub fn left(self, left: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::wrap(Left::new(left, self.current)?))
    }

    /// Places `right` to the right of the current view.
    pub fn right(self, right: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::wrap(Left::new(self.current, right)?))
    }

    pub fn transpose(self) -> Self {
        Self::wrap(Transposed::new(self.current))
    }

    pub fn conjugate(self) -> Self {
        Self::wrap(Conjugated::new(self.current))
    }

    /// Selects rows by index; a negative index yields a zero row.
    pub fn rows(self, rows: &[isize]) -> CoreResult<Self> {
        Ok(Self::wrap(RowsSelected::new(self.current, rows)?))
    }

    pub fn columns(self, columns: &[isize]) -> CoreResult<Self> {
        Ok(Self::wrap(ColumnsSelected::new(self.current, columns)?))
    }

    pub fn offsets(self, row_offset: usize, col_offset: usize) -> CoreResult<Self> {
        Ok(Self::wrap(Window::new(self.current, row_offset, col_offset)?))
    }

    pub fn limits(self, rows: usize, cols: usize) -> CoreResult<Self> {
        Ok(Self::wrap(Limited::new(self.current, rows, cols)?))
    }

    /// Treats the current (one-dimensional) view as a main diagonal.
    pub fn diagonal(self) -> Self {
        Self::wrap(DiagonalEmbed::new(self.current))
    }

    /// Main diagonal plus one off-diagonal, above it when `upper`.
    pub fn bidiagonal(self, off: impl MatrixView<N> + 'a, upper: bool) -> CoreResult<Self> {
        let embed = DiagonalEmbed::new(self.current);
        let embed = if upper {
            embed.with_upper(off)?
        } else {
            embed.with_lower(off)?
        };
        Ok(Self::wrap(embed))
    }

    pub fn tridiagonal(
        self,
        upper: impl MatrixView<N> + 'a,
        lower: impl MatrixView<N> + 'a,
    ) -> CoreResult<Self> {
        let embed = DiagonalEmbed::new(self.current)
            .with_upper(upper)?
            .with_lower(lower)?;
        Ok(Self::wrap(embed))
    }

    /// Keeps the main diagonal of the current view, plus its super- and
    /// sub-diagonal as flagged, and zeroes everything else.
    pub fn band(self, upper: bool, lower: bool) -> CoreResult<Self> {
        Ok(Self::wrap(DiagonalEmbed::of(self.current, upper, lower)?))
    }

    /// The `offset`-th diagonal of the current view as a column.
    pub fn diagonal_slice(self, offset: isize) -> CoreResult<Self> {
        Ok(Self::wrap(DiagonalSlice::new(self.current, offset)?))
    }

    pub fn superimpose(
        self,
        row: usize,
        col: usize,
        overlay: impl MatrixView<N> + 'a,
    ) -> CoreResult<Self> {
        Ok(Self::wrap(Superimposed::new(self.current, row, col, overlay)?))
    }

    pub fn triangular(self, upper: bool, unit: bool) -> Self {
        Self::wrap(Triangular::new(self.current, upper, unit))
    }

    pub fn repeat(self, row_reps: usize, col_reps: usize) -> Self {
        Self::wrap(Repeated::new(self.current, row_reps, col_reps))
    }

    /// `current ∘ scalar`, elementwise.
    pub fn on_all(self, op: BinaryOp, scalar: N) -> Self {
        Self::wrap(ScalarOperated::right(self.current, op, scalar))
    }

    pub fn on_any(self, function: UnaryOp<N>) -> Self {
        Self::wrap(Mapped::new(self.current, function))
    }

    /// `current ∘ other`, elementwise; shapes must agree.
    pub fn on_matching(self, op: BinaryOp, other: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::wrap(Operated::new(self.current, op, other)?))
    }

    pub fn build(self) -> Box<dyn MatrixView<N> + 'a> {
        self.current
    }

    /// Materializes the composed view into a new dense store.
    pub fn collect(&self) -> DenseStore<N> {
        DenseStore::copy_of(&*self.current)
    }

    pub fn copy(&self) -> DenseStore<N> {
        self.collect()
    }

    /// Pushes the composed view into `dest`, which must have its shape.
    pub fn supply(&self, dest: &mut dyn Region<N>) -> CoreResult<()> {
        super::supply(&*self.current, dest)
    }
}

impl<N: Scalar> MatrixView<N> for LogicalBuilder<'_, N> {
    fn count_rows(&self) -> usize {
        self.current.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.current.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.current.get(row, col)
    }

    fn double_value(&self, row: usize, col: usize) -> f64 {
        self.current.double_value(row, col)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.current.first_in_row(row)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.current.limit_of_row(row)
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.current.first_in_column(col)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.current.limit_of_column(col)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.current.supply_to(dest)
    }

    fn storage(&self) -> Storage<'_, N> {
        self.current.storage()
    }
}
