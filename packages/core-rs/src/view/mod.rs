//! The two-dimensional read contract and the logical views built on it.
//!
//! A [`MatrixView`] answers shape, element and occupancy queries and can
//! push its contents into any [`Region`]. Physical stores implement it over
//! their own memory; every other view here is a decorator holding borrowed
//! references to its bases and computing elements on demand.

pub mod builder;
mod diagonal;
mod operate;
mod placeholder;
mod repeat;
mod select;
mod stack;
mod superimpose;
mod transpose;
mod triangular;
mod window;
mod wrap;

pub use builder::LogicalBuilder;
pub use diagonal::{DiagonalEmbed, DiagonalSlice};
pub use operate::{Mapped, Operated, ScalarOperated};
pub use placeholder::{Constant, Identity, Zero};
pub use repeat::Repeated;
pub use select::{ColumnsSelected, RowsSelected};
pub use stack::{Above, Left};
pub use superimpose::Superimposed;
pub use transpose::{Conjugated, Transposed};
pub use triangular::Triangular;
pub use window::{Limited, Window};
pub use wrap::Wrapped;

use crate::dense::DenseStore;
use crate::error::{ensure_shape, CoreResult};
use crate::region::Region;
use crate::scalar::Scalar;
use crate::sparse::SparseStore;
use std::sync::Arc;

/// Absolute tolerance used by [`MatrixView::is_hermitian`] and
/// [`MatrixView::is_normal`].
pub const STRUCTURE_TOLERANCE: f64 = 1e-12;

/// What a view is backed by, for callers that pick a faster path on
/// physical stores.
pub enum Storage<'a, N: Scalar> {
    Dense(&'a DenseStore<N>),
    Sparse(&'a SparseStore<N>),
    Logical,
}

impl<N: Scalar> Storage<'_, N> {
    pub fn is_dense(&self) -> bool {
        matches!(self, Storage::Dense(_))
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Storage::Sparse(_))
    }
}

pub trait MatrixView<N: Scalar>: Send + Sync {
    fn count_rows(&self) -> usize;

    fn count_columns(&self) -> usize;

    /// The element at `(row, col)`. Indices must lie inside the view.
    fn get(&self, row: usize, col: usize) -> N;

    fn double_value(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).to_f64()
    }

    fn count(&self) -> usize {
        self.count_rows() * self.count_columns()
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Lower bound on the first column of `row` that may hold a nonzero.
    fn first_in_row(&self, _row: usize) -> usize {
        0
    }

    /// Upper bound (exclusive) on the columns of `row` that may hold a
    /// nonzero.
    fn limit_of_row(&self, _row: usize) -> usize {
        self.count_columns()
    }

    fn first_in_column(&self, _col: usize) -> usize {
        0
    }

    fn limit_of_column(&self, _col: usize) -> usize {
        self.count_rows()
    }

    /// Writes every element of this view into `dest`, which must have the
    /// same shape. Use [`supply`] for the checked form.
    fn supply_to(&self, dest: &mut dyn Region<N>) {
        for col in 0..self.count_columns() {
            for row in 0..self.count_rows() {
                dest.set(row, col, self.get(row, col));
            }
        }
    }

    fn storage(&self) -> Storage<'_, N> {
        Storage::Logical
    }

    fn is_square(&self) -> bool {
        self.count_rows() == self.count_columns()
    }

    fn is_hermitian(&self) -> bool {
        self.is_hermitian_within(STRUCTURE_TOLERANCE)
    }

    /// `A == Aᴴ` elementwise, up to an absolute `tolerance`.
    fn is_hermitian_within(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let size = self.count_rows();
        (0..size).all(|col| {
            (0..=col).all(|row| {
                (self.get(row, col) - self.get(col, row).conjugate()).is_small(tolerance)
            })
        })
    }

    fn is_normal(&self) -> bool {
        self.is_normal_within(STRUCTURE_TOLERANCE)
    }

    /// `A·Aᴴ == Aᴴ·A` elementwise, up to an absolute `tolerance`.
    fn is_normal_within(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let size = self.count_rows();
        for i in 0..size {
            for j in 0..size {
                let mut outer = N::zero();
                let mut inner = N::zero();
                for k in 0..size {
                    outer = outer + self.get(i, k) * self.get(j, k).conjugate();
                    inner = inner + self.get(k, i).conjugate() * self.get(k, j);
                }
                if !(outer - inner).is_small(tolerance) {
                    return false;
                }
            }
        }
        true
    }
}

/// Pushes `source` into `dest` after checking that their shapes agree.
pub fn supply<N: Scalar>(source: &dyn MatrixView<N>, dest: &mut dyn Region<N>) -> CoreResult<()> {
    ensure_shape(
        "supply_to",
        (source.count_rows(), source.count_columns()),
        (dest.count_rows(), dest.count_columns()),
    )?;
    source.supply_to(dest);
    Ok(())
}

macro_rules! forward_view {
    () => {
        fn count_rows(&self) -> usize {
            (**self).count_rows()
        }

        fn count_columns(&self) -> usize {
            (**self).count_columns()
        }

        fn get(&self, row: usize, col: usize) -> N {
            (**self).get(row, col)
        }

        fn double_value(&self, row: usize, col: usize) -> f64 {
            (**self).double_value(row, col)
        }

        fn count(&self) -> usize {
            (**self).count()
        }

        fn first_in_row(&self, row: usize) -> usize {
            (**self).first_in_row(row)
        }

        fn limit_of_row(&self, row: usize) -> usize {
            (**self).limit_of_row(row)
        }

        fn first_in_column(&self, col: usize) -> usize {
            (**self).first_in_column(col)
        }

        fn limit_of_column(&self, col: usize) -> usize {
            (**self).limit_of_column(col)
        }

        fn supply_to(&self, dest: &mut dyn Region<N>) {
            (**self).supply_to(dest)
        }

        fn storage(&self) -> Storage<'_, N> {
            (**self).storage()
        }
    };
}

impl<N: Scalar, T: MatrixView<N> + ?Sized> MatrixView<N> for &T {
    forward_view!();
}

impl<N: Scalar, T: MatrixView<N> + ?Sized> MatrixView<N> for Box<T> {
    forward_view!();
}

impl<N: Scalar, T: MatrixView<N> + ?Sized> MatrixView<N> for Arc<T> {
    forward_view!();
}

/// Row-major snapshot of any view, mostly for assertions and debugging.
pub fn to_row_major<N: Scalar>(view: &dyn MatrixView<N>) -> Vec<N> {
    let (rows, cols) = (view.count_rows(), view.count_columns());
    let mut out = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            out.push(view.get(row, col));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn hermitian_and_normal_checks() {
        let h = DenseStore::from_rows(&[
            [Complex64::new(2.0, 0.0), Complex64::new(1.0, 1.0)],
            [Complex64::new(1.0, -1.0), Complex64::new(3.0, 0.0)],
        ])
        .unwrap();
        assert!(h.is_hermitian());
        assert!(h.is_normal());

        let shear = DenseStore::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
        assert!(!shear.is_hermitian());
        assert!(!shear.is_normal());

        let nearly = DenseStore::from_rows(&[[1.0, 2.0], [2.0 + 1e-9, 1.0]]).unwrap();
        assert!(!nearly.is_hermitian());
        assert!(nearly.is_hermitian_within(1e-6));
    }

    #[test]
    fn checked_supply_rejects_other_shapes() {
        let source = DenseStore::<f64>::identity(3);
        let mut dest = DenseStore::<f64>::zeros(2, 3);
        let err = supply(&source, &mut dest).unwrap_err();
        assert_eq!(err.code(), crate::error::codes::SHAPE_MISMATCH);
        assert_eq!(dest, DenseStore::zeros(2, 3));
    }

    #[test]
    fn references_and_boxes_forward() {
        let store = DenseStore::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let boxed: Box<dyn MatrixView<f64> + '_> = Box::new(&store);
        assert_eq!(boxed.get(1, 0), 3.0);
        assert!(boxed.storage().is_dense());
        assert_eq!(to_row_major(&boxed), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
