use super::{MatrixView, Storage};
use crate::region::Region;
use crate::scalar::Scalar;
use std::fmt;

enum Source<'a, N> {
    Function {
        rows: usize,
        cols: usize,
        function: Box<dyn Fn(usize, usize) -> N + Send + Sync + 'a>,
    },
    Hidden(&'a dyn MatrixView<N>),
}

/// Adapts something that is not a store into a view.
///
/// [`Wrapped::from_fn`] evaluates a closure per element.
/// [`Wrapped::hiding`] forwards to another view but reports
/// [`Storage::Logical`], which forces callers onto their generic paths.
pub struct Wrapped<'a, N> {
    source: Source<'a, N>,
}

impl<'a, N: Scalar> Wrapped<'a, N> {
    pub fn from_fn<F>(rows: usize, cols: usize, function: F) -> Self
    where
        F: Fn(usize, usize) -> N + Send + Sync + 'a,
    {
        Wrapped {
            source: Source::Function {
                rows,
                cols,
                function: Box::new(function),
            },
        }
    }

    pub fn hiding(view: &'a dyn MatrixView<N>) -> Self {
        Wrapped {
            source: Source::Hidden(view),
        }
    }
}

impl<N: Scalar> MatrixView<N> for Wrapped<'_, N> {
    fn count_rows(&self) -> usize {
        match &self.source {
            Source::Function { rows, .. } => *rows,
            Source::Hidden(view) => view.count_rows(),
        }
    }

    fn count_columns(&self) -> usize {
        match &self.source {
            Source::Function { cols, .. } => *cols,
            Source::Hidden(view) => view.count_columns(),
        }
    }

    fn get(&self, row: usize, col: usize) -> N {
        match &self.source {
            Source::Function { function, .. } => function(row, col),
            Source::Hidden(view) => view.get(row, col),
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        match &self.source {
            Source::Function { .. } => 0,
            Source::Hidden(view) => view.first_in_row(row),
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        match &self.source {
            Source::Function { cols, .. } => *cols,
            Source::Hidden(view) => view.limit_of_row(row),
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        match &self.source {
            Source::Function { .. } => 0,
            Source::Hidden(view) => view.first_in_column(col),
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        match &self.source {
            Source::Function { rows, .. } => *rows,
            Source::Hidden(view) => view.limit_of_column(col),
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        match &self.source {
            Source::Function { rows, cols, function } => {
                for col in 0..*cols {
                    for row in 0..*rows {
                        dest.set(row, col, function(row, col));
                    }
                }
            }
            Source::Hidden(view) => view.supply_to(dest),
        }
    }

    fn storage(&self) -> Storage<'_, N> {
        Storage::Logical
    }
}

impl<N> fmt::Debug for Wrapped<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Function { rows, cols, .. } => f
                .debug_struct("Wrapped")
                .field("rows", rows)
                .field("cols", cols)
                .finish_non_exhaustive(),
            Source::Hidden(_) => f.write_str("Wrapped(hidden)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::sparse::SparseStore;

    #[test]
    fn closures_become_views() {
        let hilbert = Wrapped::from_fn(3, 3, |r, c| 1.0 / (r + c + 1) as f64);
        assert!(hilbert.is_hermitian());
        let pushed = DenseStore::copy_of(&hilbert);
        assert_eq!(pushed.get(2, 2), 0.2);
        assert!(!hilbert.storage().is_dense());
    }

    #[test]
    fn hiding_keeps_values_and_occupancy() {
        let sparse = SparseStore::from_triplets(3, 3, [(2, 0, 1.0)]).unwrap();
        let hidden = Wrapped::hiding(&sparse);
        assert!(!hidden.storage().is_sparse());
        assert_eq!(hidden.limit_of_row(2), 1);
        assert_eq!(hidden.first_in_row(0), 3);
        assert_eq!(DenseStore::copy_of(&hidden), sparse.to_dense());
    }
}
