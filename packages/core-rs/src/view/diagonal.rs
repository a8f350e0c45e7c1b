//! Diagonal extraction and diagonal embedding.

use super::{Limited, MatrixView};
use crate::error::{ensure_dim, CoreResult, Error};
use crate::region::Region;
use crate::scalar::Scalar;
use std::sync::Arc;

/// Reads element `index` of a row or column vector.
fn linear<N: Scalar>(vector: &dyn MatrixView<N>, index: usize) -> N {
    if vector.count_columns() == 1 {
        vector.get(index, 0)
    } else {
        vector.get(0, index)
    }
}

/// The `offset`-th diagonal of `base` as a column vector. Positive offsets
/// select super-diagonals, negative ones sub-diagonals.
#[derive(Clone, Debug)]
pub struct DiagonalSlice<V> {
    base: V,
    row: usize,
    col: usize,
    len: usize,
}

impl<V> DiagonalSlice<V> {
    pub fn new<N: Scalar>(base: V, offset: isize) -> CoreResult<Self>
    where
        V: MatrixView<N>,
    {
        let (rows, cols) = (base.count_rows(), base.count_columns());
        let (row, col) = if offset >= 0 {
            (0, offset.unsigned_abs())
        } else {
            (offset.unsigned_abs(), 0)
        };
        if row > rows || col > cols {
            return Err(Error::IndexOutOfBounds {
                index: row.max(col),
                bound: if row > rows { rows } else { cols },
            });
        }
        let len = (rows - row).min(cols - col);
        Ok(DiagonalSlice {
            base,
            row,
            col,
            len,
        })
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for DiagonalSlice<V> {
    fn count_rows(&self) -> usize {
        self.len
    }

    fn count_columns(&self) -> usize {
        1
    }

    fn get(&self, row: usize, _col: usize) -> N {
        self.base.get(self.row + row, self.col + row)
    }
}

/// A square matrix with `main` on its diagonal and optional super- and
/// sub-diagonals. Every other element is zero.
///
/// The diagonals are one-dimensional views, either rows or columns.
pub struct DiagonalEmbed<'a, N: Scalar> {
    main: Box<dyn MatrixView<N> + 'a>,
    upper: Option<Box<dyn MatrixView<N> + 'a>>,
    lower: Option<Box<dyn MatrixView<N> + 'a>>,
    size: usize,
}

impl<'a, N: Scalar> DiagonalEmbed<'a, N> {
    pub fn new(main: impl MatrixView<N> + 'a) -> Self {
        let size = main.count();
        DiagonalEmbed {
            main: Box::new(main),
            upper: None,
            lower: None,
            size,
        }
    }

    /// The band of `base` itself: its main diagonal, plus its own super- and
    /// sub-diagonal when `upper` and `lower` ask for them. The result is
    /// square with the smaller extent of `base`.
    pub fn of(base: impl MatrixView<N> + 'a, upper: bool, lower: bool) -> CoreResult<Self> {
        let base: Arc<dyn MatrixView<N> + 'a> = Arc::new(base);
        let mut embed = DiagonalEmbed::new(DiagonalSlice::new(Arc::clone(&base), 0)?);
        let off = embed.size.saturating_sub(1);
        if embed.size > 0 && upper {
            let slice = DiagonalSlice::new(Arc::clone(&base), 1)?;
            embed = embed.with_upper(Limited::new(slice, off, 1)?)?;
        }
        if embed.size > 0 && lower {
            let slice = DiagonalSlice::new(base, -1)?;
            embed = embed.with_lower(Limited::new(slice, off, 1)?)?;
        }
        Ok(embed)
    }

    /// Adds the super-diagonal, which must hold one element fewer than the
    /// main diagonal.
    pub fn with_upper(mut self, upper: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        ensure_dim("diagonal_embed", self.size.saturating_sub(1), upper.count())?;
        self.upper = Some(Box::new(upper));
        Ok(self)
    }

    pub fn with_lower(mut self, lower: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        ensure_dim("diagonal_embed", self.size.saturating_sub(1), lower.count())?;
        self.lower = Some(Box::new(lower));
        Ok(self)
    }
}

impl<N: Scalar> MatrixView<N> for DiagonalEmbed<'_, N> {
    fn count_rows(&self) -> usize {
        self.size
    }

    fn count_columns(&self) -> usize {
        self.size
    }

    fn get(&self, row: usize, col: usize) -> N {
        if row == col {
            linear(&*self.main, row)
        } else if col == row + 1 {
            self.upper.as_ref().map_or(N::zero(), |upper| linear(&**upper, row))
        } else if row == col + 1 {
            self.lower.as_ref().map_or(N::zero(), |lower| linear(&**lower, col))
        } else {
            N::zero()
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        if self.lower.is_some() {
            row.saturating_sub(1)
        } else {
            row
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        let reach = if self.upper.is_some() { 2 } else { 1 };
        (row + reach).min(self.size)
    }

    fn first_in_column(&self, col: usize) -> usize {
        if self.upper.is_some() {
            col.saturating_sub(1)
        } else {
            col
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        let reach = if self.lower.is_some() { 2 } else { 1 };
        (col + reach).min(self.size)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        dest.reset();
        for index in 0..self.size {
            dest.set(index, index, linear(&*self.main, index));
        }
        if let Some(upper) = &self.upper {
            for index in 0..self.size.saturating_sub(1) {
                dest.set(index, index + 1, linear(&**upper, index));
            }
        }
        if let Some(lower) = &self.lower {
            for index in 0..self.size.saturating_sub(1) {
                dest.set(index + 1, index, linear(&**lower, index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::view::to_row_major;

    #[test]
    fn slices_follow_the_offset() {
        let store = DenseStore::from_fn(3, 4, |r, c| (r * 10 + c) as f64);
        let main = DiagonalSlice::new(&store, 0).unwrap();
        assert_eq!(to_row_major(&main), vec![0.0, 11.0, 22.0]);
        let upper = DiagonalSlice::new(&store, 2).unwrap();
        assert_eq!(to_row_major(&upper), vec![2.0, 13.0]);
        let lower = DiagonalSlice::new(&store, -1).unwrap();
        assert_eq!(to_row_major(&lower), vec![10.0, 21.0]);
        assert_eq!(DiagonalSlice::new(&store, 4).unwrap().count(), 0);
        assert!(DiagonalSlice::new(&store, -4).is_err());
    }

    #[test]
    fn tridiagonal_embedding() {
        let main = DenseStore::column_vector(&[1.0, 2.0, 3.0]);
        let upper = DenseStore::from_rows(&[[4.0, 5.0]]).unwrap();
        let lower = DenseStore::column_vector(&[6.0, 7.0]);
        let embedded = DiagonalEmbed::new(&main)
            .with_upper(&upper)
            .unwrap()
            .with_lower(&lower)
            .unwrap();
        let expected = vec![1.0, 4.0, 0.0, 6.0, 2.0, 5.0, 0.0, 7.0, 3.0];
        assert_eq!(to_row_major(&embedded), expected);

        let mut dest = DenseStore::filled(3, 3, 9.0);
        embedded.supply_to(&mut dest);
        assert_eq!(dest.to_row_major_vec(), expected);
        assert_eq!(embedded.first_in_row(2), 1);
        assert_eq!(embedded.limit_of_row(0), 2);
        assert_eq!(embedded.limit_of_column(2), 3);
    }

    #[test]
    fn band_of_a_base_matches_masked_copy() {
        let store = DenseStore::from_fn(4, 5, |r, c| (r * 10 + c) as f64 + 1.0);
        for (upper, lower) in [(false, false), (true, false), (false, true), (true, true)] {
            let band = DiagonalEmbed::of(&store, upper, lower).unwrap();
            let expected = DenseStore::from_fn(4, 4, |r, c| {
                let keep = r == c || (upper && c == r + 1) || (lower && r == c + 1);
                if keep {
                    store.get(r, c)
                } else {
                    0.0
                }
            });
            assert_eq!(to_row_major(&band), expected.to_row_major_vec(), "{upper} {lower}");
            let mut dest = DenseStore::filled(4, 4, -9.0);
            band.supply_to(&mut dest);
            assert_eq!(dest, expected);
        }

        let tall = DenseStore::from_fn(3, 2, |r, c| (r + c) as f64);
        let band = DiagonalEmbed::of(&tall, true, true).unwrap();
        assert_eq!(to_row_major(&band), vec![0.0, 1.0, 1.0, 2.0]);
        assert_eq!(DiagonalEmbed::of(DenseStore::<f64>::zeros(0, 3), true, true).unwrap().count(), 0);
    }

    #[test]
    fn off_diagonals_must_be_one_shorter() {
        let main = DenseStore::column_vector(&[1.0, 2.0, 3.0]);
        let err = DiagonalEmbed::new(&main).with_upper(&main).err().unwrap();
        assert_eq!(err.code(), crate::error::codes::SHAPE_MISMATCH);
    }
}
