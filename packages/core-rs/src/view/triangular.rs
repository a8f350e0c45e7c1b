use super::MatrixView;
use crate::region::Region;
use crate::scalar::Scalar;

/// The upper or lower triangular part of `base`, optionally with an
/// implicit unit diagonal. Rectangular bases are allowed.
#[derive(Clone, Debug)]
pub struct Triangular<V> {
    base: V,
    upper: bool,
    unit: bool,
}

impl<V> Triangular<V> {
    pub fn new(base: V, upper: bool, unit: bool) -> Self {
        Triangular { base, upper, unit }
    }

    pub fn upper(base: V) -> Self {
        Triangular::new(base, true, false)
    }

    pub fn lower(base: V) -> Self {
        Triangular::new(base, false, false)
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Triangular<V> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        if row == col && self.unit {
            N::one()
        } else if (self.upper && row <= col) || (!self.upper && row >= col) {
            self.base.get(row, col)
        } else {
            N::zero()
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        let cols = self.count_columns();
        if self.upper {
            if row >= cols {
                cols
            } else if self.unit {
                row
            } else {
                self.base.first_in_row(row).max(row)
            }
        } else if self.unit && row < cols {
            self.base.first_in_row(row).min(row)
        } else {
            self.base.first_in_row(row)
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        let cols = self.count_columns();
        let base = self.base.limit_of_row(row);
        if self.upper {
            if row >= cols {
                0
            } else if self.unit {
                base.max(row + 1)
            } else {
                base
            }
        } else if self.unit && row < cols {
            row + 1
        } else {
            base.min(row + 1)
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        let rows = self.count_rows();
        if !self.upper {
            if col >= rows {
                rows
            } else if self.unit {
                col
            } else {
                self.base.first_in_column(col).max(col)
            }
        } else if self.unit && col < rows {
            self.base.first_in_column(col).min(col)
        } else {
            self.base.first_in_column(col)
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        let rows = self.count_rows();
        let base = self.base.limit_of_column(col);
        if !self.upper {
            if col >= rows {
                0
            } else if self.unit {
                base.max(col + 1)
            } else {
                base
            }
        } else if self.unit && col < rows {
            col + 1
        } else {
            base.min(col + 1)
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        let (rows, cols) = (self.count_rows(), self.count_columns());
        for col in 0..cols {
            if self.upper {
                dest.fill_column(col, col + 1, N::zero());
            } else {
                for row in 0..col.min(rows) {
                    dest.set(row, col, N::zero());
                }
            }
        }
        if self.unit {
            dest.fill_diagonal(0, 0, N::one());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::view::to_row_major;

    #[test]
    fn both_halves_push_what_they_read() {
        let store = DenseStore::from_fn(3, 4, |r, c| (r * 4 + c + 1) as f64);
        for upper in [true, false] {
            for unit in [true, false] {
                let view = Triangular::new(&store, upper, unit);
                let pushed = DenseStore::copy_of(&view);
                assert_eq!(pushed.to_row_major_vec(), to_row_major(&view), "{upper} {unit}");
            }
        }
        let lower = Triangular::lower(&store);
        assert_eq!(to_row_major(&lower)[..4], [1.0, 0.0, 0.0, 0.0]);
        let unit_upper = Triangular::new(&store, true, true);
        assert_eq!(unit_upper.get(2, 2), 1.0);
        assert_eq!(unit_upper.get(2, 1), 0.0);
        assert_eq!(unit_upper.get(1, 3), 8.0);
    }

    #[test]
    fn occupancy_respects_the_triangle() {
        let store = DenseStore::<f64>::filled(4, 4, 1.0);
        let upper = Triangular::upper(&store);
        assert_eq!(upper.first_in_row(2), 2);
        assert_eq!(upper.limit_of_column(1), 2);
        let lower = Triangular::lower(&store);
        assert_eq!(lower.limit_of_row(1), 2);
        assert_eq!(lower.first_in_column(3), 3);
    }
}
