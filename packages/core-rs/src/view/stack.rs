use super::MatrixView;
use crate::error::{ensure_dim, CoreResult};
use crate::region::{Region, RegionExt};
use crate::scalar::Scalar;

/// `upper` stacked on top of `lower`; both must have the same column count.
#[derive(Clone, Debug)]
pub struct Above<A, B> {
    upper: A,
    lower: B,
    split: usize,
}

impl<A, B> Above<A, B> {
    pub fn new<N: Scalar>(upper: A, lower: B) -> CoreResult<Self>
    where
        A: MatrixView<N>,
        B: MatrixView<N>,
    {
        ensure_dim("above", upper.count_columns(), lower.count_columns())?;
        let split = upper.count_rows();
        Ok(Above {
            upper,
            lower,
            split,
        })
    }
}

impl<N: Scalar, A: MatrixView<N>, B: MatrixView<N>> MatrixView<N> for Above<A, B> {
    fn count_rows(&self) -> usize {
        self.split + self.lower.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.upper.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        if row < self.split {
            self.upper.get(row, col)
        } else {
            self.lower.get(row - self.split, col)
        }
    }

    fn double_value(&self, row: usize, col: usize) -> f64 {
        if row < self.split {
            self.upper.double_value(row, col)
        } else {
            self.lower.double_value(row - self.split, col)
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        if row < self.split {
            self.upper.first_in_row(row)
        } else {
            self.lower.first_in_row(row - self.split)
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        if row < self.split {
            self.upper.limit_of_row(row)
        } else {
            self.lower.limit_of_row(row - self.split)
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        let upper = self.upper.first_in_column(col);
        if upper < self.split {
            upper
        } else {
            self.split + self.lower.first_in_column(col)
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        let lower = self.lower.limit_of_column(col);
        if lower > 0 {
            self.split + lower
        } else {
            self.upper.limit_of_column(col)
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        let cols = self.count_columns();
        self.upper.supply_to(&mut dest.region_by_limits(self.split, cols));
        self.lower.supply_to(&mut dest.region_by_offsets(self.split, 0));
    }
}

/// `left` placed beside `right`; both must have the same row count.
#[derive(Clone, Debug)]
pub struct Left<A, B> {
    left: A,
    right: B,
    split: usize,
}

impl<A, B> Left<A, B> {
    pub fn new<N: Scalar>(left: A, right: B) -> CoreResult<Self>
    where
        A: MatrixView<N>,
        B: MatrixView<N>,
    {
        ensure_dim("left", left.count_rows(), right.count_rows())?;
        let split = left.count_columns();
        Ok(Left { left, right, split })
    }
}

impl<N: Scalar, A: MatrixView<N>, B: MatrixView<N>> MatrixView<N> for Left<A, B> {
    fn count_rows(&self) -> usize {
        self.left.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.split + self.right.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        if col < self.split {
            self.left.get(row, col)
        } else {
            self.right.get(row, col - self.split)
        }
    }

    fn double_value(&self, row: usize, col: usize) -> f64 {
        if col < self.split {
            self.left.double_value(row, col)
        } else {
            self.right.double_value(row, col - self.split)
        }
    }

    fn first_in_row(&self, row: usize) -> usize {
        let left = self.left.first_in_row(row);
        if left < self.split {
            left
        } else {
            self.split + self.right.first_in_row(row)
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        let right = self.right.limit_of_row(row);
        if right > 0 {
            self.split + right
        } else {
            self.left.limit_of_row(row)
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        if col < self.split {
            self.left.first_in_column(col)
        } else {
            self.right.first_in_column(col - self.split)
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        if col < self.split {
            self.left.limit_of_column(col)
        } else {
            self.right.limit_of_column(col - self.split)
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        let rows = self.count_rows();
        self.left.supply_to(&mut dest.region_by_limits(rows, self.split));
        self.right.supply_to(&mut dest.region_by_offsets(0, self.split));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseStore;
    use crate::error::codes;
    use crate::sparse::SparseStore;
    use crate::view::{to_row_major, Zero};

    #[test]
    fn stacking_matches_elementwise_reads() {
        let top = DenseStore::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let zero = Zero::<f64>::new(1, 3);
        let stacked = Above::new(&top, &zero).unwrap();
        assert_eq!(stacked.count_rows(), 3);
        assert_eq!(stacked.get(2, 1), 0.0);
        let pushed = DenseStore::copy_of(&stacked);
        assert_eq!(pushed.to_row_major_vec(), to_row_major(&stacked));
        assert_eq!(pushed.get(1, 2), 6.0);
    }

    #[test]
    fn mismatched_sides_fail_at_construction() {
        let a = DenseStore::<f64>::zeros(2, 3);
        let b = DenseStore::<f64>::zeros(3, 2);
        assert_eq!(Above::new(&a, &b).unwrap_err().code(), codes::SHAPE_MISMATCH);
        assert_eq!(Left::new(&a, &b).unwrap_err().code(), codes::SHAPE_MISMATCH);
    }

    #[test]
    fn empty_operands_are_identities() {
        let a = DenseStore::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let none = DenseStore::<f64>::zeros(0, 2);
        let stacked = Above::new(&none, &a).unwrap();
        assert_eq!(DenseStore::copy_of(&stacked), a);
        let nothing = DenseStore::<f64>::zeros(2, 0);
        let placed = Left::new(&a, &nothing).unwrap();
        assert_eq!(DenseStore::copy_of(&placed), a);
    }

    #[test]
    fn occupancy_translates_through_stacking() {
        let upper = SparseStore::from_triplets(2, 4, [(0, 2, 1.0)]).unwrap();
        let lower = SparseStore::from_triplets(2, 4, [(1, 1, 1.0)]).unwrap();
        let stacked = Above::new(&upper, &lower).unwrap();
        assert_eq!(stacked.first_in_row(0), 2);
        assert_eq!(stacked.limit_of_row(3), 2);
        assert_eq!(stacked.first_in_column(1), 3);
        assert_eq!(stacked.limit_of_column(2), 1);
        assert_eq!(stacked.first_in_column(0), 4);

        let placed = Left::new(&upper, &lower).unwrap();
        assert_eq!(placed.first_in_row(1), 5);
        assert_eq!(placed.limit_of_row(0), 3);
        assert_eq!(placed.limit_of_column(5), 2);
    }
}
