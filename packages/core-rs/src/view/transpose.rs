use super::MatrixView;
use crate::function::UnaryOp;
use crate::region::{Region, RegionExt};
use crate::scalar::Scalar;

#[derive(Clone, Debug)]
pub struct Transposed<V> {
    base: V,
}

impl<V> Transposed<V> {
    pub fn new(base: V) -> Self {
        Transposed { base }
    }

    pub fn into_inner(self) -> V {
        self.base
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Transposed<V> {
    fn count_rows(&self) -> usize {
        self.base.count_columns()
    }

    fn count_columns(&self) -> usize {
        self.base.count_rows()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(col, row)
    }

    fn double_value(&self, row: usize, col: usize) -> f64 {
        self.base.double_value(col, row)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.base.first_in_column(row)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.base.limit_of_column(row)
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.base.first_in_row(col)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.base.limit_of_row(col)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(&mut dest.region_by_transposing());
    }
}

/// Elementwise conjugate; a no-op wrapper for real kinds.
#[derive(Clone, Debug)]
pub struct Conjugated<V> {
    base: V,
}

impl<V> Conjugated<V> {
    pub fn new(base: V) -> Self {
        Conjugated { base }
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Conjugated<V> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.base.get(row, col).conjugate()
    }

    fn double_value(&self, row: usize, col: usize) -> f64 {
        self.base.double_value(row, col)
    }

    fn first_in_row(&self, row: usize) -> usize {
        self.base.first_in_row(row)
    }

    fn limit_of_row(&self, row: usize) -> usize {
        self.base.limit_of_row(row)
    }

    fn first_in_column(&self, col: usize) -> usize {
        self.base.first_in_column(col)
    }

    fn limit_of_column(&self, col: usize) -> usize {
        self.base.limit_of_column(col)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        if !N::KIND.is_real() {
            dest.modify_all(&UnaryOp::Conjugate);
        }
    }
}
