use crate::aggregator::Aggregator;
use crate::error::{ensure_dim, shape_mismatch, CoreResult, Error};
use crate::function::{BinaryOp, UnaryOp};
use crate::kernel::{aggregate, modify, multiply};
use crate::pipeline::Pipeline;
use crate::region::{Region, RegionKind};
use crate::scalar::Scalar;
use crate::threading::{Op, Split};
use crate::view::{LogicalBuilder, MatrixView, Storage};

/// Column-major dense matrix: element `(row, col)` lives at
/// `row + col * rows`.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseStore<N> {
    rows: usize,
    cols: usize,
    data: Vec<N>,
}

impl<N: Scalar> DenseStore<N> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        DenseStore::filled(rows, cols, N::zero())
    }

    pub fn filled(rows: usize, cols: usize, value: N) -> Self {
        DenseStore {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut store = DenseStore::zeros(size, size);
        for i in 0..size {
            store.data[i + i * size] = N::one();
        }
        store
    }

    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> N) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for col in 0..cols {
            for row in 0..rows {
                data.push(f(row, col));
            }
        }
        DenseStore { rows, cols, data }
    }

    pub fn from_column_major(rows: usize, cols: usize, data: Vec<N>) -> CoreResult<Self> {
        ensure_dim("from_column_major", rows * cols, data.len())?;
        Ok(DenseStore { rows, cols, data })
    }

    pub fn from_row_major(rows: usize, cols: usize, data: &[N]) -> CoreResult<Self> {
        ensure_dim("from_row_major", rows * cols, data.len())?;
        Ok(DenseStore::from_fn(rows, cols, |row, col| data[row * cols + col]))
    }

    /// Builds a store from equally long rows; no rows gives a `0 × 0` store.
    pub fn from_rows<R: AsRef<[N]>>(rows: &[R]) -> CoreResult<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != cols) {
            return Err(shape_mismatch("from_rows", cols, row.as_ref().len()));
        }
        Ok(DenseStore::from_fn(rows.len(), cols, |row, col| {
            rows[row].as_ref()[col]
        }))
    }

    /// An `n × 1` store.
    pub fn column_vector(values: &[N]) -> Self {
        DenseStore {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Materializes any view by letting it push into a fresh store.
    pub fn copy_of(source: &dyn MatrixView<N>) -> Self {
        let mut store = DenseStore::zeros(source.count_rows(), source.count_columns());
        source.supply_to(&mut store);
        store
    }

    #[inline]
    pub fn count_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn count_columns(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row + col * self.rows
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> N {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: N) {
        let index = self.index(row, col);
        self.data[index] = value;
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, addend: N) {
        let index = self.index(row, col);
        self.data[index] = self.data[index] + addend;
    }

    pub fn try_get(&self, row: usize, col: usize) -> CoreResult<N> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                bound: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                bound: self.cols,
            });
        }
        Ok(self.get(row, col))
    }

    pub fn as_slice(&self) -> &[N] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [N] {
        &mut self.data
    }

    pub fn column(&self, col: usize) -> &[N] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }

    pub fn column_mut(&mut self, col: usize) -> &mut [N] {
        &mut self.data[col * self.rows..(col + 1) * self.rows]
    }

    pub fn into_column_major_vec(self) -> Vec<N> {
        self.data
    }

    pub fn to_row_major_vec(&self) -> Vec<N> {
        let mut out = Vec::with_capacity(self.data.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(self.get(row, col));
            }
        }
        out
    }

    /// Overwrites this store with `source` after checking the shapes agree.
    pub fn fill_from(&mut self, source: &dyn MatrixView<N>) -> CoreResult<()> {
        crate::view::supply(source, self)
    }

    /// Starts a logical composition rooted at this store.
    pub fn logical(&self) -> LogicalBuilder<'_, N> {
        LogicalBuilder::new(self)
    }

    /// Starts a lazy pipeline rooted at this store.
    pub fn pipe(&self) -> Pipeline<'_, N> {
        Pipeline::new(self)
    }

    pub fn transpose(&self) -> DenseStore<N> {
        DenseStore::from_fn(self.cols, self.rows, |row, col| self.get(col, row))
    }

    /// `self · right` into a new store.
    pub fn multiply(&self, right: &dyn MatrixView<N>) -> CoreResult<DenseStore<N>> {
        let mut product = DenseStore::zeros(self.rows, right.count_columns());
        product.fill_by_multiplying(self, right)?;
        Ok(product)
    }

    pub fn aggregate_all(&self, aggregator: Aggregator) -> N {
        aggregate::aggregate_all(self, aggregator)
    }

    /// One aggregate per row, as an `rows × 1` store.
    pub fn reduce_rows(&self, aggregator: Aggregator) -> DenseStore<N> {
        aggregate::reduce_rows(self, aggregator)
    }

    /// One aggregate per column, as a `1 × cols` store.
    pub fn reduce_columns(&self, aggregator: Aggregator) -> DenseStore<N> {
        aggregate::reduce_columns(self, aggregator)
    }

    pub fn modify_all_with(&mut self, split: Split, function: &UnaryOp<N>) {
        modify::modify_all_with(split, self, function);
    }
}

impl<N: Scalar> MatrixView<N> for DenseStore<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        DenseStore::get(self, row, col)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        same_shape("supply_to", self.shape(), (dest.count_rows(), dest.count_columns()));
        match dest.kind() {
            RegionKind::Dense(target) => target.data.copy_from_slice(&self.data),
            _ => dest.fill_matching(self),
        }
    }

    fn storage(&self) -> Storage<'_, N> {
        Storage::Dense(self)
    }
}

impl<N: Scalar> Region<N> for DenseStore<N> {
    fn count_rows(&self) -> usize {
        self.rows
    }

    fn count_columns(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> N {
        DenseStore::get(self, row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: N) {
        DenseStore::set(self, row, col, value)
    }

    fn add(&mut self, row: usize, col: usize, addend: N) {
        DenseStore::add(self, row, col, addend)
    }

    fn fill_all(&mut self, value: N) {
        self.data.fill(value);
    }

    fn fill_column(&mut self, col: usize, first_row: usize, value: N) {
        let rows = self.rows;
        if first_row < rows {
            self.column_mut(col)[first_row..rows].fill(value);
        }
    }

    fn fill_matching(&mut self, source: &dyn MatrixView<N>) {
        same_shape("fill_matching", self.shape(), (source.count_rows(), source.count_columns()));
        if let Storage::Dense(other) = source.storage() {
            self.data.copy_from_slice(&other.data);
            return;
        }
        let rows = self.rows;
        for (col, column) in self.data.chunks_mut(rows.max(1)).enumerate() {
            for (row, slot) in column.iter_mut().enumerate() {
                *slot = source.get(row, col);
            }
        }
    }

    fn modify_all(&mut self, function: &UnaryOp<N>) {
        modify::modify_all_with(Split::for_op(Op::Modify), self, function);
    }

    fn modify_column(&mut self, col: usize, first_row: usize, function: &UnaryOp<N>) {
        let rows = self.rows;
        if first_row < rows {
            for slot in &mut self.column_mut(col)[first_row..rows] {
                *slot = function.apply(*slot);
            }
        }
    }

    fn modify_matching(&mut self, left: &dyn MatrixView<N>, op: BinaryOp) {
        let rows = self.rows;
        for (col, column) in self.data.chunks_mut(rows.max(1)).enumerate() {
            for (row, slot) in column.iter_mut().enumerate() {
                *slot = op.apply(left.get(row, col), *slot);
            }
        }
    }

    fn modify_matching_right(&mut self, op: BinaryOp, right: &dyn MatrixView<N>) {
        let rows = self.rows;
        for (col, column) in self.data.chunks_mut(rows.max(1)).enumerate() {
            for (row, slot) in column.iter_mut().enumerate() {
                *slot = op.apply(*slot, right.get(row, col));
            }
        }
    }

    fn reset(&mut self) {
        self.data.fill(N::zero());
    }

    fn fill_by_multiplying(
        &mut self,
        left: &dyn MatrixView<N>,
        right: &dyn MatrixView<N>,
    ) -> CoreResult<()> {
        multiply::multiply_into_with(Split::for_op(Op::Multiply), self, left, right)
    }

    fn kind(&mut self) -> RegionKind<'_, N> {
        RegionKind::Dense(self)
    }
}

/// Bulk copies only agree with element reads on identical shapes; a
/// transposed shape has the same length and would copy silently.
#[track_caller]
fn same_shape(operation: &str, source: (usize, usize), dest: (usize, usize)) {
    assert_eq!(source, dest, "{operation}: shape mismatch");
}

#[cfg(feature = "ndarray")]
mod array {
    use super::DenseStore;
    use crate::scalar::Scalar;
    use ndarray::{Array2, ShapeBuilder};

    impl<N: Scalar> From<&Array2<N>> for DenseStore<N> {
        fn from(array: &Array2<N>) -> Self {
            let (rows, cols) = array.dim();
            DenseStore::from_fn(rows, cols, |row, col| array[[row, col]])
        }
    }

    impl<N: Scalar> DenseStore<N> {
        /// Copies into a Fortran-ordered array, which shares this layout.
        pub fn to_array2(&self) -> Array2<N> {
            Array2::from_shape_vec((self.rows, self.cols).f(), self.data.clone())
                .unwrap_or_else(|_| Array2::from_shape_fn((self.rows, self.cols), |(r, c)| self.get(r, c)))
        }
    }

}
