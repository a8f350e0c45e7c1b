//! Lazy elementwise and structural pipelines.
//!
//! Each stage wraps the previous one; nothing is evaluated until the
//! pipeline is read with `get`, pushed with `supply_to` or collected. Stages
//! keep no evaluation state, so a pipeline can be evaluated any number of
//! times with the same result.

use crate::aggregator::Aggregator;
use crate::dense::DenseStore;
use crate::error::{ensure_dim, CoreResult};
use crate::function::{BinaryOp, UnaryOp};
use crate::metrics::record_materialized;
use crate::region::Region;
use crate::scalar::Scalar;
use crate::view::{self, Conjugated, Mapped, MatrixView, Operated, ScalarOperated, Transposed};
use tracing::debug;

type Boxed<'a, N> = Box<dyn MatrixView<N> + 'a>;

/// One aggregate per row (an `rows × 1` result) or per column (`1 × cols`).
pub struct Reduced<'a, N: Scalar> {
    base: Boxed<'a, N>,
    aggregator: Aggregator,
    by_rows: bool,
}

impl<N: Scalar> Reduced<'_, N> {
    fn row(&self, row: usize) -> N {
        let cols = self.base.count_columns();
        self.aggregator.over((0..cols).map(|col| self.base.get(row, col)))
    }

    fn column(&self, col: usize) -> N {
        let rows = self.base.count_rows();
        self.aggregator.over((0..rows).map(|row| self.base.get(row, col)))
    }
}

impl<N: Scalar> MatrixView<N> for Reduced<'_, N> {
    fn count_rows(&self) -> usize {
        if self.by_rows {
            self.base.count_rows()
        } else {
            1
        }
    }

    fn count_columns(&self) -> usize {
        if self.by_rows {
            1
        } else {
            self.base.count_columns()
        }
    }

    fn get(&self, row: usize, col: usize) -> N {
        if self.by_rows {
            self.row(row)
        } else {
            self.column(col)
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        if self.by_rows {
            for row in 0..self.base.count_rows() {
                dest.set(row, 0, self.row(row));
            }
        } else {
            for col in 0..self.base.count_columns() {
                dest.set(0, col, self.column(col));
            }
        }
    }
}

/// An arbitrary in-place transformation applied after the base is pushed.
pub struct Transformed<'a, N: Scalar> {
    base: Boxed<'a, N>,
    transformation: Box<dyn Fn(&mut dyn Region<N>) + Send + Sync + 'a>,
}

impl<N: Scalar> MatrixView<N> for Transformed<'_, N> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    /// The transformation may touch any element, so a single read
    /// evaluates the whole stage.
    fn get(&self, row: usize, col: usize) -> N {
        let evaluated = DenseStore::copy_of(self);
        record_materialized(evaluated.count());
        debug!(rows = evaluated.count_rows(), cols = evaluated.count_columns(), "transformed read");
        evaluated.get(row, col)
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        (self.transformation)(dest);
    }
}

/// `left · right`, realised through the destination's
/// [`Region::fill_by_multiplying`].
pub struct Multiplied<'a, N: Scalar> {
    left: Boxed<'a, N>,
    right: Boxed<'a, N>,
}

impl<'a, N: Scalar> Multiplied<'a, N> {
    pub fn new(left: Boxed<'a, N>, right: Boxed<'a, N>) -> CoreResult<Self> {
        ensure_dim("multiply", left.count_columns(), right.count_rows())?;
        Ok(Multiplied { left, right })
    }
}

impl<N: Scalar> MatrixView<N> for Multiplied<'_, N> {
    fn count_rows(&self) -> usize {
        self.left.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.right.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        (0..self.left.count_columns()).fold(N::zero(), |sum, k| {
            sum + self.left.get(row, k) * self.right.get(k, col)
        })
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        // Operand shapes were checked in `new`, so only a mis-sized
        // destination can fail here.
        if let Err(err) = dest.fill_by_multiplying(&*self.left, &*self.right) {
            panic!("supply_to: {err}");
        }
    }
}

/// A lazily evaluated chain of stages rooted at some view.
pub struct Pipeline<'a, N: Scalar> {
    current: Boxed<'a, N>,
}

impl<'a, N: Scalar> Pipeline<'a, N> {
    pub fn new(view: impl MatrixView<N> + 'a) -> Self {
        Pipeline {
            current: Box::new(view),
        }
    }

    fn then(view: impl MatrixView<N> + 'a) -> Self {
        Pipeline::new(view)
    }

    /// `current ∘ scalar`.
    pub fn on_all(self, op: BinaryOp, scalar: N) -> Self {
        Self::then(ScalarOperated::right(self.current, op, scalar))
    }

    /// `current ∘ other`; shapes must agree.
    pub fn on_matching(self, op: BinaryOp, other: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::then(Operated::new(self.current, op, other)?))
    }

    pub fn on_any(self, function: UnaryOp<N>) -> Self {
        Self::then(Mapped::new(self.current, function))
    }

    pub fn transpose(self) -> Self {
        Self::then(Transposed::new(self.current))
    }

    pub fn conjugate(self) -> Self {
        Self::then(Conjugated::new(self.current))
    }

    pub fn reduce_rows(self, aggregator: Aggregator) -> Self {
        Self::then(Reduced {
            base: self.current,
            aggregator,
            by_rows: true,
        })
    }

    pub fn reduce_columns(self, aggregator: Aggregator) -> Self {
        Self::then(Reduced {
            base: self.current,
            aggregator,
            by_rows: false,
        })
    }

    /// Applies `transformation` to whatever region the pipeline is pushed
    /// into, after the upstream stages have filled it.
    pub fn transform<F>(self, transformation: F) -> Self
    where
        F: Fn(&mut dyn Region<N>) + Send + Sync + 'a,
    {
        Self::then(Transformed {
            base: self.current,
            transformation: Box::new(transformation),
        })
    }

    /// `current · right`.
    pub fn multiply(self, right: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::then(Multiplied::new(self.current, Box::new(right))?))
    }

    /// `left · current`.
    pub fn premultiply(self, left: impl MatrixView<N> + 'a) -> CoreResult<Self> {
        Ok(Self::then(Multiplied::new(Box::new(left), self.current)?))
    }

    pub fn collect(&self) -> DenseStore<N> {
        DenseStore::copy_of(&*self.current)
    }

    pub fn supply(&self, dest: &mut dyn Region<N>) -> CoreResult<()> {
        view::supply(&*self.current, dest)
    }
}

impl<N: Scalar> MatrixView<N> for Pipeline<'_, N> {
    fn count_rows(&self) -> usize {
        self.current.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.current.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.current.get(row, col)
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
}
