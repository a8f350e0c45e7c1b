//! Elementwise operator views: binary with another view, binary with a
//! scalar, and unary.

use super::MatrixView;
use crate::error::{ensure_shape, CoreResult};
use crate::function::{BinaryOp, UnaryOp};
use crate::region::Region;
use crate::scalar::Scalar;

/// How an elementwise result's nonzeros relate to its operands'.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    Union,
    Intersection,
    Dense,
}

fn pattern(op: BinaryOp) -> Pattern {
    match op {
        BinaryOp::Add | BinaryOp::Subtract => Pattern::Union,
        BinaryOp::Multiply => Pattern::Intersection,
        BinaryOp::Divide => Pattern::Dense,
    }
}

fn combine_first(pattern: Pattern, left: usize, right: usize) -> usize {
    match pattern {
        Pattern::Union => left.min(right),
        Pattern::Intersection => left.max(right),
        Pattern::Dense => 0,
    }
}

fn combine_limit(pattern: Pattern, left: usize, right: usize, extent: usize) -> usize {
    match pattern {
        Pattern::Union => left.max(right),
        Pattern::Intersection => left.min(right),
        Pattern::Dense => extent,
    }
}

/// `left[i,j] ∘ right[i,j]` for two views of the same shape.
#[derive(Clone, Debug)]
pub struct Operated<A, B> {
    left: A,
    op: BinaryOp,
    right: B,
}

impl<A, B> Operated<A, B> {
    pub fn new<N: Scalar>(left: A, op: BinaryOp, right: B) -> CoreResult<Self>
    where
        A: MatrixView<N>,
        B: MatrixView<N>,
    {
        ensure_shape(
            "on_matching",
            (left.count_rows(), left.count_columns()),
            (right.count_rows(), right.count_columns()),
        )?;
        Ok(Operated { left, op, right })
    }
}

impl<N: Scalar, A: MatrixView<N>, B: MatrixView<N>> MatrixView<N> for Operated<A, B> {
    fn count_rows(&self) -> usize {
        self.left.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.left.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.op.apply(self.left.get(row, col), self.right.get(row, col))
    }

    fn first_in_row(&self, row: usize) -> usize {
        combine_first(
            pattern(self.op),
            self.left.first_in_row(row),
            self.right.first_in_row(row),
        )
    }

    fn limit_of_row(&self, row: usize) -> usize {
        combine_limit(
            pattern(self.op),
            self.left.limit_of_row(row),
            self.right.limit_of_row(row),
            self.count_columns(),
        )
    }

    fn first_in_column(&self, col: usize) -> usize {
        combine_first(
            pattern(self.op),
            self.left.first_in_column(col),
            self.right.first_in_column(col),
        )
    }

    fn limit_of_column(&self, col: usize) -> usize {
        combine_limit(
            pattern(self.op),
            self.left.limit_of_column(col),
            self.right.limit_of_column(col),
            self.count_rows(),
        )
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.left.supply_to(dest);
        dest.modify_matching_right(self.op, &self.right);
    }
}

/// A view combined elementwise with one scalar, which may be either
/// operand.
#[derive(Clone, Debug)]
pub struct ScalarOperated<V, N> {
    base: V,
    op: BinaryOp,
    scalar: N,
    scalar_first: bool,
}

impl<V, N: Scalar> ScalarOperated<V, N> {
    /// `base[i,j] ∘ scalar`.
    pub fn right(base: V, op: BinaryOp, scalar: N) -> Self {
        ScalarOperated {
            base,
            op,
            scalar,
            scalar_first: false,
        }
    }

    /// `scalar ∘ base[i,j]`.
    pub fn left(scalar: N, op: BinaryOp, base: V) -> Self {
        ScalarOperated {
            base,
            op,
            scalar,
            scalar_first: true,
        }
    }

    fn apply(&self, value: N) -> N {
        if self.scalar_first {
            self.op.apply(self.scalar, value)
        } else {
            self.op.apply(value, self.scalar)
        }
    }

    fn keeps_zeros(&self) -> bool {
        match self.op {
            BinaryOp::Multiply => true,
            BinaryOp::Divide => !self.scalar_first,
            BinaryOp::Add | BinaryOp::Subtract => self.scalar.is_zero(),
        }
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for ScalarOperated<V, N> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.apply(self.base.get(row, col))
    }

    fn first_in_row(&self, row: usize) -> usize {
        if self.keeps_zeros() {
            self.base.first_in_row(row)
        } else {
            0
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        if self.keeps_zeros() {
            self.base.limit_of_row(row)
        } else {
            self.count_columns()
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        if self.keeps_zeros() {
            self.base.first_in_column(col)
        } else {
            0
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        if self.keeps_zeros() {
            self.base.limit_of_column(col)
        } else {
            self.count_rows()
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        let (op, scalar) = (self.op, self.scalar);
        let function = if self.scalar_first {
            UnaryOp::custom(move |value: N| op.apply(scalar, value))
        } else {
            UnaryOp::custom(move |value: N| op.apply(value, scalar))
        };
        dest.modify_all(&function);
    }
}

/// `function(base[i,j])`.
#[derive(Clone, Debug)]
pub struct Mapped<V, N> {
    base: V,
    function: UnaryOp<N>,
    keeps_zeros: bool,
}

impl<V, N: Scalar> Mapped<V, N> {
    pub fn new(base: V, function: UnaryOp<N>) -> Self {
        let keeps_zeros = function.preserves_zeros();
        Mapped {
            base,
            function,
            keeps_zeros,
        }
    }
}

impl<N: Scalar, V: MatrixView<N>> MatrixView<N> for Mapped<V, N> {
    fn count_rows(&self) -> usize {
        self.base.count_rows()
    }

    fn count_columns(&self) -> usize {
        self.base.count_columns()
    }

    fn get(&self, row: usize, col: usize) -> N {
        self.function.apply(self.base.get(row, col))
    }

    fn first_in_row(&self, row: usize) -> usize {
        if self.keeps_zeros {
            self.base.first_in_row(row)
        } else {
            0
        }
    }

    fn limit_of_row(&self, row: usize) -> usize {
        if self.keeps_zeros {
            self.base.limit_of_row(row)
        } else {
            self.count_columns()
        }
    }

    fn first_in_column(&self, col: usize) -> usize {
        if self.keeps_zeros {
            self.base.first_in_column(col)
        } else {
            0
        }
    }

    fn limit_of_column(&self, col: usize) -> usize {
        if self.keeps_zeros {
            self.base.limit_of_column(col)
        } else {
            self.count_rows()
        }
    }

    fn supply_to(&self, dest: &mut dyn Region<N>) {
        self.base.supply_to(dest);
        dest.modify_all(&self.function);
    }
}
