//! Elementwise functions used by operator views, the lazy pipeline and the
//! region `modify_*` primitives.

use crate::scalar::Scalar;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// `left ∘ right`, operand order preserved.
    #[inline]
    pub fn apply<N: Scalar>(self, left: N, right: N) -> N {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
        }
    }

    /// Whether `0 ∘ x == 0 == x ∘ 0` for finite `x`, so sparsity survives.
    pub fn preserves_zeros(self) -> bool {
        matches!(self, BinaryOp::Multiply)
    }
}

pub enum UnaryOp<N> {
    Negate,
    Conjugate,
    Invert,
    Square,
    /// Magnitude as a real-valued scalar.
    Abs,
    Custom(Arc<dyn Fn(N) -> N + Send + Sync>),
}

impl<N: Scalar> UnaryOp<N> {
    pub fn custom<F>(function: F) -> Self
    where
        F: Fn(N) -> N + Send + Sync + 'static,
    {
        UnaryOp::Custom(Arc::new(function))
    }

    #[inline]
    pub fn apply(&self, value: N) -> N {
        match self {
            UnaryOp::Negate => -value,
            UnaryOp::Conjugate => value.conjugate(),
            UnaryOp::Invert => value.invert(),
            UnaryOp::Square => value * value,
            UnaryOp::Abs => N::from_f64(value.magnitude()),
            UnaryOp::Custom(function) => function(value),
        }
    }

    /// Whether `f(0) == 0`; custom functions are probed once.
    pub fn preserves_zeros(&self) -> bool {
        match self {
            UnaryOp::Invert => false,
            UnaryOp::Custom(function) => function(N::zero()).is_zero(),
            _ => true,
        }
    }
}

impl<N> Clone for UnaryOp<N> {
    fn clone(&self) -> Self {
        match self {
            UnaryOp::Negate => UnaryOp::Negate,
            UnaryOp::Conjugate => UnaryOp::Conjugate,
            UnaryOp::Invert => UnaryOp::Invert,
            UnaryOp::Square => UnaryOp::Square,
            UnaryOp::Abs => UnaryOp::Abs,
            UnaryOp::Custom(function) => UnaryOp::Custom(Arc::clone(function)),
        }
    }
}

impl<N> fmt::Debug for UnaryOp<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnaryOp::Negate => "Negate",
            UnaryOp::Conjugate => "Conjugate",
            UnaryOp::Invert => "Invert",
            UnaryOp::Square => "Square",
            UnaryOp::Abs => "Abs",
            UnaryOp::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}
