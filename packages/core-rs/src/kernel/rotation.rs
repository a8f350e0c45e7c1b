//! Givens rotations in the `(low, high)` plane.

use crate::dense::DenseStore;
use crate::error::{CoreResult, Error};
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, divide_pair_mut, Op, Split};

/// `G = [[c, s], [-conj(s), c]]` acting on indices `low` and `high`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation<N> {
    pub low: usize,
    pub high: usize,
    pub cos: N,
    pub sin: N,
}

impl<N: Scalar> Rotation<N> {
    pub fn new(low: usize, high: usize, cos: N, sin: N) -> Self {
        Rotation {
            low,
            high,
            cos,
            sin,
        }
    }

    /// The rotation with `G · [a, b]ᵀ = [r, 0]ᵀ` for commutative kinds.
    pub fn annihilating(low: usize, high: usize, a: N, b: N) -> Self {
        let (ma, mb) = (a.magnitude(), b.magnitude());
        let rho = ma.hypot(mb);
        if mb == 0.0 {
            return Rotation::new(low, high, N::one(), N::zero());
        }
        if ma == 0.0 {
            return Rotation::new(low, high, N::zero(), b.conjugate() * N::from_f64(1.0 / mb));
        }
        let phase = a * N::from_f64(1.0 / ma);
        Rotation::new(
            low,
            high,
            N::from_f64(ma / rho),
            phase * b.conjugate() * N::from_f64(1.0 / rho),
        )
    }

    pub fn transpose(self) -> Self {
        Rotation::new(self.low, self.high, self.cos, -self.sin)
    }

    fn check(&self, extent: usize, operation: &'static str) -> CoreResult<()> {
        for index in [self.low, self.high] {
            if index >= extent {
                return Err(Error::IndexOutOfBounds {
                    index,
                    bound: extent,
                });
            }
        }
        if self.low == self.high {
            return Err(Error::InvalidArgument(format!(
                "{operation}: rotation plane needs two distinct indices, got {}",
                self.low
            )));
        }
        Ok(())
    }
}

/// Rotates rows `low` and `high`: `store ← G · store`.
pub fn rotate_left<N: Scalar>(rotation: &Rotation<N>, store: &mut DenseStore<N>) -> CoreResult<()> {
    rotate_left_with(Split::for_op(Op::Rotate), rotation, store)
}

pub fn rotate_left_with<N: Scalar>(
    split: Split,
    rotation: &Rotation<N>,
    store: &mut DenseStore<N>,
) -> CoreResult<()> {
    let (rows, cols) = store.shape();
    rotation.check(rows, "rotate_left")?;
    if cols == 0 {
        return Ok(());
    }
    let Rotation {
        low,
        high,
        cos,
        sin,
    } = *rotation;
    let sin_conj = sin.conjugate();
    divide_columns_mut(split, store.as_mut_slice(), rows, cols, |_, block| {
        for column in block.chunks_mut(rows) {
            let (a, b) = (column[low], column[high]);
            column[low] = cos * a + sin * b;
            column[high] = cos * b - sin_conj * a;
        }
    });
    Ok(())
}

/// Rotates columns `low` and `high`: `store ← store · Gᴴ`.
pub fn rotate_right<N: Scalar>(store: &mut DenseStore<N>, rotation: &Rotation<N>) -> CoreResult<()> {
    rotate_right_with(Split::for_op(Op::Rotate), store, rotation)
}

pub fn rotate_right_with<N: Scalar>(
    split: Split,
    store: &mut DenseStore<N>,
    rotation: &Rotation<N>,
) -> CoreResult<()> {
    let (rows, cols) = store.shape();
    rotation.check(cols, "rotate_right")?;
    if rows == 0 {
        return Ok(());
    }
    let Rotation {
        low,
        high,
        cos,
        sin,
    } = *rotation;
    let (lower, upper) = (low.min(high), low.max(high));
    let (head, tail) = store.as_mut_slice().split_at_mut(upper * rows);
    let first = &mut head[lower * rows..(lower + 1) * rows];
    let second = &mut tail[..rows];
    let (low_column, high_column) = if low < high {
        (first, second)
    } else {
        (second, first)
    };
    let sin_conj = sin.conjugate();
    divide_pair_mut(split, low_column, high_column, |_, lows, highs| {
        for (l, h) in lows.iter_mut().zip(highs.iter_mut()) {
            let (a, b) = (*l, *h);
            *l = a * cos + b * sin_conj;
            *h = b * cos - a * sin;
        }
    });
    Ok(())
}
