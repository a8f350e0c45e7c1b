//! Householder reflectors `H = I - β·v·vᴴ` and their application.

use crate::dense::DenseStore;
use crate::error::{ensure_dim, CoreResult, Error};
use crate::scalar::Scalar;
use crate::threading::{divide_columns_mut, Op, Split};

/// A reflector acting on indices `first..len`; entries of `vector` before
/// `first` are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Householder<N> {
    vector: Vec<N>,
    first: usize,
    beta: N,
}

impl<N: Scalar> Householder<N> {
    pub fn new(vector: Vec<N>, first: usize, beta: N) -> Self {
        Householder {
            vector,
            first,
            beta,
        }
    }

    /// The reflector mapping `x` onto a multiple of the unit vector at
    /// `first`, zeroing `x[first + 1..]`. A tail that is already zero gives
    /// the identity (`β = 0`).
    pub fn annihilating(x: &[N], first: usize) -> Self {
        let mut vector = x.to_vec();
        let tail = &x[first.min(x.len())..];
        let norm = tail
            .iter()
            .map(|value| {
                let m = value.magnitude();
                m * m
            })
            .sum::<f64>()
            .sqrt();
        if tail.len() < 2 || norm == 0.0 {
            return Householder::new(vector, first, N::zero());
        }
        let head = tail[0];
        let head_magnitude = head.magnitude();
        let phase = if head_magnitude == 0.0 {
            N::one()
        } else {
            head * N::from_f64(1.0 / head_magnitude)
        };
        let alpha = -(phase * N::from_f64(norm));
        vector[first] = head - alpha;
        let v_norm_sqr = norm * norm + norm * head_magnitude;
        Householder::new(vector, first, N::from_f64(1.0 / v_norm_sqr))
    }

    pub fn len(&self) -> usize {
        self.vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn beta(&self) -> N {
        self.beta
    }

    pub fn vector(&self) -> &[N] {
        &self.vector
    }

    fn active(&self) -> &[N] {
        &self.vector[self.first.min(self.vector.len())..]
    }

    fn check_first(&self) -> CoreResult<()> {
        if self.first > self.vector.len() {
            return Err(Error::IndexOutOfBounds {
                index: self.first,
                bound: self.vector.len(),
            });
        }
        Ok(())
    }
}

/// `store ← H · store`.
pub fn transform_left<N: Scalar>(reflector: &Householder<N>, store: &mut DenseStore<N>) -> CoreResult<()> {
    transform_left_with(Split::for_op(Op::Householder), reflector, store)
}

pub fn transform_left_with<N: Scalar>(
    split: Split,
    reflector: &Householder<N>,
    store: &mut DenseStore<N>,
) -> CoreResult<()> {
    let (rows, cols) = store.shape();
    ensure_dim("transform_left", rows, reflector.len())?;
    reflector.check_first()?;
    if rows == 0 || cols == 0 || reflector.beta.is_zero() {
        return Ok(());
    }
    let first = reflector.first;
    let active = reflector.active();
    let beta = reflector.beta;
    divide_columns_mut(split, store.as_mut_slice(), rows, cols, |_, block| {
        for column in block.chunks_mut(rows) {
            let target = &mut column[first..];
            let mut projection = N::zero();
            for (&v, &a) in active.iter().zip(target.iter()) {
                projection = projection + v.conjugate() * a;
            }
            let scaled = beta * projection;
            for (slot, &v) in target.iter_mut().zip(active) {
                *slot = *slot - v * scaled;
            }
        }
    });
    Ok(())
}

/// `store ← store · H`.
pub fn transform_right<N: Scalar>(store: &mut DenseStore<N>, reflector: &Householder<N>) -> CoreResult<()> {
    transform_right_with(Split::for_op(Op::Householder), store, reflector)
}

pub fn transform_right_with<N: Scalar>(
    split: Split,
    store: &mut DenseStore<N>,
    reflector: &Householder<N>,
) -> CoreResult<()> {
    let (rows, cols) = store.shape();
    ensure_dim("transform_right", cols, reflector.len())?;
    reflector.check_first()?;
    if rows == 0 || cols == 0 || reflector.beta.is_zero() {
        return Ok(());
    }
    let first = reflector.first;
    let vector = &reflector.vector;
    // t = A·v over the active columns, gathered before any column changes
    let mut products = vec![N::zero(); rows];
    for (col, &v) in vector.iter().enumerate().skip(first) {
        for (slot, &a) in products.iter_mut().zip(store.column(col)) {
            *slot = *slot + a * v;
        }
    }
    let beta = reflector.beta;
    divide_columns_mut(split, store.as_mut_slice(), rows, cols, |start, block| {
        for (offset, column) in block.chunks_mut(rows).enumerate() {
            let col = start + offset;
            if col < first {
                continue;
            }
            let factor = beta * vector[col].conjugate();
            for (slot, &t) in column.iter_mut().zip(&products) {
                *slot = *slot - t * factor;
            }
        }
    });
    Ok(())
}
