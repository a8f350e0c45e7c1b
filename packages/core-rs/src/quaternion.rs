use crate::kind::ScalarKind;
use crate::scalar::Scalar;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Hamilton quaternion `r + i·x + j·y + k·z` over `f64`, scalar part first.
///
/// Multiplication does not commute, so kernels must keep operand order:
/// every product in this crate is written `left * right`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Quaternion {
    pub r: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Quaternion {
    pub const ZERO: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    pub const I: Quaternion = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    pub const J: Quaternion = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    pub const K: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f64, i: f64, j: f64, k: f64) -> Self {
        Quaternion { r, i, j, k }
    }

    pub const fn real(r: f64) -> Self {
        Quaternion::new(r, 0.0, 0.0, 0.0)
    }

    pub fn conj(self) -> Self {
        Quaternion::new(self.r, -self.i, -self.j, -self.k)
    }

    pub fn norm_sqr(self) -> f64 {
        self.r * self.r + self.i * self.i + self.j * self.j + self.k * self.k
    }

    pub fn norm(self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Multiplicative inverse; a zero quaternion yields non-finite parts.
    pub fn reciprocal(self) -> Self {
        let n = self.norm_sqr();
        let c = self.conj();
        Quaternion::new(c.r / n, c.i / n, c.j / n, c.k / n)
    }

    pub fn scale(self, factor: f64) -> Self {
        Quaternion::new(
            self.r * factor,
            self.i * factor,
            self.j * factor,
            self.k * factor,
        )
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.r + rhs.r,
            self.i + rhs.i,
            self.j + rhs.j,
            self.k + rhs.k,
        )
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;

    fn sub(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.r - rhs.r,
            self.i - rhs.i,
            self.j - rhs.j,
            self.k - rhs.k,
        )
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        let (a1, b1, c1, d1) = (self.r, self.i, self.j, self.k);
        let (a2, b2, c2, d2) = (rhs.r, rhs.i, rhs.j, rhs.k);
        Quaternion::new(
            a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
            a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
            a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
        )
    }
}

/// Right division: `a / b == a * b⁻¹`.
impl Div for Quaternion {
    type Output = Quaternion;

    fn div(self, rhs: Quaternion) -> Quaternion {
        self * rhs.reciprocal()
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion::new(-self.r, -self.i, -self.j, -self.k)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}i{:+}j{:+}k", self.r, self.i, self.j, self.k)
    }
}

impl Scalar for Quaternion {
    const KIND: ScalarKind = ScalarKind::Quaternion;

    #[inline]
    fn zero() -> Self {
        Quaternion::ZERO
    }

    #[inline]
    fn one() -> Self {
        Quaternion::ONE
    }

    #[inline]
    fn conjugate(self) -> Self {
        self.conj()
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.r
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        Quaternion::real(value)
    }
}
