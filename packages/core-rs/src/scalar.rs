//! The scalar contract every store is parameterized over.
//!
//! Arithmetic comes from the standard operator traits; the rest of the
//! contract (zero/one, conjugation, magnitude, conversion to and from `f64`)
//! lives on [`Scalar`]. The kinds supported here are the two machine floats,
//! `Complex64`, `Rational64`, `rust_decimal::Decimal` and
//! [`Quaternion`](crate::quaternion::Quaternion).
//!
//! `Rational64` and `Decimal` are fixed width: an intermediate that
//! outgrows them panics like any other integer overflow.

use crate::kind::ScalarKind;
use num_complex::Complex64;
use num_rational::Rational64;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub trait Scalar:
    Copy
    + Send
    + Sync
    + PartialEq
    + Debug
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const KIND: ScalarKind;

    fn zero() -> Self;

    fn one() -> Self;

    fn conjugate(self) -> Self;

    /// Absolute value (modulus) as an `f64`.
    fn magnitude(self) -> f64;

    /// The real part as an `f64`.
    fn to_f64(self) -> f64;

    /// A real-valued scalar approximating `value`.
    fn from_f64(value: f64) -> Self;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// `true` when the magnitude does not exceed `tolerance`.
    #[inline]
    fn is_small(self, tolerance: f64) -> bool {
        self.magnitude() <= tolerance
    }

    #[inline]
    fn invert(self) -> Self {
        Self::one() / self
    }
}

macro_rules! impl_real_float {
    ($t:ty, $kind:expr) => {
        impl Scalar for $t {
            const KIND: ScalarKind = $kind;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn conjugate(self) -> Self {
                self
            }

            #[inline]
            fn magnitude(self) -> f64 {
                self.abs() as f64
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_real_float!(f32, ScalarKind::Float32);
impl_real_float!(f64, ScalarKind::Float64);

impl Scalar for Complex64 {
    const KIND: ScalarKind = ScalarKind::Complex;

    #[inline]
    fn zero() -> Self {
        <Complex64 as Zero>::zero()
    }

    #[inline]
    fn one() -> Self {
        <Complex64 as One>::one()
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
        self.re
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }
}

impl Scalar for Rational64 {
    const KIND: ScalarKind = ScalarKind::Rational;

    #[inline]
    fn zero() -> Self {
        <Rational64 as Zero>::zero()
    }

    #[inline]
    fn one() -> Self {
        <Rational64 as One>::one()
    }

    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    #[inline]
    fn magnitude(self) -> f64 {
        Scalar::to_f64(self).abs()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        *self.numer() as f64 / *self.denom() as f64
    }

    /// Non-finite input has no rational counterpart and maps to zero.
    fn from_f64(value: f64) -> Self {
        Rational64::approximate_float(value).unwrap_or_else(<Rational64 as Zero>::zero)
    }
}

impl Scalar for Decimal {
    const KIND: ScalarKind = ScalarKind::Decimal;

    #[inline]
    fn zero() -> Self {
        Decimal::ZERO
    }

    #[inline]
    fn one() -> Self {
        Decimal::ONE
    }

    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    #[inline]
    fn magnitude(self) -> f64 {
        Scalar::to_f64(self.abs())
    }

    #[inline]
    fn to_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Non-finite or out-of-range input maps to zero.
    fn from_f64(value: f64) -> Self {
        <Decimal as FromPrimitive>::from_f64(value).unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_contract() {
        assert_eq!(<f64 as Scalar>::zero(), 0.0);
        assert_eq!(Scalar::conjugate(-2.5f64), -2.5);
        assert_eq!(Scalar::magnitude(-2.5f32), 2.5);
        assert!(1e-14f64.is_small(1e-12));
        assert!(!1e-3f64.is_small(1e-12));
        assert_eq!(4.0f64.invert(), 0.25);
    }

    #[test]
    fn complex_contract() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.conjugate(), Complex64::new(3.0, -4.0));
        assert_eq!(Scalar::magnitude(z), 5.0);
        assert_eq!(Scalar::to_f64(z), 3.0);
        assert_eq!(<Complex64 as Scalar>::from_f64(2.0), Complex64::new(2.0, 0.0));
    }

    #[test]
    fn rational_contract() {
        let r = Rational64::new(-3, 4);
        assert_eq!(Scalar::to_f64(r), -0.75);
        assert_eq!(Scalar::magnitude(r), 0.75);
        assert_eq!(<Rational64 as Scalar>::from_f64(0.5), Rational64::new(1, 2));
        assert_eq!(<Rational64 as Scalar>::from_f64(f64::NAN), <Rational64 as Zero>::zero());
        assert!(Scalar::is_zero(Rational64::new(0, 5)));
    }

    #[test]
    fn decimal_contract() {
        let tenth = Decimal::new(1, 1);
        let fifth = Decimal::new(2, 1);
        assert_eq!(tenth + fifth, Decimal::new(3, 1));
        assert_eq!(Scalar::to_f64(Decimal::new(-25, 1)), -2.5);
        assert_eq!(Scalar::magnitude(Decimal::new(-25, 1)), 2.5);
        assert_eq!(<Decimal as Scalar>::from_f64(0.5), Decimal::new(5, 1));
        assert_eq!(<Decimal as Scalar>::from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(Decimal::new(4, 0).invert(), Decimal::new(25, 2));
    }
}
