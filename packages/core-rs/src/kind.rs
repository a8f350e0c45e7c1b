use std::fmt;

/// The scalar kinds a physical store can be parameterized over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Float32,
    Float64,
    Complex,
    Rational,
    Decimal,
    Quaternion,
}

impl ScalarKind {
    pub const fn size_of(self) -> usize {
        match self {
            ScalarKind::Float32 => 4,
            ScalarKind::Float64 => 8,
            ScalarKind::Complex => 16,
            ScalarKind::Rational => 16,
            ScalarKind::Decimal => 16,
            ScalarKind::Quaternion => 32,
        }
    }

    /// Real floating point kinds: the only ones where square roots and
    /// orthogonal reductions are closed over the element type.
    pub const fn is_real_float(self) -> bool {
        matches!(self, ScalarKind::Float32 | ScalarKind::Float64)
    }

    /// Whether conjugation is a no-op for this kind.
    pub const fn is_real(self) -> bool {
        matches!(
            self,
            ScalarKind::Float32
                | ScalarKind::Float64
                | ScalarKind::Rational
                | ScalarKind::Decimal
        )
    }

    /// Quaternion multiplication does not commute; everything else does.
    pub const fn is_commutative(self) -> bool {
        !matches!(self, ScalarKind::Quaternion)
    }

    /// Exact under all four operations. Decimal division rounds to 28
    /// significant digits, so only rationals qualify.
    pub const fn is_exact(self) -> bool {
        matches!(self, ScalarKind::Rational)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Complex => "complex",
            ScalarKind::Rational => "rational",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Quaternion => "quaternion",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ScalarKind::Float64.is_real_float());
        assert!(!ScalarKind::Rational.is_real_float());
        assert!(ScalarKind::Rational.is_real());
        assert!(!ScalarKind::Complex.is_real());
        assert!(!ScalarKind::Quaternion.is_commutative());
        assert!(ScalarKind::Decimal.is_real());
        assert!(!ScalarKind::Decimal.is_exact());
        assert_eq!(ScalarKind::Complex.to_string(), "complex");
    }

    #[test]
    fn sizes_match_the_element_types() {
        use crate::quaternion::Quaternion;
        use crate::scalar::Scalar;
        use num_complex::Complex64;
        use num_rational::Rational64;
        use rust_decimal::Decimal;
        use std::mem::size_of;

        fn check<N: Scalar>() {
            assert_eq!(N::KIND.size_of(), size_of::<N>(), "{}", N::KIND);
        }
        check::<f32>();
        check::<f64>();
        check::<Complex64>();
        check::<Rational64>();
        check::<Decimal>();
        check::<Quaternion>();
    }
}
