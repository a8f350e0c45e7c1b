use crate::kind::ScalarKind;
use thiserror::Error;

/// Canonical error codes emitted by the composition core. The codes are
/// stable so that calling layers can branch on them without matching on
/// message text.
pub mod codes {
    /// Shapes or other size-related constraints were violated.
    pub const SHAPE_MISMATCH: &str = "E_SHAPE_MISMATCH";
    /// A row/column index fell outside the addressed dimension.
    pub const INDEX_BOUNDS: &str = "E_INDEX_BOUNDS";
    /// An argument was malformed in a way not covered by the shape checks.
    pub const INVALID_ARGUMENT: &str = "E_INVALID_ARGUMENT";
    /// The requested operation is deliberately not implemented for a scalar kind.
    pub const UNSUPPORTED: &str = "E_UNSUPPORTED";
}

/// Errors raised by view construction and kernel preconditions.
///
/// Every variant is raised before the destination is touched, so a failed
/// call never leaves a partially written region behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{}: {operation}: expected {expected}, got {actual}", codes::SHAPE_MISMATCH)]
    DimensionMismatch {
        operation: &'static str,
        expected: String,
        actual: String,
    },

    #[error("{}: index {index} out of bounds for dimension of {bound}", codes::INDEX_BOUNDS)]
    IndexOutOfBounds { index: usize, bound: usize },

    #[error("{}: {0}", codes::INVALID_ARGUMENT)]
    InvalidArgument(String),

    #[error("{}: {operation} is not supported for {kind} elements", codes::UNSUPPORTED)]
    Unsupported {
        operation: &'static str,
        kind: ScalarKind,
    },
}

impl Error {
    /// The stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::DimensionMismatch { .. } => codes::SHAPE_MISMATCH,
            Error::IndexOutOfBounds { .. } => codes::INDEX_BOUNDS,
            Error::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            Error::Unsupported { .. } => codes::UNSUPPORTED,
        }
    }
}

pub type CoreResult<T> = Result<T, Error>;

/// Convenience constructor for shape mismatch style errors.
pub fn shape_mismatch(
    operation: &'static str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> Error {
    Error::DimensionMismatch {
        operation,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// Convenience constructor for operations a scalar kind cannot support.
pub fn unsupported(operation: &'static str, kind: ScalarKind) -> Error {
    Error::Unsupported { operation, kind }
}

/// Fails with [`Error::DimensionMismatch`] unless `actual == expected`.
pub(crate) fn ensure_dim(operation: &'static str, expected: usize, actual: usize) -> CoreResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(shape_mismatch(operation, expected, actual))
    }
}

/// Fails with [`Error::DimensionMismatch`] unless both shapes agree.
pub(crate) fn ensure_shape(
    operation: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> CoreResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(shape_mismatch(
            operation,
            format!("{}x{}", expected.0, expected.1),
            format!("{}x{}", actual.0, actual.1),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_lead_with_stable_codes() {
        let err = shape_mismatch("above", 3, 2);
        assert_eq!(err.code(), codes::SHAPE_MISMATCH);
        assert!(err.to_string().starts_with("E_SHAPE_MISMATCH: above"));

        let err = unsupported("tridiagonalize", ScalarKind::Rational);
        assert_eq!(err.code(), codes::UNSUPPORTED);
        assert!(err.to_string().contains("rational"));
    }

    #[test]
    fn ensure_shape_formats_both_sides() {
        let err = ensure_shape("fill_matching", (2, 3), (3, 2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "E_SHAPE_MISMATCH: fill_matching: expected 2x3, got 3x2"
        );
        assert!(ensure_dim("multiply", 4, 4).is_ok());
    }
}
