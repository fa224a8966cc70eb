use thiserror::Error;

/// Errors raised at the validation boundary of the geometry core.
///
/// The geometric queries themselves never fail: they signal "no answer" with
/// `None`, an empty `Vec`, or a best-effort value. These errors only come out
/// of the fallible constructors that turn untrusted numbers into typed values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("expected {expected} components, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("component {value} is not a finite number")]
    NonFinite { value: f64 },

    #[error("{axis} must not be negative, got {value}")]
    NegativeAxis { axis: &'static str, value: f64 },

    #[error("basis index {0} is out of range [0, 7]")]
    BasisIndexOutOfRange(usize),
}

/// Convenience type alias for results using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
