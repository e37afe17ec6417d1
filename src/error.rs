use thiserror::Error;

/// Errors produced by field and curve operations.
///
/// Defined edge cases (empty multiexp, zero scalars, identity points) are
/// handled values and never surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AlgebraError {
    /// Multiplicative inversion of the zero element.
    #[error("cannot invert the zero element")]
    ZeroInversion,

    /// Square root of a quadratic non-residue.
    #[error("element is not a quadratic residue")]
    NotASquare,

    /// Multiexp called with mismatched input lengths.
    #[error("multiexp length mismatch: {scalars} scalars vs {bases} bases")]
    LengthMismatch { scalars: usize, bases: usize },

    /// Field parameter constants failed the consistency check.
    #[error("invalid field parameters: {0}")]
    InvalidParameters(&'static str),
}
