//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised by the vector kernel, the refinement pipeline and the
/// distance engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WassersteinError {
    /// Two operands that must have equal length do not.
    #[error("{op}: sizes are incompatible ({left} vs {right})")]
    SizeMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },

    /// Broadcast fallback requested on an empty right-hand operand.
    #[error("{op}: right-hand operand is empty, cannot broadcast")]
    InvalidOperand { op: &'static str },

    /// The statistic is undefined for this many elements.
    #[error("{op}: needs at least {needed} element(s), got {got}")]
    InsufficientData {
        op: &'static str,
        needed: usize,
        got: usize,
    },

    /// A normalization or ratio would divide by zero.
    #[error("{op}: division by zero")]
    DivisionByZero { op: &'static str },

    /// A scalar parameter is outside its admissible range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Weights were supplied for a sample that is not sorted ascending.
    #[error("weights for `{which}` require the sample to be sorted ascending")]
    UnsortedWeightedSample { which: &'static str },
}

impl WassersteinError {
    pub(crate) fn size_mismatch(op: &'static str, left: usize, right: usize) -> Self {
        Self::SizeMismatch { op, left, right }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WassersteinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size_mismatch() {
        let err = WassersteinError::size_mismatch("add", 3, 2);
        assert_eq!(err.to_string(), "add: sizes are incompatible (3 vs 2)");
    }

    #[test]
    fn test_display_invalid_parameter() {
        let err = WassersteinError::invalid_parameter("p", "must be > 0, got -1");
        assert_eq!(err.to_string(), "invalid parameter `p`: must be > 0, got -1");
    }
}
