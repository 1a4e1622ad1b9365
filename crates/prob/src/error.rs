//! Error types for leaf distributions.

use thiserror::Error;

/// Errors that can occur while constructing a leaf distribution.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbError {
    /// Probabilities don't sum to 1.
    #[error("Distribution not normalized: sum = {sum} (expected 1.0)")]
    NotNormalized { sum: f64 },

    /// Negative probability encountered.
    #[error("Negative probability encountered")]
    NegativeProbability,

    /// Empty distribution.
    #[error("Distribution cannot be empty")]
    EmptyDistribution,

    /// Values and probabilities have different lengths.
    #[error("Got {values} values but {probs} probabilities")]
    LengthMismatch { values: usize, probs: usize },

    /// The same atom appears twice in a table.
    #[error("Duplicate value in distribution table: {value}")]
    DuplicateValue { value: String },

    /// A family parameter is out of range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Truncating to a set the distribution assigns no mass to.
    #[error("Cannot truncate to a set of zero probability")]
    ZeroMass,
}

impl ProbError {
    pub(crate) fn invalid(name: &str, reason: impl ToString) -> Self {
        ProbError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
