//! # Error Types
//!
//! Every failure in the algebra or the evaluator is structural: an operand of
//! the wrong kind, symbols that do not line up, weights that do not add up,
//! or an event the model cannot answer exactly. None of them are transient,
//! and none are ever coerced into a partial result.

use spn_core::{CoreError, Scope, Symbol};
use spn_prob::ProbError;
use thiserror::Error;

/// Errors raised by the mixture algebra, binding and evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpnError {
    /// An algebra operation received an operand with the wrong tag.
    #[error("Invalid operand for {operation}: {reason}")]
    InvalidOperand {
        operation: &'static str,
        reason: String,
    },

    /// Mixed operands disagree on their symbol, or product operands share one.
    #[error("Symbol mismatch: {left} vs {right}")]
    SymbolMismatch { left: String, right: String },

    /// Accumulated mixture weight went past 1.
    #[error("Mixture weights sum to {total}, exceeding 1")]
    WeightBudgetExceeded { total: f64 },

    /// A mixture was bound before its weights reached 1.
    #[error("Mixture weights sum to {total}; a model needs exactly 1")]
    IncompleteMixture { total: f64 },

    /// The event mentions a symbol the model does not govern.
    #[error("Event references {symbol}, which the model does not govern")]
    UnboundSymbol { symbol: Symbol },

    /// The event cannot be split across a product's independent factors.
    #[error("Event cannot be evaluated exactly: {reason}")]
    UnsupportedEvent { reason: String },

    /// Structural recursion would exceed the configured depth.
    #[error("Model depth {depth} exceeds the limit of {limit}")]
    ModelTooDeep { depth: usize, limit: usize },

    /// Conditioning on an impossible event.
    #[error("Cannot condition on an event of probability zero: {event}")]
    ZeroProbability { event: String },

    /// Configuration values out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A leaf distribution rejected its parameters.
    #[error(transparent)]
    Prob(#[from] ProbError),
}

impl From<CoreError> for SpnError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ForeignSymbol { found, .. } => SpnError::UnboundSymbol { symbol: found },
        }
    }
}

/// Render a scope as `{X, Y}`.
pub(crate) fn fmt_scope(scope: &Scope) -> String {
    let names: Vec<&str> = scope.iter().map(Symbol::name).collect();
    format!("{{{}}}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_symbol_becomes_unbound() {
        let err: SpnError = CoreError::ForeignSymbol {
            expected: Symbol::new("X"),
            found: Symbol::new("Y"),
        }
        .into();
        assert_eq!(
            err,
            SpnError::UnboundSymbol {
                symbol: Symbol::new("Y")
            }
        );
    }

    #[test]
    fn test_fmt_scope() {
        let scope: Scope = [Symbol::new("Y"), Symbol::new("X")].into_iter().collect();
        assert_eq!(fmt_scope(&scope), "{X, Y}");
        assert_eq!(fmt_scope(&Scope::new()), "{}");
    }

    #[test]
    fn test_error_messages() {
        let err = SpnError::ModelTooDeep {
            depth: 10,
            limit: 4,
        };
        assert_eq!(err.to_string(), "Model depth 10 exceeds the limit of 4");
    }
}
