//! # Error Types
//!
//! Errors raised while solving an event against a single symbol. An event
//! can only be turned into a set of outcomes for the symbol it talks about;
//! asking it about any other symbol is undefined.

use thiserror::Error;

use crate::symbol::Symbol;

/// Core errors for the event algebra.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// The event mentions a symbol other than the one being solved for.
    #[error("Event over {found} cannot be solved for {expected}")]
    ForeignSymbol { expected: Symbol, found: Symbol },
}
