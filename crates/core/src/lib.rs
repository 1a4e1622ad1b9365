//! # Core - Symbols and Events for Sum-Product Networks
//!
//! This crate provides the vocabulary every other crate in the workspace
//! speaks:
//!
//! - **Symbols**: opaque names for random variables, used as set and map keys
//! - **Outcomes**: interval sets and nominal sets, the solved form of an event
//! - **Events**: predicates over symbols (membership, comparisons, and/or/not)
//! - **Errors**: what goes wrong when an event is solved for the wrong symbol
//!
//! ## Design Philosophy
//!
//! Events are values. They are built without reference to any model and
//! can be checked against as many models as needed; a model only ever sees
//! the [`Outcomes`] an event admits for one of its symbols.

pub mod error;
pub mod event;
pub mod outcomes;
pub mod symbol;

// Re-export key types at crate root for convenience
pub use error::CoreError;
pub use event::{CmpOp, Event};
pub use outcomes::{Interval, IntervalSet, NominalSet, Outcomes, Value};
pub use symbol::{Scope, Symbol};
