//! # SPN - Sum-Product Networks with Exact Inference
//!
//! Build probability models from elementary distributions with three
//! operations, bind them to a symbol, and ask exact questions:
//!
//! - **scale**: attach a mixture weight to a term
//! - **mix**: combine weighted terms into a mixture; once the weights reach
//!   1 the mixture is closed
//! - **product**: combine terms over disjoint symbols independently
//! - **bind**: finalize a term into an immutable [`Spn`] graph
//! - **probability**: the exact probability of an [`Event`], computed in log
//!   space by structural recursion
//!
//! Every combination is checked when it is made. An illegal one fails at
//! once with a [`SpnError`]; nothing is deferred to query time.
//!
//! ## Example: A Mixture Model
//!
//! ```rust
//! use spn::{bind, families, mix, probability, scale, Symbol};
//!
//! let x = Symbol::new("X");
//! let term = mix(
//!     scale(0.3, families::rv_discrete(&[1.0, 2.0], &[0.5, 0.5]).unwrap()).unwrap(),
//!     scale(0.7, families::poisson(2.0).unwrap()).unwrap(),
//! ).unwrap();
//! let model = bind(&term, &x).unwrap();
//!
//! let p = probability(&model, &x.le(2.0)).unwrap();
//! assert!(p > 0.3 && p < 1.0);
//! ```
//!
//! ## Example: Independent Variables
//!
//! ```rust
//! use spn::{bind, event, families, probability, product, Symbol};
//!
//! let x = Symbol::new("X");
//! let y = Symbol::new("Y");
//! let joint = product(
//!     families::bernoulli(0.5).unwrap().on(&x).unwrap(),
//!     families::choice([("a", 0.2), ("b", 0.8)]).unwrap().on(&y).unwrap(),
//! ).unwrap();
//! let model = bind(&joint, &x).unwrap();
//!
//! let e = event::logical_and([x.is_in([1]), y.is_in(["b"])]);
//! assert!((probability(&model, &e).unwrap() - 0.4).abs() < 1e-12);
//! ```
//!
//! ## Configuration
//!
//! The free functions use [`SpnConfig::default`]. Build an [`Engine`] to
//! change the weight tolerance or the depth limit.

pub mod algebra;
pub mod bind;
pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod families;
pub mod graph;
pub mod term;
pub mod trace;

pub use spn_core::{event, CmpOp, Event, Outcomes, Scope, Symbol, Value};
pub use spn_prob::{Distribution, Kind};

pub use config::SpnConfig;
pub use engine::Engine;
pub use error::SpnError;
pub use evaluate::logsumexp;
pub use graph::{LeafNode, ProductNode, Spn, SumNode};
pub use term::{LeafTerm, Mixture, ProductTerm, Term, WeightedTerm};
pub use trace::EvalTrace;

/// [`Engine::scale`] with the default configuration.
pub fn scale(weight: f64, term: Term) -> Result<Term, SpnError> {
    Engine::default().scale(weight, term)
}

/// [`Engine::mix`] with the default configuration.
pub fn mix(a: Term, b: Term) -> Result<Term, SpnError> {
    Engine::default().mix(a, b)
}

/// [`Engine::mixture`] with the default configuration.
pub fn mixture(terms: impl IntoIterator<Item = Term>) -> Result<Term, SpnError> {
    Engine::default().mixture(terms)
}

/// [`Engine::product`] with the default configuration.
pub fn product(a: Term, b: Term) -> Result<Term, SpnError> {
    Engine::default().product(a, b)
}

/// [`Engine::bind`] with the default configuration.
pub fn bind(term: &Term, symbol: &Symbol) -> Result<Spn, SpnError> {
    Engine::default().bind(term, symbol)
}

/// [`Engine::probability`] with the default configuration.
pub fn probability(spn: &Spn, event: &Event) -> Result<f64, SpnError> {
    Engine::default().probability(spn, event)
}

/// [`Engine::log_probability`] with the default configuration.
pub fn log_probability(spn: &Spn, event: &Event) -> Result<f64, SpnError> {
    Engine::default().log_probability(spn, event)
}

/// [`Engine::condition`] with the default configuration.
pub fn condition(spn: &Spn, event: &Event) -> Result<Spn, SpnError> {
    Engine::default().condition(spn, event)
}

/// [`Engine::explain`] with the default configuration.
pub fn explain(spn: &Spn, event: &Event) -> Result<EvalTrace, SpnError> {
    Engine::default().explain(spn, event)
}
