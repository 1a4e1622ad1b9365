//! # Prob - Leaf Distributions for Sum-Product Networks
//!
//! Every leaf of a sum-product network is an elementary distribution over a
//! single symbol. This crate implements those leaves behind one capability
//! contract, the [`Distribution`] trait:
//!
//! - **Exact measures**: `prob(outcomes)` is the closed-form probability of a
//!   set of outcomes, never an estimate
//! - **Three kinds**: continuous (density), discrete (mass on reals) and
//!   nominal (mass on labels)
//! - **Families**: normal, gamma, uniform, Poisson, Bernoulli, binomial,
//!   finite tables and categorical choices
//! - **Truncation**: a distribution restricted to a set and renormalized,
//!   which is what conditioning a leaf produces
//!
//! ## Example: A Loaded Die
//!
//! ```rust
//! use spn_core::{IntervalSet, Outcomes};
//! use spn_prob::{DiscreteTable, Distribution};
//!
//! let die = DiscreteTable::new(
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     vec![0.1, 0.1, 0.1, 0.1, 0.1, 0.5],
//! ).unwrap();
//!
//! let six = Outcomes::from_reals(IntervalSet::points([6.0]));
//! assert!((die.prob(&six) - 0.5).abs() < 1e-9);
//! ```

mod continuous;
mod discrete;
mod error;
mod table;
mod truncated;

use std::fmt;

use spn_core::Outcomes;

pub use continuous::{Gamma, Normal, Uniform};
pub use discrete::{Bernoulli, Binomial, Poisson};
pub use error::ProbError;
pub use table::{Categorical, DiscreteTable};
pub use truncated::Truncated;

/// Tolerance for checking that a probability table is normalized.
pub const PROB_TOLERANCE: f64 = 1e-6;

/// `ln Σ exp(values)`, computed without overflow.
///
/// Returns `-inf` when `values` is empty or every entry is `-inf`.
pub fn logsumexp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY || max == f64::INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// The kind of values a leaf distribution ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Real-valued with a density.
    Continuous,
    /// Real-valued with point masses.
    Discrete,
    /// Labels with point masses.
    Nominal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Continuous => "continuous",
            Kind::Discrete => "discrete",
            Kind::Nominal => "nominal",
        };
        write!(f, "{}", s)
    }
}

/// The capability contract of a leaf distribution.
///
/// A distribution does not know which symbol it governs; the computation
/// graph pairs it with one when a model is bound, and only ever hands it the
/// outcomes an event admits for that symbol.
pub trait Distribution: fmt::Debug + Send + Sync {
    /// Family name, e.g. `"normal"`.
    fn name(&self) -> &'static str;

    /// Continuous, discrete or nominal.
    fn kind(&self) -> Kind;

    /// Exact probability of the outcome set.
    fn prob(&self, outcomes: &Outcomes) -> f64;

    /// Exact log-probability of the outcome set. `-inf` for impossible sets.
    fn log_prob(&self, outcomes: &Outcomes) -> f64 {
        self.prob(outcomes).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_core::{IntervalSet, NominalSet, Value};

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Continuous.to_string(), "continuous");
        assert_eq!(Kind::Discrete.to_string(), "discrete");
        assert_eq!(Kind::Nominal.to_string(), "nominal");
    }

    #[test]
    fn test_logsumexp() {
        assert_eq!(logsumexp(&[]), f64::NEG_INFINITY);
        assert_eq!(
            logsumexp(&[f64::NEG_INFINITY, f64::NEG_INFINITY]),
            f64::NEG_INFINITY
        );
        assert!(logsumexp(&[0.5_f64.ln(), 0.5_f64.ln()]).abs() < 1e-12);
        // Stable where a naive sum underflows.
        let tiny = -1000.0;
        assert!((logsumexp(&[tiny, tiny]) - (tiny + 2.0_f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_default_log_prob() {
        let coin = DiscreteTable::uniform(vec![0.0, 1.0]).unwrap();
        let heads = Outcomes::from_values(&[Value::Real(1.0)]);
        assert!((coin.log_prob(&heads) - 0.5_f64.ln()).abs() < 1e-12);
        assert_eq!(coin.log_prob(&Outcomes::empty()), f64::NEG_INFINITY);
    }

    #[test]
    fn test_families_ignore_foreign_value_kinds() {
        let labels = Outcomes::new(IntervalSet::empty(), NominalSet::all());
        let normal = Normal::new(0.0, 1.0).unwrap();
        assert_eq!(normal.prob(&labels), 0.0);

        let reals = Outcomes::from_reals(IntervalSet::all());
        let choice = Categorical::new([("a", 0.5), ("b", 0.5)]).unwrap();
        assert_eq!(choice.prob(&reals), 0.0);
    }

    #[test]
    fn test_distributions_are_object_safe() {
        let leaves: Vec<Box<dyn Distribution>> = vec![
            Box::new(Normal::new(0.0, 1.0).unwrap()),
            Box::new(Poisson::new(3.0).unwrap()),
            Box::new(Categorical::new([("x", 1.0)]).unwrap()),
        ];
        let kinds: Vec<Kind> = leaves.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec![Kind::Continuous, Kind::Discrete, Kind::Nominal]);
    }
}
