//! Leaf-term constructors for the built-in distribution families.
//!
//! Each returns an unpinned [`Term::Leaf`]; pin it with [`Term::on`] when it
//! needs to be a product factor.

use spn_prob::{
    Bernoulli, Binomial, Categorical, DiscreteTable, Gamma, Normal, Poisson, Uniform,
};

use crate::error::SpnError;
use crate::term::Term;

/// Normal with the given mean and standard deviation.
pub fn norm(mean: f64, std_dev: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Normal::new(mean, std_dev)?))
}

/// Gamma with the given shape and scale.
pub fn gamma(shape: f64, scale: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Gamma::new(shape, scale)?))
}

/// Continuous uniform on `[low, high]`.
pub fn uniform(low: f64, high: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Uniform::new(low, high)?))
}

pub fn poisson(mu: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Poisson::new(mu)?))
}

pub fn bernoulli(p: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Bernoulli::new(p)?))
}

pub fn binom(n: u64, p: f64) -> Result<Term, SpnError> {
    Ok(Term::leaf(Binomial::new(n, p)?))
}

/// Finite distribution over real values with the given probabilities.
pub fn rv_discrete(values: &[f64], probs: &[f64]) -> Result<Term, SpnError> {
    Ok(Term::leaf(DiscreteTable::new(
        values.to_vec(),
        probs.to_vec(),
    )?))
}

/// Equal mass on each of `values`.
pub fn uniformd(values: &[f64]) -> Result<Term, SpnError> {
    Ok(Term::leaf(DiscreteTable::uniform(values.to_vec())?))
}

/// Categorical over labels.
pub fn choice<S: Into<String>>(
    pairs: impl IntoIterator<Item = (S, f64)>,
) -> Result<Term, SpnError> {
    Ok(Term::leaf(Categorical::new(pairs)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_prob::{Kind, ProbError};

    fn kind(term: &Term) -> Kind {
        match term {
            Term::Leaf(leaf) => leaf.distribution().kind(),
            other => panic!("expected a leaf, got {}", other.tag()),
        }
    }

    #[test]
    fn test_family_kinds() {
        assert_eq!(kind(&norm(0.0, 1.0).unwrap()), Kind::Continuous);
        assert_eq!(kind(&gamma(2.0, 1.0).unwrap()), Kind::Continuous);
        assert_eq!(kind(&uniform(0.0, 1.0).unwrap()), Kind::Continuous);
        assert_eq!(kind(&poisson(3.0).unwrap()), Kind::Discrete);
        assert_eq!(kind(&bernoulli(0.5).unwrap()), Kind::Discrete);
        assert_eq!(kind(&binom(4, 0.5).unwrap()), Kind::Discrete);
        assert_eq!(kind(&uniformd(&[1.0, 2.0]).unwrap()), Kind::Discrete);
        assert_eq!(kind(&choice([("a", 1.0)]).unwrap()), Kind::Nominal);
    }

    #[test]
    fn test_bad_parameters_surface_as_prob_errors() {
        assert!(matches!(
            norm(0.0, -1.0),
            Err(SpnError::Prob(ProbError::InvalidParameter { .. }))
        ));
        assert!(matches!(
            rv_discrete(&[1.0, 2.0], &[0.5]),
            Err(SpnError::Prob(ProbError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            choice([("a", 0.5), ("b", 0.2)]),
            Err(SpnError::Prob(ProbError::NotNormalized { .. }))
        ));
    }
}
