//! Finite distributions given by an explicit table of atoms.

use spn_core::Outcomes;

use crate::error::ProbError;
use crate::{Distribution, Kind, PROB_TOLERANCE};

/// Validate a probability vector against its atoms.
fn check_table(n_values: usize, probs: &[f64]) -> Result<(), ProbError> {
    if n_values != probs.len() {
        return Err(ProbError::LengthMismatch {
            values: n_values,
            probs: probs.len(),
        });
    }
    if probs.is_empty() {
        return Err(ProbError::EmptyDistribution);
    }

    // Check for negative probabilities
    if probs.iter().any(|&x| x < 0.0 || x.is_nan()) {
        return Err(ProbError::NegativeProbability);
    }

    // Check normalization
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROB_TOLERANCE {
        return Err(ProbError::NotNormalized { sum });
    }
    Ok(())
}

/// A discrete distribution over finitely many real atoms.
///
/// Invariants:
/// - Atoms are finite and distinct
/// - Probabilities are non-negative and sum to 1 (within tolerance)
///
/// # Example
///
/// ```rust
/// use spn_prob::DiscreteTable;
///
/// let d = DiscreteTable::new(vec![1.0, 2.0, 10.0], vec![0.3, 0.5, 0.2]).unwrap();
/// assert_eq!(d.values(), &[1.0, 2.0, 10.0]);
///
/// let fair = DiscreteTable::uniform(vec![1.0, 2.0, 10.0, 0.0]).unwrap();
/// assert!((fair.probs()[0] - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteTable {
    values: Vec<f64>,
    probs: Vec<f64>,
}

impl DiscreteTable {
    /// Create a table from atoms and their probabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lengths differ or the table is empty
    /// - An atom is repeated or not finite
    /// - Any probability is negative
    /// - The probabilities don't sum to 1 (within tolerance)
    pub fn new(values: Vec<f64>, probs: Vec<f64>) -> Result<Self, ProbError> {
        check_table(values.len(), &probs)?;
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(ProbError::invalid("values", format!("atom {} is not finite", v)));
            }
            if values[..i].contains(v) {
                return Err(ProbError::DuplicateValue {
                    value: v.to_string(),
                });
            }
        }
        Ok(Self { values, probs })
    }

    /// Equal mass on every atom.
    pub fn uniform(values: Vec<f64>) -> Result<Self, ProbError> {
        if values.is_empty() {
            return Err(ProbError::EmptyDistribution);
        }
        let n = values.len();
        Self::new(values, vec![1.0 / n as f64; n])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }
}

impl Distribution for DiscreteTable {
    fn name(&self) -> &'static str {
        "discrete"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        let reals = outcomes.reals();
        let total: f64 = self
            .values
            .iter()
            .zip(&self.probs)
            .filter(|(v, _)| reals.contains(**v))
            .map(|(_, p)| p)
            .sum();
        total.min(1.0)
    }
}

/// A categorical distribution over string labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorical {
    labels: Vec<String>,
    probs: Vec<f64>,
}

impl Categorical {
    /// Create a categorical distribution from `(label, probability)` pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spn_prob::Categorical;
    ///
    /// let c = Categorical::new([("a", 0.1), ("b", 0.9)]).unwrap();
    /// assert_eq!(c.labels(), &["a".to_string(), "b".to_string()]);
    /// ```
    pub fn new<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self, ProbError> {
        let (labels, probs): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(s, p)| (s.into(), p)).unzip();
        check_table(labels.len(), &probs)?;
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ProbError::DuplicateValue {
                    value: label.clone(),
                });
            }
        }
        Ok(Self { labels, probs })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn probs(&self) -> &[f64] {
        &self.probs
    }
}

impl Distribution for Categorical {
    fn name(&self) -> &'static str {
        "choice"
    }

    fn kind(&self) -> Kind {
        Kind::Nominal
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        let nominals = outcomes.nominals();
        let total: f64 = self
            .labels
            .iter()
            .zip(&self.probs)
            .filter(|(label, _)| nominals.contains(label))
            .map(|(_, p)| p)
            .sum();
        total.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_core::{IntervalSet, NominalSet, Value};

    #[test]
    fn test_table_new_valid() {
        let d = DiscreteTable::new(vec![1.0, 2.0, 10.0], vec![0.3, 0.5, 0.2]).unwrap();
        assert_eq!(d.values().len(), 3);
        assert!((d.probs()[0] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_table_not_normalized() {
        let result = DiscreteTable::new(vec![1.0, 2.0], vec![0.3, 0.6]);
        assert!(matches!(result, Err(ProbError::NotNormalized { .. })));
    }

    #[test]
    fn test_table_negative() {
        let result = DiscreteTable::new(vec![1.0, 2.0], vec![-0.5, 1.5]);
        assert!(matches!(result, Err(ProbError::NegativeProbability)));
    }

    #[test]
    fn test_table_shape_errors() {
        assert!(matches!(
            DiscreteTable::new(vec![1.0], vec![0.5, 0.5]),
            Err(ProbError::LengthMismatch { values: 1, probs: 2 })
        ));
        assert!(matches!(
            DiscreteTable::new(vec![], vec![]),
            Err(ProbError::EmptyDistribution)
        ));
        assert!(matches!(
            DiscreteTable::new(vec![1.0, 1.0], vec![0.5, 0.5]),
            Err(ProbError::DuplicateValue { .. })
        ));
        assert!(DiscreteTable::uniform(vec![]).is_err());
    }

    #[test]
    fn test_table_prob_of_sets() {
        let d = DiscreteTable::new(vec![1.0, 2.0, 10.0], vec![0.3, 0.5, 0.2]).unwrap();
        let one_or_ten = Outcomes::from_reals(IntervalSet::points([1.0, 10.0]));
        assert!((d.prob(&one_or_ten) - 0.5).abs() < 1e-12);
        let everything = Outcomes::all();
        assert!((d.prob(&everything) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_table() {
        let d = DiscreteTable::uniform(vec![1.0, 2.0, 10.0, 0.0]).unwrap();
        for v in [1.0, 2.0, 10.0, 0.0] {
            let atom = Outcomes::from_values(&[Value::Real(v)]);
            assert!((d.prob(&atom) - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_categorical_prob() {
        let c = Categorical::new([("a", 0.1), ("b", 0.9)]).unwrap();
        let a = Outcomes::from_values(&[Value::from("a")]);
        assert!((c.prob(&a) - 0.1).abs() < 1e-12);

        let not_a = a.complement();
        assert!((c.prob(&not_a) - 0.9).abs() < 1e-12);

        let nothing = Outcomes::new(IntervalSet::all(), NominalSet::empty());
        assert_eq!(c.prob(&nothing), 0.0);
    }

    #[test]
    fn test_categorical_duplicate_label() {
        let result = Categorical::new([("a", 0.5), ("a", 0.5)]);
        assert!(matches!(result, Err(ProbError::DuplicateValue { .. })));
    }
}
