//! The mixture algebra: `scale`, `mix` and `product`.
//!
//! Each operation consumes its operands and returns a new [`Term`], checking
//! its invariants eagerly so an illegal combination fails at the offending
//! operand instead of at bind time.
//!
//! Weight bookkeeping happens here in linear space. A mixture moves through
//! three states as alternatives are added:
//!
//! ```text
//! Weighted --mix--> Partial (total < 1 - ε) --mix--> ... --mix--> Closed (|total - 1| <= ε)
//! ```
//!
//! `Closed` is terminal: it can be bound, but it accepts no more
//! alternatives.

use spn_core::Scope;

use crate::engine::Engine;
use crate::error::{fmt_scope, SpnError};
use crate::term::{Mixture, ProductTerm, Term, WeightedTerm};

impl Engine {
    /// Attach a mixture weight to an unweighted term.
    ///
    /// # Errors
    ///
    /// [`SpnError::InvalidOperand`] if `weight` is not in `(0, 1]` or the term
    /// already carries a weight.
    pub fn scale(&self, weight: f64, term: Term) -> Result<Term, SpnError> {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(SpnError::InvalidOperand {
                operation: "scale",
                reason: format!("weight must be in (0, 1], got {}", weight),
            });
        }
        if term.is_weighted() {
            return Err(SpnError::InvalidOperand {
                operation: "scale",
                reason: format!("cannot re-weight a {}", term.tag()),
            });
        }
        Ok(Term::Weighted(WeightedTerm::new(weight, term)))
    }

    /// Combine two weighted operands into a mixture.
    ///
    /// Both operands are flattened, so grouping does not matter:
    /// `mix(mix(a, b), c)` and `mix(a, mix(b, c))` hold the same alternatives
    /// in the same order.
    ///
    /// # Errors
    ///
    /// - [`SpnError::InvalidOperand`] if either side is unweighted or closed
    /// - [`SpnError::SymbolMismatch`] if the alternatives disagree on scope
    /// - [`SpnError::WeightBudgetExceeded`] if the weights pass 1
    /// - [`SpnError::ModelTooDeep`] if the mixture is too deep
    pub fn mix(&self, a: Term, b: Term) -> Result<Term, SpnError> {
        let mut terms = flatten(a)?;
        terms.extend(flatten(b)?);

        let scope = common_scope(&terms)?;
        let total: f64 = terms.iter().map(WeightedTerm::weight).sum();
        if total > 1.0 + self.config().tolerance {
            tracing::debug!(total, "mixture weight budget exceeded");
            return Err(SpnError::WeightBudgetExceeded { total });
        }

        let depth = 1 + terms.iter().map(|t| t.inner().depth()).max().unwrap_or(0);
        self.check_depth(depth)?;

        let alternatives = terms.len();
        let mixture = Mixture::new(terms, total, scope, depth);
        if (total - 1.0).abs() <= self.config().tolerance {
            tracing::debug!(alternatives, "mixture closed");
            Ok(Term::Closed(mixture))
        } else {
            Ok(Term::Partial(mixture))
        }
    }

    /// Mix two or more weighted terms, left to right.
    pub fn mixture(&self, terms: impl IntoIterator<Item = Term>) -> Result<Term, SpnError> {
        let mut iter = terms.into_iter();
        let (first, second) = match (iter.next(), iter.next()) {
            (Some(first), Some(second)) => (first, second),
            _ => {
                return Err(SpnError::InvalidOperand {
                    operation: "mix",
                    reason: "a mixture needs at least two alternatives".to_string(),
                })
            }
        };
        iter.try_fold(self.mix(first, second)?, |acc, term| self.mix(acc, term))
    }

    /// Combine two terms over disjoint symbols into an independent product.
    ///
    /// Factors must know the symbols they govern: pin leaves with
    /// [`Term::on`] or pass already-bound graphs. Nested products are
    /// flattened.
    ///
    /// # Errors
    ///
    /// - [`SpnError::InvalidOperand`] for weighted operands or unpinned leaves
    /// - [`SpnError::SymbolMismatch`] if two factors share a symbol
    /// - [`SpnError::ModelTooDeep`] if the product is too deep
    pub fn product(&self, a: Term, b: Term) -> Result<Term, SpnError> {
        let mut factors = Vec::new();
        for operand in [a, b] {
            match operand {
                Term::Product(product) => factors.extend(product.into_factors()),
                Term::Leaf(ref leaf) if leaf.symbol().is_none() => {
                    return Err(SpnError::InvalidOperand {
                        operation: "product",
                        reason: "a product factor needs an intended symbol; pin the leaf first"
                            .to_string(),
                    });
                }
                other if other.is_weighted() => {
                    return Err(SpnError::InvalidOperand {
                        operation: "product",
                        reason: format!("a {} cannot be a product factor", other.tag()),
                    });
                }
                other => factors.push(other),
            }
        }

        let mut scope = Scope::new();
        for factor in &factors {
            let factor_scope = factor.intended_scope().unwrap_or_default();
            if !scope.is_disjoint(&factor_scope) {
                tracing::debug!(left = %fmt_scope(&scope), right = %fmt_scope(&factor_scope), "product factors overlap");
                return Err(SpnError::SymbolMismatch {
                    left: fmt_scope(&scope),
                    right: fmt_scope(&factor_scope),
                });
            }
            scope.extend(factor_scope);
        }

        let depth = 1 + factors.iter().map(Term::depth).max().unwrap_or(0);
        self.check_depth(depth)?;

        tracing::debug!(scope = %fmt_scope(&scope), factors = factors.len(), "product formed");
        Ok(Term::Product(ProductTerm::new(factors, scope, depth)))
    }
}

fn flatten(term: Term) -> Result<Vec<WeightedTerm>, SpnError> {
    match term {
        Term::Weighted(weighted) => Ok(vec![weighted]),
        Term::Partial(mixture) => Ok(mixture.into_terms()),
        Term::Closed(_) => Err(SpnError::InvalidOperand {
            operation: "mix",
            reason: "a closed mixture accepts no more alternatives".to_string(),
        }),
        other => Err(SpnError::InvalidOperand {
            operation: "mix",
            reason: format!("mix needs weighted operands, got a {}", other.tag()),
        }),
    }
}

/// The scope every alternative agrees on.
///
/// An alternative without a known scope governs one symbol that is named at
/// bind time. It matches any single-symbol scope and nothing wider.
fn common_scope(terms: &[WeightedTerm]) -> Result<Option<Scope>, SpnError> {
    let mut common: Option<Scope> = None;
    let mut unnamed = false;
    for term in terms {
        let Some(scope) = term.inner().intended_scope() else {
            unnamed = true;
            continue;
        };
        match &common {
            Some(expected) if *expected != scope => {
                tracing::debug!(left = %fmt_scope(expected), right = %fmt_scope(&scope), "mixture scopes disagree");
                return Err(SpnError::SymbolMismatch {
                    left: fmt_scope(expected),
                    right: fmt_scope(&scope),
                });
            }
            Some(_) => {}
            None => common = Some(scope),
        }
    }
    if let Some(scope) = common.as_ref().filter(|scope| unnamed && scope.len() != 1) {
        tracing::debug!(scope = %fmt_scope(scope), "unpinned leaf mixed with a multi-symbol scope");
        return Err(SpnError::SymbolMismatch {
            left: fmt_scope(scope),
            right: "{<one unnamed symbol>}".to_string(),
        });
    }
    Ok(common)
}
