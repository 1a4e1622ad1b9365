//! Binding: finalizing a term into a computation graph.

use spn_core::Symbol;

use crate::engine::Engine;
use crate::error::{fmt_scope, SpnError};
use crate::graph::{LeafNode, ProductNode, Spn, SumNode};
use crate::term::Term;

impl Engine {
    /// Bind `term` to `symbol`, producing an immutable graph.
    ///
    /// Leaves and the alternatives of a closed mixture bind to `symbol`.
    /// Product factors bind to their own intended symbols, so a product
    /// binds to the same joint model whatever `symbol` is passed. Binding
    /// borrows the term: the same term can be bound to several symbols.
    ///
    /// # Errors
    ///
    /// - [`SpnError::IncompleteMixture`] for a partial mixture or a bare
    ///   weighted term
    /// - [`SpnError::SymbolMismatch`] if a pinned leaf or single-symbol graph
    ///   governs a different symbol
    /// - [`SpnError::ModelTooDeep`] if the term is deeper than allowed
    pub fn bind(&self, term: &Term, symbol: &Symbol) -> Result<Spn, SpnError> {
        self.check_depth(term.depth())?;
        let spn = self.bind_term(term, symbol)?;
        tracing::debug!(
            symbol = %symbol,
            scope = %fmt_scope(spn.scope()),
            depth = spn.depth(),
            size = spn.size(),
            "term bound"
        );
        Ok(spn)
    }

    fn bind_term(&self, term: &Term, symbol: &Symbol) -> Result<Spn, SpnError> {
        match term {
            Term::Leaf(leaf) => {
                if let Some(pinned) = leaf.symbol() {
                    if pinned != symbol {
                        return Err(SpnError::SymbolMismatch {
                            left: pinned.to_string(),
                            right: symbol.to_string(),
                        });
                    }
                }
                Ok(Spn::Leaf(LeafNode::new(
                    symbol.clone(),
                    leaf.distribution().clone(),
                )))
            }
            Term::Weighted(weighted) => {
                tracing::debug!(total = weighted.weight(), "bare weighted term cannot be bound");
                Err(SpnError::IncompleteMixture {
                    total: weighted.weight(),
                })
            }
            Term::Partial(mixture) => {
                tracing::debug!(total = mixture.total(), "partial mixture cannot be bound");
                Err(SpnError::IncompleteMixture {
                    total: mixture.total(),
                })
            }
            Term::Closed(mixture) => {
                let children = mixture
                    .terms()
                    .iter()
                    .map(|t| self.bind_term(t.inner(), symbol))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Spn::Sum(SumNode::new(
                    mixture.log_weights(),
                    children,
                    self.config(),
                )?))
            }
            Term::Product(product) => {
                let children = product
                    .factors()
                    .iter()
                    .map(|factor| self.bind_factor(factor))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Spn::Product(ProductNode::new(children, self.config())?))
            }
            Term::Bound(spn) => {
                let scope = spn.scope();
                if scope.len() == 1 && !scope.contains(symbol) {
                    return Err(SpnError::SymbolMismatch {
                        left: fmt_scope(scope),
                        right: symbol.to_string(),
                    });
                }
                Ok(spn.clone())
            }
        }
    }

    fn bind_factor(&self, factor: &Term) -> Result<Spn, SpnError> {
        match factor {
            Term::Leaf(leaf) => match leaf.symbol() {
                Some(symbol) => self.bind_term(factor, symbol),
                None => Err(SpnError::InvalidOperand {
                    operation: "bind",
                    reason: "product factor has no intended symbol".to_string(),
                }),
            },
            Term::Bound(spn) => Ok(spn.clone()),
            other => Err(SpnError::InvalidOperand {
                operation: "bind",
                reason: format!("a {} cannot be a product factor", other.tag()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_prob::{Bernoulli, Kind, Normal, Poisson};

    fn engine() -> Engine {
        Engine::default()
    }

    #[test]
    fn test_bind_leaf() {
        let x = Symbol::new("X");
        let spn = engine().bind(&Term::leaf(Normal::new(0.0, 1.0).unwrap()), &x).unwrap();
        assert_eq!(spn.scope(), &x.scope());
        assert_eq!(spn.kind(), Some(Kind::Continuous));
    }

    #[test]
    fn test_bind_pinned_leaf_elsewhere() {
        let term = Term::leaf(Normal::new(0.0, 1.0).unwrap()).on(&Symbol::new("X")).unwrap();
        let result = engine().bind(&term, &Symbol::new("Y"));
        assert!(matches!(result, Err(SpnError::SymbolMismatch { .. })));
    }

    #[test]
    fn test_bind_closed_mixture() {
        let e = engine();
        let term = e
            .mixture([
                e.scale(0.3, Term::leaf(Bernoulli::new(0.1).unwrap())).unwrap(),
                e.scale(0.7, Term::leaf(Poisson::new(7.0).unwrap())).unwrap(),
            ])
            .unwrap();
        let spn = e.bind(&term, &Symbol::new("X")).unwrap();
        match &spn {
            Spn::Sum(sum) => {
                assert_eq!(sum.children().len(), 2);
                assert!((sum.log_weights()[0] - 0.3_f64.ln()).abs() < 1e-12);
            }
            other => panic!("expected a sum node, got {:?}", other),
        }
        assert_eq!(spn.depth(), 2);
        assert_eq!(spn.size(), 3);
    }

    #[test]
    fn test_bind_incomplete() {
        let e = engine();
        let weighted = e.scale(1.0, Term::leaf(Normal::new(0.0, 1.0).unwrap())).unwrap();
        assert_eq!(
            e.bind(&weighted, &Symbol::new("X")).unwrap_err(),
            SpnError::IncompleteMixture { total: 1.0 }
        );
    }

    #[test]
    fn test_bind_product_ignores_argument() {
        let e = engine();
        let x = Symbol::new("X");
        let y = Symbol::new("Y");
        let term = e
            .product(
                Term::leaf(Normal::new(0.0, 1.0).unwrap()).on(&x).unwrap(),
                Term::leaf(Normal::new(0.0, 1.0).unwrap()).on(&y).unwrap(),
            )
            .unwrap();
        let spn = e.bind(&term, &Symbol::new("Z")).unwrap();
        let names: Vec<&str> = spn.scope().iter().map(Symbol::name).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn test_bind_bound_graph() {
        let e = engine();
        let x = Symbol::new("X");
        let spn = e.bind(&Term::leaf(Normal::new(0.0, 1.0).unwrap()), &x).unwrap();
        let term = Term::from(spn);
        assert!(e.bind(&term, &x).is_ok());
        assert!(matches!(
            e.bind(&term, &Symbol::new("Y")),
            Err(SpnError::SymbolMismatch { .. })
        ));
    }
}
