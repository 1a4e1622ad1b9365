//! Distribution terms: the unbound side of the algebra.
//!
//! A [`Term`] is pure data describing a model that has not yet been attached
//! to a symbol. Terms are produced by the leaf constructors in
//! [`crate::families`] and combined with [`Engine::scale`], [`Engine::mix`]
//! and [`Engine::product`]; [`Engine::bind`] finalizes one into an [`Spn`].
//!
//! The composite payloads have private fields, so a `Partial`, `Closed` or
//! `Product` term can only come out of the algebra and always satisfies its
//! invariants.
//!
//! [`Engine::scale`]: crate::Engine::scale
//! [`Engine::mix`]: crate::Engine::mix
//! [`Engine::product`]: crate::Engine::product
//! [`Engine::bind`]: crate::Engine::bind

use std::sync::Arc;

use spn_core::{Scope, Symbol};
use spn_prob::Distribution;

use crate::error::SpnError;
use crate::graph::Spn;

/// An unbound model.
#[derive(Debug, Clone)]
pub enum Term {
    /// One distribution family, optionally pinned to the symbol it will govern.
    Leaf(LeafTerm),
    /// A term carrying a mixture weight.
    Weighted(WeightedTerm),
    /// Weighted alternatives whose weights do not yet reach 1.
    Partial(Mixture),
    /// Weighted alternatives whose weights sum to 1.
    Closed(Mixture),
    /// Independent factors over disjoint symbols.
    Product(ProductTerm),
    /// A graph that has already been bound.
    Bound(Spn),
}

#[derive(Debug, Clone)]
pub struct LeafTerm {
    dist: Arc<dyn Distribution>,
    symbol: Option<Symbol>,
}

impl LeafTerm {
    pub fn distribution(&self) -> &Arc<dyn Distribution> {
        &self.dist
    }

    /// The symbol this leaf is pinned to, if any.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct WeightedTerm {
    weight: f64,
    inner: Box<Term>,
}

impl WeightedTerm {
    pub(crate) fn new(weight: f64, inner: Term) -> Self {
        Self {
            weight,
            inner: Box::new(inner),
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn inner(&self) -> &Term {
        &self.inner
    }
}

/// The payload of a partial or closed mixture.
#[derive(Debug, Clone)]
pub struct Mixture {
    terms: Vec<WeightedTerm>,
    total: f64,
    scope: Option<Scope>,
    depth: usize,
}

impl Mixture {
    pub(crate) fn new(
        terms: Vec<WeightedTerm>,
        total: f64,
        scope: Option<Scope>,
        depth: usize,
    ) -> Self {
        Self {
            terms,
            total,
            scope,
            depth,
        }
    }

    /// The flattened alternatives, in the order they were mixed.
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    pub fn weights(&self) -> Vec<f64> {
        self.terms.iter().map(WeightedTerm::weight).collect()
    }

    pub fn log_weights(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.weight.ln()).collect()
    }

    pub(crate) fn into_terms(self) -> Vec<WeightedTerm> {
        self.terms
    }

    /// Sum of the weights in linear space.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The shared intended scope, or `None` if no alternative has one yet.
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct ProductTerm {
    factors: Vec<Term>,
    scope: Scope,
    depth: usize,
}

impl ProductTerm {
    pub(crate) fn new(factors: Vec<Term>, scope: Scope, depth: usize) -> Self {
        Self {
            factors,
            scope,
            depth,
        }
    }

    pub fn factors(&self) -> &[Term] {
        &self.factors
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) fn into_factors(self) -> Vec<Term> {
        self.factors
    }
}

impl Term {
    /// A leaf term over `dist`, not yet pinned to a symbol.
    pub fn leaf(dist: impl Distribution + 'static) -> Self {
        Self::from_arc(Arc::new(dist))
    }

    /// A leaf term over a shared distribution.
    pub fn from_arc(dist: Arc<dyn Distribution>) -> Self {
        Term::Leaf(LeafTerm { dist, symbol: None })
    }

    /// Pin a leaf to the symbol it will govern.
    ///
    /// Pinning gives the leaf an intended scope, which is what lets it become
    /// a product factor. Pinning twice to the same symbol is a no-op.
    ///
    /// # Errors
    ///
    /// - [`SpnError::InvalidOperand`] if the term is not a leaf
    /// - [`SpnError::SymbolMismatch`] if the leaf is pinned elsewhere
    pub fn on(self, symbol: &Symbol) -> Result<Self, SpnError> {
        match self {
            Term::Leaf(leaf) => match &leaf.symbol {
                Some(existing) if existing != symbol => Err(SpnError::SymbolMismatch {
                    left: existing.to_string(),
                    right: symbol.to_string(),
                }),
                _ => Ok(Term::Leaf(LeafTerm {
                    dist: leaf.dist,
                    symbol: Some(symbol.clone()),
                })),
            },
            other => Err(SpnError::InvalidOperand {
                operation: "on",
                reason: format!("only a leaf can be pinned, got a {}", other.tag()),
            }),
        }
    }

    /// The symbols this term will govern once bound, when known structurally.
    ///
    /// `None` means a single symbol that is named only at bind time: an
    /// unpinned leaf, or a mixture made only of unpinned leaves.
    pub fn intended_scope(&self) -> Option<Scope> {
        match self {
            Term::Leaf(leaf) => leaf.symbol.as_ref().map(Symbol::scope),
            Term::Weighted(weighted) => weighted.inner.intended_scope(),
            Term::Partial(mixture) | Term::Closed(mixture) => mixture.scope.clone(),
            Term::Product(product) => Some(product.scope.clone()),
            Term::Bound(spn) => Some(spn.scope().clone()),
        }
    }

    /// Depth of the graph this term binds to; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Term::Leaf(_) => 1,
            Term::Weighted(weighted) => weighted.inner.depth(),
            Term::Partial(mixture) | Term::Closed(mixture) => mixture.depth,
            Term::Product(product) => product.depth,
            Term::Bound(spn) => spn.depth(),
        }
    }

    /// A short name for the variant, used in error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Term::Leaf(_) => "leaf",
            Term::Weighted(_) => "weighted term",
            Term::Partial(_) => "partial mixture",
            Term::Closed(_) => "closed mixture",
            Term::Product(_) => "product",
            Term::Bound(_) => "bound graph",
        }
    }

    /// `true` for terms that already carry a mixture weight.
    pub fn is_weighted(&self) -> bool {
        matches!(self, Term::Weighted(_) | Term::Partial(_) | Term::Closed(_))
    }
}

impl From<Spn> for Term {
    fn from(spn: Spn) -> Self {
        Term::Bound(spn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LeafNode;
    use spn_prob::{Kind, Normal, Poisson};

    #[test]
    fn test_leaf_is_unpinned() {
        let term = Term::leaf(Normal::new(0.0, 1.0).unwrap());
        assert_eq!(term.tag(), "leaf");
        assert_eq!(term.intended_scope(), None);
        assert_eq!(term.depth(), 1);
        assert!(!term.is_weighted());
    }

    #[test]
    fn test_pin_leaf() {
        let x = Symbol::new("X");
        let term = Term::leaf(Poisson::new(2.0).unwrap()).on(&x).unwrap();
        assert_eq!(term.intended_scope(), Some(x.scope()));
        match &term {
            Term::Leaf(leaf) => {
                assert_eq!(leaf.symbol(), Some(&x));
                assert_eq!(leaf.distribution().kind(), Kind::Discrete);
            }
            other => panic!("expected a leaf, got {}", other.tag()),
        }
        // Re-pinning to the same symbol is fine.
        assert!(term.on(&x).is_ok());
    }

    #[test]
    fn test_pin_to_other_symbol_fails() {
        let term = Term::leaf(Normal::new(0.0, 1.0).unwrap()).on(&Symbol::new("X")).unwrap();
        let result = term.on(&Symbol::new("Y"));
        assert!(matches!(result, Err(SpnError::SymbolMismatch { .. })));
    }

    #[test]
    fn test_pin_non_leaf_fails() {
        let term = Term::Weighted(WeightedTerm::new(0.5, Term::leaf(Normal::new(0.0, 1.0).unwrap())));
        let result = term.on(&Symbol::new("X"));
        assert!(matches!(
            result,
            Err(SpnError::InvalidOperand { operation: "on", .. })
        ));
    }

    #[test]
    fn test_bound_term_scope() {
        let y = Symbol::new("Y");
        let spn = Spn::Leaf(LeafNode::new(y.clone(), Arc::new(Normal::new(0.0, 1.0).unwrap())));
        let term = Term::from(spn);
        assert_eq!(term.tag(), "bound graph");
        assert_eq!(term.intended_scope(), Some(y.scope()));
    }

    #[test]
    fn test_mixture_accessors() {
        let mixture = Mixture::new(
            vec![
                WeightedTerm::new(0.25, Term::leaf(Normal::new(0.0, 1.0).unwrap())),
                WeightedTerm::new(0.5, Term::leaf(Normal::new(0.0, 1.0).unwrap())),
            ],
            0.75,
            None,
            2,
        );
        assert_eq!(mixture.weights(), vec![0.25, 0.5]);
        assert_eq!(mixture.log_weights()[0], 0.25_f64.ln());
        assert_eq!(mixture.total(), 0.75);
        assert!(mixture.scope().is_none());
    }
}
