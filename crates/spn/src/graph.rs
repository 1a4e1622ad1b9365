//! The bound computation graph.
//!
//! A sum-product network is a tree of three node kinds:
//!
//! - **Leaf**: one distribution governing one symbol
//! - **Sum**: a weighted mixture of children over the *same* scope
//! - **Product**: an independent combination of children over *disjoint*
//!   scopes
//!
//! Nodes are immutable once built and own their children. The constructors
//! enforce every structural invariant, so a graph that exists is a valid
//! probability model and queries never re-check structure.

use std::fmt;
use std::sync::Arc;

use spn_core::{Event, Scope, Symbol};
use spn_prob::{Distribution, Kind};

use crate::config::SpnConfig;
use crate::error::{fmt_scope, SpnError};

/// A node of a bound sum-product network.
#[derive(Debug, Clone)]
pub enum Spn {
    Leaf(LeafNode),
    Sum(SumNode),
    Product(ProductNode),
}

/// A distribution bound to the symbol it governs.
#[derive(Debug, Clone)]
pub struct LeafNode {
    symbol: Symbol,
    scope: Scope,
    dist: Arc<dyn Distribution>,
}

impl LeafNode {
    pub fn new(symbol: Symbol, dist: Arc<dyn Distribution>) -> Self {
        Self {
            scope: symbol.scope(),
            symbol,
            dist,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn distribution(&self) -> &Arc<dyn Distribution> {
        &self.dist
    }

    pub fn kind(&self) -> Kind {
        self.dist.kind()
    }

    /// Log-probability of an event over this leaf's symbol.
    ///
    /// # Errors
    ///
    /// [`SpnError::UnboundSymbol`] if the event mentions another symbol.
    pub fn log_prob(&self, event: &Event) -> Result<f64, SpnError> {
        let outcomes = event.solve(&self.symbol)?;
        Ok(self.dist.log_prob(&outcomes))
    }
}

/// A mixture node: `P(e) = Σᵢ wᵢ · P_childᵢ(e)`, stored in log space.
#[derive(Debug, Clone)]
pub struct SumNode {
    scope: Scope,
    log_weights: Vec<f64>,
    children: Vec<Spn>,
    depth: usize,
    size: usize,
}

impl SumNode {
    /// Build a sum node.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no children, or weights and children differ in number
    /// - A log-weight is NaN or positive infinity
    /// - Children govern different scopes
    /// - The weights do not sum to 1 within `config.tolerance`
    /// - The node would be deeper than `config.max_depth`
    pub fn new(
        log_weights: Vec<f64>,
        children: Vec<Spn>,
        config: &SpnConfig,
    ) -> Result<Self, SpnError> {
        if children.is_empty() {
            return Err(SpnError::InvalidOperand {
                operation: "sum",
                reason: "a sum node needs at least one child".to_string(),
            });
        }
        if log_weights.len() != children.len() {
            return Err(SpnError::InvalidOperand {
                operation: "sum",
                reason: format!(
                    "{} weights for {} children",
                    log_weights.len(),
                    children.len()
                ),
            });
        }
        if log_weights.iter().any(|w| w.is_nan() || *w == f64::INFINITY) {
            return Err(SpnError::InvalidOperand {
                operation: "sum",
                reason: "log-weights must be finite or -inf".to_string(),
            });
        }

        let scope = children[0].scope().clone();
        for child in &children[1..] {
            if *child.scope() != scope {
                return Err(SpnError::SymbolMismatch {
                    left: fmt_scope(&scope),
                    right: fmt_scope(child.scope()),
                });
            }
        }

        let total: f64 = log_weights.iter().map(|w| w.exp()).sum();
        if total > 1.0 + config.tolerance {
            return Err(SpnError::WeightBudgetExceeded { total });
        }
        if total < 1.0 - config.tolerance {
            return Err(SpnError::IncompleteMixture { total });
        }

        let depth = 1 + children.iter().map(Spn::depth).max().unwrap_or(0);
        check_depth(depth, config)?;
        let size = 1 + children.iter().map(Spn::size).sum::<usize>();

        Ok(Self {
            scope,
            log_weights,
            children,
            depth,
            size,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn log_weights(&self) -> &[f64] {
        &self.log_weights
    }

    /// Weights in linear space.
    pub fn weights(&self) -> Vec<f64> {
        self.log_weights.iter().map(|w| w.exp()).collect()
    }

    pub fn children(&self) -> &[Spn] {
        &self.children
    }
}

/// An independence node: `P(e₁ ∧ … ∧ eₙ) = Πᵢ P_childᵢ(eᵢ)`.
#[derive(Debug, Clone)]
pub struct ProductNode {
    scope: Scope,
    children: Vec<Spn>,
    depth: usize,
    size: usize,
}

impl ProductNode {
    /// Build a product node.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no children, two children share a
    /// symbol, or the node would be deeper than `config.max_depth`.
    pub fn new(children: Vec<Spn>, config: &SpnConfig) -> Result<Self, SpnError> {
        if children.is_empty() {
            return Err(SpnError::InvalidOperand {
                operation: "product",
                reason: "a product node needs at least one child".to_string(),
            });
        }

        let mut scope = Scope::new();
        for child in &children {
            if !scope.is_disjoint(child.scope()) {
                return Err(SpnError::SymbolMismatch {
                    left: fmt_scope(&scope),
                    right: fmt_scope(child.scope()),
                });
            }
            scope.extend(child.scope().iter().cloned());
        }

        let depth = 1 + children.iter().map(Spn::depth).max().unwrap_or(0);
        check_depth(depth, config)?;
        let size = 1 + children.iter().map(Spn::size).sum::<usize>();

        Ok(Self {
            scope,
            children,
            depth,
            size,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn children(&self) -> &[Spn] {
        &self.children
    }
}

fn check_depth(depth: usize, config: &SpnConfig) -> Result<(), SpnError> {
    if depth > config.max_depth {
        return Err(SpnError::ModelTooDeep {
            depth,
            limit: config.max_depth,
        });
    }
    Ok(())
}

impl Spn {
    /// The symbols this node governs.
    pub fn scope(&self) -> &Scope {
        match self {
            Spn::Leaf(leaf) => &leaf.scope,
            Spn::Sum(sum) => &sum.scope,
            Spn::Product(product) => &product.scope,
        }
    }

    /// Height of the tree in nodes; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Spn::Leaf(_) => 1,
            Spn::Sum(sum) => sum.depth,
            Spn::Product(product) => product.depth,
        }
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Spn::Leaf(_) => 1,
            Spn::Sum(sum) => sum.size,
            Spn::Product(product) => product.size,
        }
    }

    pub fn children(&self) -> &[Spn] {
        match self {
            Spn::Leaf(_) => &[],
            Spn::Sum(sum) => &sum.children,
            Spn::Product(product) => &product.children,
        }
    }

    /// The leaf's kind, or `None` for inner nodes.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Spn::Leaf(leaf) => Some(leaf.kind()),
            _ => None,
        }
    }

    /// All leaves, left to right.
    pub fn leaves(&self) -> Vec<&LeafNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafNode>) {
        match self {
            Spn::Leaf(leaf) => out.push(leaf),
            _ => {
                for child in self.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    fn render(&self, indent: usize, out: &mut String) {
        let prefix = "  ".repeat(indent);
        let line = match self {
            Spn::Leaf(leaf) => format!("{} ~ {} ({})", leaf.symbol, leaf.dist.name(), leaf.kind()),
            Spn::Sum(sum) => {
                let weights: Vec<String> =
                    sum.weights().iter().map(|w| format!("{:.4}", w)).collect();
                format!("sum {} [{}]", fmt_scope(&sum.scope), weights.join(", "))
            }
            Spn::Product(product) => format!("product {}", fmt_scope(&product.scope)),
        };
        out.push_str(&prefix);
        out.push_str(&line);
        out.push('\n');
        for child in self.children() {
            child.render(indent + 1, out);
        }
    }
}

impl fmt::Display for Spn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(0, &mut out);
        write!(f, "{}", out)
    }
}
