//! # Evaluation Traces
//!
//! [`Engine::explain`] evaluates a query like [`Engine::log_probability`]
//! but keeps the intermediate results: one [`EvalTrace`] per visited node,
//! labelled and carrying that node's log-probability for the sub-event it
//! received.
//!
//! ```rust
//! use spn::{families, Engine, Symbol};
//!
//! let engine = Engine::default();
//! let x = Symbol::new("X");
//! let term = engine.mixture([
//!     engine.scale(0.4, families::bernoulli(0.5).unwrap()).unwrap(),
//!     engine.scale(0.6, families::poisson(2.0).unwrap()).unwrap(),
//! ]).unwrap();
//! let spn = engine.bind(&term, &x).unwrap();
//!
//! let trace = engine.explain(&spn, &x.le(1.0)).unwrap();
//! assert_eq!(trace.children.len(), 2);
//! println!("{}", trace.display());
//! ```

use spn_core::Event;

use crate::engine::Engine;
use crate::error::{fmt_scope, SpnError};
use crate::evaluate::{logsumexp, split_event, Split};
use crate::graph::Spn;

/// One evaluated node.
#[derive(Debug, Clone)]
pub struct EvalTrace {
    /// What was evaluated
    pub label: String,
    /// Log-probability of the node's sub-event
    pub log_prob: f64,
    /// Traces of the children that were visited
    pub children: Vec<EvalTrace>,
}

impl EvalTrace {
    pub fn new(label: impl Into<String>, log_prob: f64) -> Self {
        Self {
            label: label.into(),
            log_prob,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: EvalTrace) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<EvalTrace>) -> Self {
        self.children.extend(children);
        self
    }

    /// Probability in linear space.
    pub fn prob(&self) -> f64 {
        self.log_prob.exp()
    }

    /// Pretty-print the trace tree.
    pub fn display(&self) -> String {
        self.display_indent(0)
    }

    fn display_indent(&self, indent: usize) -> String {
        let mut out = format!("{}[p={:.6}] {}\n", "  ".repeat(indent), self.prob(), self.label);
        for child in &self.children {
            out.push_str(&child.display_indent(indent + 1));
        }
        out
    }
}

impl std::fmt::Display for EvalTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Engine {
    /// Evaluate `event` against `spn`, recording every visited node.
    ///
    /// The root's `log_prob` equals [`Engine::log_probability`].
    pub fn explain(&self, spn: &Spn, event: &Event) -> Result<EvalTrace, SpnError> {
        let event = self.prepare(spn, event)?;
        explain_node(spn, &event)
    }
}

fn explain_node(spn: &Spn, event: &Event) -> Result<EvalTrace, SpnError> {
    match spn {
        Spn::Leaf(leaf) => Ok(EvalTrace::new(
            format!(
                "{} ~ {} given {}",
                leaf.symbol(),
                leaf.distribution().name(),
                event
            ),
            leaf.log_prob(event)?,
        )),
        Spn::Sum(sum) => {
            let children = sum
                .children()
                .iter()
                .map(|child| explain_node(child, event))
                .collect::<Result<Vec<_>, _>>()?;
            let terms: Vec<f64> = sum
                .log_weights()
                .iter()
                .zip(&children)
                .map(|(lw, child)| lw + child.log_prob)
                .collect();
            Ok(EvalTrace::new(format!("sum {}", fmt_scope(sum.scope())), logsumexp(&terms))
                .with_children(children))
        }
        Spn::Product(product) => {
            let label = format!("product {}", fmt_scope(product.scope()));
            match split_event(product.children(), event)? {
                Split::Impossible => Ok(EvalTrace::new(label, f64::NEG_INFINITY)),
                Split::Parts(parts) => {
                    let mut children = Vec::new();
                    for (index, sub) in &parts {
                        children.push(explain_node(&product.children()[*index], sub)?);
                    }
                    let log_prob = children.iter().map(|c| c.log_prob).sum();
                    Ok(EvalTrace::new(label, log_prob).with_children(children))
                }
            }
        }
    }
}
