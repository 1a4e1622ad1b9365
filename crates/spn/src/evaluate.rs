//! Exact probability evaluation.
//!
//! Queries recurse over the bound graph:
//!
//! - a leaf solves the event for its symbol and asks its distribution
//! - a sum combines its children with a stable log-sum-exp
//! - a product splits a conjunctive event across its independent children
//!   and adds their log-probabilities
//!
//! Everything happens in log space; [`Engine::probability`] exponentiates
//! once at the end.

use spn_core::Event;

use crate::engine::Engine;
use crate::error::SpnError;
use crate::graph::Spn;

pub use spn_prob::logsumexp;

/// How a product splits an event across its children.
pub(crate) enum Split {
    /// A conjunct is constantly false.
    Impossible,
    /// `(child index, sub-event)` for every child the event constrains.
    Parts(Vec<(usize, Event)>),
}

/// Assign each top-level conjunct of `event` to the one child whose scope
/// holds all of its symbols.
pub(crate) fn split_event(children: &[Spn], event: &Event) -> Result<Split, SpnError> {
    let mut groups: Vec<Vec<Event>> = vec![Vec::new(); children.len()];
    for conjunct in event.conjuncts() {
        match conjunct.constant() {
            Some(true) => continue,
            Some(false) => return Ok(Split::Impossible),
            None => {}
        }
        let symbols = conjunct.symbols();
        match children
            .iter()
            .position(|child| symbols.is_subset(child.scope()))
        {
            Some(index) => groups[index].push(conjunct.clone()),
            None => {
                return Err(SpnError::UnsupportedEvent {
                    reason: format!("`{}` spans several independent factors", conjunct),
                })
            }
        }
    }

    let parts = groups
        .into_iter()
        .enumerate()
        .filter(|(_, group)| !group.is_empty())
        .map(|(index, mut group)| {
            let event = if group.len() == 1 {
                group.remove(0)
            } else {
                Event::And(group)
            };
            (index, event)
        })
        .collect();
    Ok(Split::Parts(parts))
}

impl Engine {
    /// Exact log-probability of `event` under `spn`.
    ///
    /// # Errors
    ///
    /// - [`SpnError::UnboundSymbol`] if the event mentions a symbol outside
    ///   the graph's scope
    /// - [`SpnError::UnsupportedEvent`] if a product cannot split the event
    /// - [`SpnError::ModelTooDeep`] if the graph or the event is nested
    ///   deeper than allowed
    pub fn log_probability(&self, spn: &Spn, event: &Event) -> Result<f64, SpnError> {
        let event = self.prepare(spn, event)?;
        let log_prob = log_prob_node(spn, &event)?;
        tracing::trace!(event = %event, log_prob, "query evaluated");
        Ok(log_prob)
    }

    /// Exact probability of `event` under `spn`, in `[0, 1]`.
    pub fn probability(&self, spn: &Spn, event: &Event) -> Result<f64, SpnError> {
        let log_prob = self.log_probability(spn, event)?;
        Ok(log_prob.exp().clamp(0.0, 1.0))
    }

    /// Check a query against the graph and normalize the event.
    ///
    /// The event's nesting depth is checked before anything walks it
    /// recursively.
    pub(crate) fn prepare(&self, spn: &Spn, event: &Event) -> Result<Event, SpnError> {
        self.check_depth(spn.depth())?;
        self.check_depth(event.depth())?;
        let scope = spn.scope();
        if let Some(symbol) = event.symbols().into_iter().find(|s| !scope.contains(s)) {
            tracing::debug!(symbol = %symbol, "event references an unbound symbol");
            return Err(SpnError::UnboundSymbol { symbol });
        }
        Ok(event.to_nnf())
    }
}

pub(crate) fn log_prob_node(spn: &Spn, event: &Event) -> Result<f64, SpnError> {
    match spn {
        Spn::Leaf(leaf) => leaf.log_prob(event),
        Spn::Sum(sum) => {
            let terms = sum
                .log_weights()
                .iter()
                .zip(sum.children())
                .map(|(lw, child)| Ok(lw + log_prob_node(child, event)?))
                .collect::<Result<Vec<f64>, SpnError>>()?;
            Ok(logsumexp(&terms))
        }
        Spn::Product(product) => match split_event(product.children(), event)? {
            Split::Impossible => Ok(f64::NEG_INFINITY),
            Split::Parts(parts) => {
                let mut total = 0.0;
                for (index, sub) in &parts {
                    total += log_prob_node(&product.children()[*index], sub)?;
                }
                Ok(total)
            }
        },
    }
}
