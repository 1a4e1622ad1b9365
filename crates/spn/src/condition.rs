//! Conditioning: the exact posterior graph given an event.
//!
//! The posterior has the same shape as the prior, minus the alternatives
//! the event rules out:
//!
//! - a leaf becomes its distribution truncated to the solved outcomes
//! - a sum drops children of probability zero and reweights the rest by
//!   how well they explain the event
//! - a product conditions only the children the event constrains

use std::sync::Arc;

use spn_core::Event;
use spn_prob::{ProbError, Truncated};

use crate::engine::Engine;
use crate::error::{fmt_scope, SpnError};
use crate::evaluate::{log_prob_node, logsumexp, split_event, Split};
use crate::graph::{LeafNode, ProductNode, Spn, SumNode};

impl Engine {
    /// Condition `spn` on `event`.
    ///
    /// # Errors
    ///
    /// - [`SpnError::ZeroProbability`] if the event is impossible under `spn`
    /// - anything [`Engine::log_probability`] reports for the event
    pub fn condition(&self, spn: &Spn, event: &Event) -> Result<Spn, SpnError> {
        let nnf = self.prepare(spn, event)?;
        let log_prob = log_prob_node(spn, &nnf)?;
        if log_prob == f64::NEG_INFINITY || log_prob.is_nan() {
            tracing::debug!(event = %event, "conditioning on an impossible event");
            return Err(zero_probability(event));
        }
        let posterior = self.condition_node(spn, &nnf)?;
        tracing::debug!(
            event = %event,
            log_prob,
            scope = %fmt_scope(posterior.scope()),
            size = posterior.size(),
            "graph conditioned"
        );
        Ok(posterior)
    }

    fn condition_node(&self, spn: &Spn, event: &Event) -> Result<Spn, SpnError> {
        match spn {
            Spn::Leaf(leaf) => {
                let support = event.solve(leaf.symbol())?;
                let truncated = Truncated::new(leaf.distribution().clone(), support)
                    .map_err(|err| match err {
                        ProbError::ZeroMass => zero_probability(event),
                        other => other.into(),
                    })?;
                Ok(Spn::Leaf(LeafNode::new(
                    leaf.symbol().clone(),
                    Arc::new(truncated),
                )))
            }
            Spn::Sum(sum) => {
                let mut log_weights = Vec::new();
                let mut children = Vec::new();
                for (lw, child) in sum.log_weights().iter().zip(sum.children()) {
                    let lp = log_prob_node(child, event)?;
                    if lp == f64::NEG_INFINITY {
                        continue;
                    }
                    log_weights.push(lw + lp);
                    children.push(self.condition_node(child, event)?);
                }

                let norm = logsumexp(&log_weights);
                if norm == f64::NEG_INFINITY {
                    return Err(zero_probability(event));
                }
                if children.len() == 1 {
                    if let Some(only) = children.pop() {
                        return Ok(only);
                    }
                }
                let log_weights = log_weights.iter().map(|w| w - norm).collect();
                Ok(Spn::Sum(SumNode::new(log_weights, children, self.config())?))
            }
            Spn::Product(product) => match split_event(product.children(), event)? {
                Split::Impossible => Err(zero_probability(event)),
                Split::Parts(parts) => {
                    let mut children = product.children().to_vec();
                    for (index, sub) in &parts {
                        children[*index] = self.condition_node(&product.children()[*index], sub)?;
                    }
                    Ok(Spn::Product(ProductNode::new(children, self.config())?))
                }
            },
        }
    }
}

fn zero_probability(event: &Event) -> SpnError {
    SpnError::ZeroProbability {
        event: event.to_string(),
    }
}
