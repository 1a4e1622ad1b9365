//! A distribution restricted to a set of outcomes and renormalized.
//!
//! Conditioning a leaf on an event produces one of these:
//!
//! P(X ∈ A | X ∈ S) = P(X ∈ A ∩ S) / P(X ∈ S)

use std::sync::Arc;

use spn_core::Outcomes;

use crate::error::ProbError;
use crate::{Distribution, Kind};

/// `base` conditioned on `support`.
#[derive(Debug, Clone)]
pub struct Truncated {
    base: Arc<dyn Distribution>,
    support: Outcomes,
    log_mass: f64,
}

impl Truncated {
    /// Restrict `base` to `support`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbError::ZeroMass`] if `base` assigns `support` no
    /// probability.
    pub fn new(base: Arc<dyn Distribution>, support: Outcomes) -> Result<Self, ProbError> {
        let log_mass = base.log_prob(&support);
        if log_mass == f64::NEG_INFINITY || log_mass.is_nan() {
            return Err(ProbError::ZeroMass);
        }
        Ok(Self {
            base,
            support,
            log_mass,
        })
    }

    pub fn base(&self) -> &Arc<dyn Distribution> {
        &self.base
    }

    pub fn support(&self) -> &Outcomes {
        &self.support
    }
}

impl Distribution for Truncated {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn kind(&self) -> Kind {
        self.base.kind()
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        self.log_prob(outcomes).exp().min(1.0)
    }

    fn log_prob(&self, outcomes: &Outcomes) -> f64 {
        let restricted = outcomes.intersection(&self.support);
        (self.base.log_prob(&restricted) - self.log_mass).min(0.0)
    }
}
