//! Engine configuration.
//!
//! Two knobs control the engine: the tolerance used to decide whether
//! mixture weights sum to exactly 1, and the deepest model the structural
//! recursion is allowed to walk. Both have defaults; a config can be built
//! in code or deserialized from any serde format, with missing fields
//! falling back to the defaults.
//!
//! ```rust
//! use spn::SpnConfig;
//!
//! let config = SpnConfig::default().with_max_depth(64);
//! assert_eq!(config.tolerance, 1e-9);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SpnError;

/// Default tolerance ε for "weights sum to 1".
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default depth bound for structural recursion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpnConfig {
    /// Weights within this distance of 1 close a mixture; beyond it on the
    /// high side they exceed the budget.
    pub tolerance: f64,
    /// Deepest model (in nodes, leaf = 1) that may be built or evaluated.
    pub max_depth: usize,
}

impl Default for SpnConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SpnConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), SpnError> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(SpnError::InvalidConfig {
                reason: format!("tolerance must be in (0, 1), got {}", self.tolerance),
            });
        }
        if self.max_depth == 0 {
            return Err(SpnError::InvalidConfig {
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
