//! The engine: a configuration plus the operations that honor it.
//!
//! The algebra, binding, evaluation and conditioning each live in their own
//! module as `impl Engine` blocks. The engine carries no state besides its
//! configuration, so it is freely shared across threads.

use crate::config::SpnConfig;
use crate::error::SpnError;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: SpnConfig,
}

impl Engine {
    /// Create an engine with a validated configuration.
    pub fn new(config: SpnConfig) -> Result<Self, SpnError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpnConfig {
        &self.config
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), SpnError> {
        if depth > self.config.max_depth {
            tracing::debug!(depth, limit = self.config.max_depth, "model too deep");
            return Err(SpnError::ModelTooDeep {
                depth,
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Engine::new(SpnConfig::default()).is_ok());
        let bad = SpnConfig::default().with_max_depth(0);
        assert!(matches!(
            Engine::new(bad),
            Err(SpnError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_check_depth() {
        let engine = Engine::new(SpnConfig::default().with_max_depth(3)).unwrap();
        assert!(engine.check_depth(3).is_ok());
        assert_eq!(
            engine.check_depth(4),
            Err(SpnError::ModelTooDeep { depth: 4, limit: 3 })
        );
    }
}
