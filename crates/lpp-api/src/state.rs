use std::sync::Arc;

use lpp_scoring::{PolicyError, PolicyTable, ScoringEngine};

use crate::{ApiConfig, config::Environment};

/// Shared, read-only state handed to every handler.
///
/// Scoring is a pure function of its inputs, so nothing here is ever mutated
/// after startup and no locking is needed.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub engine: Arc<ScoringEngine>,
    pub policies: Arc<PolicyTable>,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Result<Self, PolicyError> {
        let policies = config.load_policies()?;

        for (module, policy) in policies.iter() {
            tracing::debug!(
                module = %module,
                strategy = ?policy.strategy,
                max_total = policy.max_total(),
                "scoring policy loaded"
            );
        }

        Ok(Self::with_policies(policies, config.env))
    }

    pub fn with_policies(policies: PolicyTable, environment: Environment) -> Self {
        Self {
            engine: Arc::new(ScoringEngine::new()),
            policies: Arc::new(policies),
            environment,
        }
    }
}
