//! Configuration module

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::logic::failure::FailureConfig;
use crate::logic::model::{AblationSet, ModelMode};

/// Per-session engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Failure detector thresholds
    pub failure: FailureConfig,

    /// Signal families forced to zero weight
    pub ablations: AblationSet,

    /// Ground-truth availability (report-only)
    pub mode: ModelMode,

    /// Trailing records used by the research metrics
    pub metrics_window: usize,

    /// Episode memory capacity
    pub memory_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            failure: FailureConfig::default(),
            ablations: AblationSet::none(),
            mode: ModelMode::default(),
            metrics_window: METRICS_WINDOW,
            memory_capacity: EPISODE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        let ablations = match std::env::var(ENV_ABLATIONS) {
            Ok(list) => AblationSet::parse_list(&list).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", ENV_ABLATIONS, e);
                AblationSet::none()
            }),
            Err(_) => AblationSet::none(),
        };

        Self {
            failure: FailureConfig::from_env(),
            ablations,
            mode: ModelMode::from_flag(get_env_flag(ENV_GROUND_TRUTH)),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.failure.validate()?;
        if self.metrics_window == 0 {
            return Err(EngineError::InvalidConfig("metrics_window must be at least 1".to_string()));
        }
        if self.memory_capacity == 0 {
            return Err(EngineError::InvalidConfig("memory_capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
