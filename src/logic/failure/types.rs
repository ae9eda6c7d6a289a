//! Failure Types
//!
//! Data structures for the failure detector.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::logic::signals::SignalRecord;

// ============================================================================
// CONFIG
// ============================================================================

/// Failure detector thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureConfig {
    /// Accuracy drop (baseline - window mean) that triggers degradation
    pub acc_degradation_thresh: f64,

    /// Loss rise (window mean - baseline) that triggers divergence
    pub loss_increase_thresh: f64,

    /// Window mean confidence below which confidence has collapsed
    pub confidence_collapse_thresh: f64,

    /// Trailing entries evaluated per check
    pub window_size: usize,
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            acc_degradation_thresh: DEFAULT_ACC_DEGRADATION_THRESH,
            loss_increase_thresh: DEFAULT_LOSS_INCREASE_THRESH,
            confidence_collapse_thresh: DEFAULT_CONFIDENCE_COLLAPSE_THRESH,
            window_size: DEFAULT_FAILURE_WINDOW,
        }
    }
}

impl FailureConfig {
    pub fn from_env() -> Self {
        Self {
            acc_degradation_thresh: get_env_f64(ENV_ACC_DEGRADATION, DEFAULT_ACC_DEGRADATION_THRESH),
            loss_increase_thresh: get_env_f64(ENV_LOSS_INCREASE, DEFAULT_LOSS_INCREASE_THRESH),
            confidence_collapse_thresh: get_env_f64(
                ENV_CONFIDENCE_COLLAPSE,
                DEFAULT_CONFIDENCE_COLLAPSE_THRESH,
            ),
            window_size: get_env_usize(ENV_WINDOW_SIZE, DEFAULT_FAILURE_WINDOW),
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        let thresholds = [
            ("acc_degradation_thresh", self.acc_degradation_thresh),
            ("loss_increase_thresh", self.loss_increase_thresh),
            ("confidence_collapse_thresh", self.confidence_collapse_thresh),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.window_size == 0 {
            return Err(EngineError::InvalidConfig("window_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// HISTORY ENTRY / BASELINE
// ============================================================================

/// What the detector keeps per update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochObservation {
    pub accuracy: f64,
    pub loss: f64,
    pub confidence: f64,
}

impl From<&SignalRecord> for EpochObservation {
    fn from(record: &SignalRecord) -> Self {
        Self {
            accuracy: record.accuracy,
            loss: record.loss,
            confidence: record.confidence(),
        }
    }
}

/// Warm-up baseline: running max accuracy, running min loss
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Baseline {
    pub baseline_accuracy: f64,
    /// `None` until the first loss is observed
    pub baseline_loss: Option<f64>,
}

impl Baseline {
    pub fn absorb(&mut self, obs: &EpochObservation) {
        self.baseline_accuracy = self.baseline_accuracy.max(obs.accuracy);
        self.baseline_loss = Some(match self.baseline_loss {
            Some(current) => current.min(obs.loss),
            None => obs.loss,
        });
    }

    /// Loss baseline, 0 before any observation
    pub fn loss(&self) -> f64 {
        self.baseline_loss.unwrap_or(0.0)
    }
}

// ============================================================================
// FAILURE STATE
// ============================================================================

/// Failure rules, in evaluation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureType {
    AccuracyDegradation,
    LossDivergence,
    ConfidenceCollapse,
}

impl FailureType {
    pub const PRIORITY: [FailureType; 3] = [
        FailureType::AccuracyDegradation,
        FailureType::LossDivergence,
        FailureType::ConfidenceCollapse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureType::AccuracyDegradation => "ACCURACY_DEGRADATION",
            FailureType::LossDivergence => "LOSS_DIVERGENCE",
            FailureType::ConfidenceCollapse => "CONFIDENCE_COLLAPSE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FailureType::AccuracyDegradation => "Accuracy fell well below its warm-up peak",
            FailureType::LossDivergence => "Loss climbed well above its warm-up minimum",
            FailureType::ConfidenceCollapse => "Prediction confidence collapsed",
        }
    }
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one failure check. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FailureState {
    pub is_failure: bool,
    /// `None` when no rule matched
    pub failure_type: Option<FailureType>,
    pub failure_duration: u32,
    /// Epoch the check was made for
    pub epoch: u32,
}

impl FailureState {
    pub fn healthy(epoch: u32) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }
}
