//! Counterfactual Sensitivity
//!
//! Projects gradient variance under alternative learning rates and batch
//! sizes from the current signal alone.

use serde::{Deserialize, Serialize};

use crate::constants::{BATCH_CANDIDATES, LR_CANDIDATES};
use crate::logic::signals::SignalRecord;

/// Hyperparameters the run is currently using
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperParams {
    pub learning_rate: f64,
    pub batch_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: f64,
    pub projected_variance: f64,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterfactualProjection {
    pub base_variance: f64,
    pub learning_rate: Vec<SensitivityPoint>,
    pub batch_size: Vec<SensitivityPoint>,
}

/// Variance scales with (lr ratio)^2 and inversely with batch size.
/// A zero base learning rate or zero candidate batch projects 0.
pub fn project(signal: &SignalRecord, params: HyperParams) -> CounterfactualProjection {
    let base = signal.gradient_variance;

    let learning_rate = LR_CANDIDATES
        .iter()
        .map(|&lr| {
            let projected = if params.learning_rate > 0.0 {
                base * (lr / params.learning_rate).powi(2)
            } else {
                0.0
            };
            SensitivityPoint {
                value: lr,
                projected_variance: projected,
                is_current: (lr - params.learning_rate).abs() < f64::EPSILON,
            }
        })
        .collect();

    let batch_size = BATCH_CANDIDATES
        .iter()
        .map(|&batch| {
            let projected = if batch > 0 {
                base * (params.batch_size as f64 / batch as f64)
            } else {
                0.0
            };
            SensitivityPoint {
                value: batch as f64,
                projected_variance: projected,
                is_current: batch == params.batch_size,
            }
        })
        .collect();

    CounterfactualProjection {
        base_variance: base,
        learning_rate,
        batch_size,
    }
}
