//! Metrics Module - Windowed research metrics
//!
//! ISS, PSU and ICC come from the trailing window of records; FAH scans
//! the full history.

pub mod report;

use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_FAH, METRICS_WINDOW};
use crate::logic::signals::SignalRecord;
use crate::logic::stats::mean;

pub use report::generate_latex_appendix;

/// Gradient variance above which a record counts as an early warning
const DETECTION_GRAD_VARIANCE: f64 = 0.8;

/// Activation entropy below which a record counts as an early warning
const DETECTION_ACT_ENTROPY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ResearchMetrics {
    /// Internal Stability Score
    pub iss: f64,
    /// Predictive Self-Uncertainty
    pub psu: f64,
    /// Internal Confidence Collapse, >= 0
    pub icc: f64,
    /// Failure Anticipation Horizon in epochs
    pub fah: u32,
}

impl Default for ResearchMetrics {
    fn default() -> Self {
        Self {
            iss: 1.0,
            psu: 0.0,
            icc: 0.0,
            fah: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator {
    window: usize,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(METRICS_WINDOW)
    }
}

impl MetricsCalculator {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn calculate(&self, history: &[SignalRecord], failure_epoch: Option<u32>) -> ResearchMetrics {
        let start = history.len().saturating_sub(self.window);
        let recent = &history[start..];

        let grad_var: Vec<f64> = recent.iter().map(|r| r.gradient_variance).collect();
        let drift: Vec<f64> = recent.iter().map(|r| r.latent_drift).collect();
        let entropy: Vec<f64> = recent.iter().map(|r| r.prediction_entropy).collect();

        let iss = 1.0 / (1.0 + mean(&grad_var) + mean(&drift));
        let psu = mean(&entropy);

        let icc = match recent.last() {
            Some(last) => {
                let peak = recent
                    .iter()
                    .map(|r| r.confidence())
                    .fold(f64::NEG_INFINITY, f64::max);
                (peak - last.confidence()).max(0.0)
            }
            None => 0.0,
        };

        ResearchMetrics {
            iss: if iss.is_finite() { iss } else { 0.0 },
            psu,
            icc,
            fah: failure_anticipation_horizon(history, failure_epoch),
        }
    }
}

/// First epoch showing an early-warning signal, over the full history
pub fn first_detection(history: &[SignalRecord]) -> Option<u32> {
    history
        .iter()
        .find(|r| {
            r.gradient_variance > DETECTION_GRAD_VARIANCE
                || r.activation_entropy < DETECTION_ACT_ENTROPY
        })
        .map(|r| r.epoch)
}

/// Epochs between first detection and the known failure epoch.
///
/// 0 without a failure epoch; the fallback horizon when nothing was
/// detected strictly before it.
pub fn failure_anticipation_horizon(history: &[SignalRecord], failure_epoch: Option<u32>) -> u32 {
    let Some(failure_epoch) = failure_epoch else {
        return 0;
    };

    match first_detection(history) {
        Some(detected) if detected < failure_epoch => failure_epoch - detected,
        _ => FALLBACK_FAH,
    }
}
