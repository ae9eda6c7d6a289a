//! Failure Module - Sliding-window failure detector
//!
//! Detects training failure from the trailing window of accuracy, loss and
//! confidence, relative to a baseline learned during warm-up.
//!
//! # Rules (first match wins)
//! 1. `ACCURACY_DEGRADATION`: baseline accuracy - mean(window accuracy) > thresh
//! 2. `LOSS_DIVERGENCE`: mean(window loss) - baseline loss > thresh
//! 3. `CONFIDENCE_COLLAPSE`: mean(window confidence) < thresh
//!
//! # Failure Strategy
//! Never errors. Below `window_size` entries the state is always healthy.

pub mod types;

use crate::constants::BASELINE_WARMUP;
use crate::logic::signals::SignalRecord;

pub use types::{Baseline, EpochObservation, FailureConfig, FailureState, FailureType};

// ============================================================================
// ENGINE
// ============================================================================

/// Stateful detector. One instance per monitored experiment.
#[derive(Debug, Clone, Default)]
pub struct FailureEngine {
    config: FailureConfig,
    history: Vec<EpochObservation>,
    baseline: Baseline,
}

impl FailureEngine {
    pub fn new(config: FailureConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
            baseline: Baseline::default(),
        }
    }

    pub fn config(&self) -> &FailureConfig {
        &self.config
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn history(&self) -> &[EpochObservation] {
        &self.history
    }

    /// Append one observation. The baseline learns only during warm-up.
    pub fn update(&mut self, obs: EpochObservation) {
        if self.history.len() < BASELINE_WARMUP {
            self.baseline.absorb(&obs);
        }
        self.history.push(obs);

        if self.history.len() == BASELINE_WARMUP {
            log::info!(
                "Failure baseline frozen after {} updates: acc={:.4}, loss={:.4}",
                BASELINE_WARMUP,
                self.baseline.baseline_accuracy,
                self.baseline.loss()
            );
        }
    }

    /// Convenience wrapper for a full signal record
    pub fn update_from_signal(&mut self, record: &SignalRecord) {
        self.update(EpochObservation::from(record));
    }

    /// Evaluate the trailing window
    pub fn check_failure(&self, current_epoch: u32) -> FailureState {
        let window_size = self.config.window_size;
        if window_size == 0 || self.history.len() < window_size {
            return FailureState::healthy(current_epoch);
        }

        let window = &self.history[self.history.len() - window_size..];
        let n = window_size as f64;
        let mean_acc = window.iter().map(|o| o.accuracy).sum::<f64>() / n;
        let mean_loss = window.iter().map(|o| o.loss).sum::<f64>() / n;
        let mean_conf = window.iter().map(|o| o.confidence).sum::<f64>() / n;

        let matched = FailureType::PRIORITY.into_iter().find(|kind| match kind {
            FailureType::AccuracyDegradation => {
                self.baseline.baseline_accuracy - mean_acc > self.config.acc_degradation_thresh
            }
            FailureType::LossDivergence => {
                mean_loss - self.baseline.loss() > self.config.loss_increase_thresh
            }
            FailureType::ConfidenceCollapse => mean_conf < self.config.confidence_collapse_thresh,
        });

        match matched {
            Some(kind) => {
                let duration = self.calculate_duration(kind);
                log::debug!(
                    "Epoch {}: {} active for {} epochs",
                    current_epoch,
                    kind,
                    duration
                );
                FailureState {
                    is_failure: true,
                    failure_type: Some(kind),
                    failure_duration: duration,
                    epoch: current_epoch,
                }
            }
            None => FailureState::healthy(current_epoch),
        }
    }

    /// Consecutive newest entries matching the rule's single-entry predicate
    pub fn calculate_duration(&self, kind: FailureType) -> u32 {
        self.history
            .iter()
            .rev()
            .take_while(|obs| self.entry_matches(kind, obs))
            .count() as u32
    }

    fn entry_matches(&self, kind: FailureType, obs: &EpochObservation) -> bool {
        match kind {
            FailureType::AccuracyDegradation => {
                self.baseline.baseline_accuracy - obs.accuracy > self.config.acc_degradation_thresh
            }
            FailureType::LossDivergence => {
                obs.loss - self.baseline.loss() > self.config.loss_increase_thresh
            }
            FailureType::ConfidenceCollapse => obs.confidence < self.config.confidence_collapse_thresh,
        }
    }

    /// Forget history and baseline
    pub fn reset(&mut self) {
        self.history.clear();
        self.baseline = Baseline::default();
        log::info!("Failure engine has been reset");
    }
}
