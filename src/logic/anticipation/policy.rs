//! Adaptive Policy
//!
//! Replaces static thresholds with bounds learned from recent behavior.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{POLICY_SIGMA, POLICY_WINDOW};
use crate::logic::signals::SignalRecord;
use crate::logic::stats::{mean, std_dev};

/// Samples required before learned stats replace the defaults
const MIN_SAMPLES: usize = 5;

/// Keeps the learned std away from zero
const STD_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMetric {
    Entropy,
    GradientNorm,
    Drift,
}

impl PolicyMetric {
    pub const ALL: [PolicyMetric; 3] = [
        PolicyMetric::Entropy,
        PolicyMetric::GradientNorm,
        PolicyMetric::Drift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyMetric::Entropy => "entropy",
            PolicyMetric::GradientNorm => "gradient_norm",
            PolicyMetric::Drift => "drift",
        }
    }

    fn index(self) -> usize {
        match self {
            PolicyMetric::Entropy => 0,
            PolicyMetric::GradientNorm => 1,
            PolicyMetric::Drift => 2,
        }
    }

    fn default_stats(self) -> PolicyStats {
        match self {
            PolicyMetric::Entropy => PolicyStats { mean: 0.5, std: 0.1 },
            PolicyMetric::GradientNorm => PolicyStats { mean: 1.0, std: 0.2 },
            PolicyMetric::Drift => PolicyStats { mean: 0.0, std: 0.05 },
        }
    }
}

/// The three monitored values for one observation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyMetrics {
    pub entropy: f64,
    pub gradient_norm: f64,
    pub drift: f64,
}

impl PolicyMetrics {
    pub fn get(&self, metric: PolicyMetric) -> f64 {
        match metric {
            PolicyMetric::Entropy => self.entropy,
            PolicyMetric::GradientNorm => self.gradient_norm,
            PolicyMetric::Drift => self.drift,
        }
    }
}

impl From<&SignalRecord> for PolicyMetrics {
    fn from(record: &SignalRecord) -> Self {
        Self {
            entropy: record.prediction_entropy,
            gradient_norm: record.gradient_norm,
            drift: record.latent_drift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyStats {
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone)]
pub struct AdaptivePolicy {
    window: usize,
    sigma: f64,
    history: [VecDeque<f64>; 3],
    stats: [PolicyStats; 3],
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self::new(POLICY_WINDOW, POLICY_SIGMA)
    }
}

impl AdaptivePolicy {
    pub fn new(window: usize, sigma: f64) -> Self {
        Self {
            window: window.max(1),
            sigma,
            history: Default::default(),
            stats: PolicyMetric::ALL.map(PolicyMetric::default_stats),
        }
    }

    pub fn update(&mut self, metrics: &PolicyMetrics) {
        for metric in PolicyMetric::ALL {
            let buf = &mut self.history[metric.index()];
            buf.push_back(metrics.get(metric));
            while buf.len() > self.window {
                buf.pop_front();
            }

            if buf.len() > MIN_SAMPLES {
                let values: Vec<f64> = buf.iter().copied().collect();
                self.stats[metric.index()] = PolicyStats {
                    mean: mean(&values),
                    std: std_dev(&values) + STD_FLOOR,
                };
            }
        }
    }

    pub fn stats(&self, metric: PolicyMetric) -> PolicyStats {
        self.stats[metric.index()]
    }

    /// Upper bound per metric: mean + sigma * std
    pub fn threshold(&self, metric: PolicyMetric) -> f64 {
        let s = self.stats(metric);
        s.mean + self.sigma * s.std
    }

    pub fn thresholds(&self) -> Vec<(PolicyMetric, f64)> {
        PolicyMetric::ALL.iter().map(|m| (*m, self.threshold(*m))).collect()
    }

    /// Metrics strictly above their bound, in fixed order
    pub fn check_violation(&self, metrics: &PolicyMetrics) -> Vec<PolicyMetric> {
        PolicyMetric::ALL
            .into_iter()
            .filter(|m| metrics.get(*m) > self.threshold(*m))
            .collect()
    }

    pub fn sample_count(&self) -> usize {
        self.history[0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(entropy: f64, gradient_norm: f64, drift: f64) -> PolicyMetrics {
        PolicyMetrics { entropy, gradient_norm, drift }
    }

    #[test]
    fn test_metrics_from_record() {
        let record = SignalRecord {
            prediction_entropy: 0.4,
            gradient_norm: 1.2,
            latent_drift: 0.07,
            activation_entropy: 2.0,
            ..Default::default()
        };
        let m = PolicyMetrics::from(&record);
        assert_eq!(m.entropy, 0.4);
        assert_eq!(m.gradient_norm, 1.2);
        assert_eq!(m.drift, 0.07);
    }

    #[test]
    fn test_default_thresholds() {
        let policy = AdaptivePolicy::default();
        assert!((policy.threshold(PolicyMetric::Entropy) - 0.8).abs() < 1e-12);
        assert!((policy.threshold(PolicyMetric::GradientNorm) - 1.6).abs() < 1e-12);
        assert!((policy.threshold(PolicyMetric::Drift) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_stats_learned_after_five_samples() {
        let mut policy = AdaptivePolicy::default();
        for _ in 0..5 {
            policy.update(&metrics(2.0, 2.0, 2.0));
        }
        assert_eq!(policy.stats(PolicyMetric::Entropy).mean, 0.5);

        policy.update(&metrics(2.0, 2.0, 2.0));
        let learned = policy.stats(PolicyMetric::Entropy);
        assert_eq!(learned.mean, 2.0);
        assert_eq!(learned.std, 1e-6);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut policy = AdaptivePolicy::new(10, 3.0);
        for i in 0..25 {
            policy.update(&metrics(i as f64, 1.0, 0.0));
        }
        assert_eq!(policy.sample_count(), 10);
        assert!((policy.stats(PolicyMetric::Entropy).mean - 19.5).abs() < 1e-12);
    }

    #[test]
    fn test_violations_in_fixed_order() {
        let policy = AdaptivePolicy::default();
        let found = policy.check_violation(&metrics(0.9, 0.5, 0.2));
        assert_eq!(found, vec![PolicyMetric::Entropy, PolicyMetric::Drift]);
    }
}
