//! Anticipation Engine
//!
//! Combines adaptive-threshold violations into a risk level, a numeric
//! score and a causal trace, before accuracy actually drops.

use serde::{Deserialize, Serialize};

use super::policy::{PolicyMetric, PolicyMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnticipationLevel {
    Stable,
    Warning,
    #[serde(rename = "Pre-Failure Risk")]
    PreFailure,
}

impl AnticipationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnticipationLevel::Stable => "Stable",
            AnticipationLevel::Warning => "Warning",
            AnticipationLevel::PreFailure => "Pre-Failure Risk",
        }
    }
}

impl std::fmt::Display for AnticipationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnticipationReport {
    pub risk_level: AnticipationLevel,
    /// [0, 1]
    pub fai_score: f64,
    pub causal_trace: String,
    pub violations: Vec<PolicyMetric>,
}

const STABLE_TRACE: &str = "Signals within adaptive bounds.";
const TRACE_SEPARATOR: &str = " \u{2192} ";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnticipationEngine;

impl AnticipationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess_risk(&self, metrics: &PolicyMetrics, violations: &[PolicyMetric]) -> AnticipationReport {
        let violated = |m: PolicyMetric| violations.contains(&m);
        let mut level = AnticipationLevel::Stable;
        let mut trace: Vec<&str> = Vec::new();

        // Structural instability
        if violated(PolicyMetric::GradientNorm) {
            level = AnticipationLevel::PreFailure;
            trace.push("Sensitivity Spike");
        }

        // Unfamiliar data
        if violated(PolicyMetric::Drift) {
            level = level.max(AnticipationLevel::Warning);
            trace.push("Distribution Drift");
        }

        // Drift compounded by uncertainty
        if violated(PolicyMetric::Drift) && violated(PolicyMetric::Entropy) {
            level = AnticipationLevel::PreFailure;
            trace.push("Confidence Collapse");
        }

        let causal_trace = if trace.is_empty() {
            STABLE_TRACE.to_string()
        } else {
            trace.join(TRACE_SEPARATOR)
        };

        let n = violations.len() as f64;
        let score = match level {
            AnticipationLevel::Stable => 0.1 * (metrics.entropy + metrics.drift),
            AnticipationLevel::Warning => 0.5 + 0.1 * n,
            AnticipationLevel::PreFailure => 0.8 + 0.05 * n,
        };

        if level != AnticipationLevel::Stable {
            log::debug!("Anticipation {}: {}", level, causal_trace);
        }

        AnticipationReport {
            risk_level: level,
            fai_score: score.clamp(0.0, 1.0),
            causal_trace,
            violations: violations.to_vec(),
        }
    }
}
