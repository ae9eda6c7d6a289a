//! Risk Scoring
//!
//! Four gated penalty terms pushed through a sigmoid.

use serde::{Deserialize, Serialize};

use super::ablation::FeatureWeights;
use crate::constants::{MAX_RISK_UNCERTAINTY, RISK_SIGMOID_GAIN, RISK_SIGMOID_OFFSET};
use crate::logic::signals::SignalRecord;
use crate::logic::stats::sigmoid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Emerging,
    Elevated,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            RiskLevel::Critical
        } else if score > 0.6 {
            RiskLevel::Elevated
        } else if score > 0.3 {
            RiskLevel::Emerging
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Emerging => "Emerging",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted penalty terms before the sigmoid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskTerms {
    pub gradient: f64,
    pub activation: f64,
    pub latent: f64,
    pub entropy: f64,
}

impl RiskTerms {
    pub fn compute(signal: &SignalRecord, w: &FeatureWeights) -> Self {
        Self {
            gradient: (signal.gradient_norm - 0.8).max(0.0) * 0.5 * w.gradient,
            activation: (1.0 - signal.activation_entropy).max(0.0) * 0.4 * w.activation,
            latent: (signal.latent_drift - 1.0).max(0.0) * 0.8 * w.latent,
            entropy: (0.2 - signal.confidence_dispersion).max(0.0) * 0.5 * w.entropy,
        }
    }

    pub fn raw(&self) -> f64 {
        self.gradient + self.activation + self.latent + self.entropy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// [0, 1]
    pub score: f64,
    pub level: RiskLevel,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub terms: RiskTerms,
}

pub fn assess(signal: &SignalRecord, weights: &FeatureWeights) -> RiskAssessment {
    let terms = RiskTerms::compute(signal, weights);
    let probability = sigmoid(RISK_SIGMOID_GAIN * (terms.raw() - RISK_SIGMOID_OFFSET));
    let score = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };

    let uncertainty = (signal.confidence_dispersion * 0.5).clamp(0.0, MAX_RISK_UNCERTAINTY);
    let band = |v: f64| if v.is_nan() { score } else { v.clamp(0.0, 1.0) };

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        confidence_lower: band(score - uncertainty),
        confidence_upper: band(score + uncertainty),
        terms,
    }
}
