//! Causal Edge Rules
//!
//! Fixed table of condition → edge templates. Every rule is evaluated
//! independently; several may fire for the same signal.

use super::types::{CausalEdge, NodeId};
use crate::logic::signals::SignalRecord;

// ============================================================================
// CONDITIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    LossCurvatureAbove(f64),
    DeadNeuronsAbove(f64),
    /// Fires on low activation entropy, or whenever the run is failing
    EntropyBelowOrFailing(f64),
    LatentDriftAbove(f64),
}

impl Condition {
    pub fn holds(&self, signal: &SignalRecord, is_failing: bool) -> bool {
        match *self {
            Condition::LossCurvatureAbove(t) => signal.loss_curvature > t,
            Condition::DeadNeuronsAbove(t) => signal.dead_neuron_ratio > t,
            Condition::EntropyBelowOrFailing(t) => signal.activation_entropy < t || is_failing,
            Condition::LatentDriftAbove(t) => signal.latent_drift > t,
        }
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTemplate {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    pub lag: u32,
    pub confidence: f64,
}

impl EdgeTemplate {
    const fn new(source: NodeId, target: NodeId, weight: f64, lag: u32, confidence: f64) -> Self {
        Self { source, target, weight, lag, confidence }
    }

    pub fn to_edge(&self) -> CausalEdge {
        CausalEdge {
            source: self.source,
            target: self.target,
            weight: self.weight,
            lag: self.lag,
            confidence: self.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EdgeRule {
    pub name: &'static str,
    pub condition: Condition,
    pub edges: &'static [EdgeTemplate],
}

pub static EDGE_RULES: [EdgeRule; 4] = [
    EdgeRule {
        name: "curvature_instability",
        condition: Condition::LossCurvatureAbove(1.0),
        edges: &[
            EdgeTemplate::new(NodeId::LossCurve, NodeId::GradVar, 0.8, 0, 0.95),
            EdgeTemplate::new(NodeId::GradVar, NodeId::DeadNeurons, 0.6, 2, 0.85),
        ],
    },
    EdgeRule {
        name: "dead_neurons",
        condition: Condition::DeadNeuronsAbove(0.1),
        edges: &[EdgeTemplate::new(NodeId::DeadNeurons, NodeId::ActEntropy, -0.9, 1, 0.92)],
    },
    EdgeRule {
        name: "entropy_collapse",
        condition: Condition::EntropyBelowOrFailing(1.0),
        edges: &[EdgeTemplate::new(NodeId::ActEntropy, NodeId::FailureRisk, -0.85, 0, 0.9)],
    },
    EdgeRule {
        name: "latent_drift",
        condition: Condition::LatentDriftAbove(0.4),
        edges: &[
            EdgeTemplate::new(NodeId::LatentDrift, NodeId::FailureRisk, 0.75, 5, 0.7),
            EdgeTemplate::new(NodeId::LatentDrift, NodeId::ActEntropy, -0.5, 1, 0.6),
        ],
    },
];

/// Emitted only when no rule fired and the run is not failing
pub static FALLBACK_EDGES: [EdgeTemplate; 2] = [
    EdgeTemplate::new(NodeId::LossCurve, NodeId::GradVar, 0.2, 0, 0.4),
    EdgeTemplate::new(NodeId::GradVar, NodeId::ActEntropy, 0.1, 0, 0.3),
];
