//! Causal Graph Types
//!
//! Fixed 7-node schema. Graphs may contain cycles.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::logic::signals::SignalRecord;

// ============================================================================
// NODES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    GradVar,
    LossCurve,
    DeadNeurons,
    ActEntropy,
    LatentDrift,
    ConfDisp,
    FailureRisk,
}

impl NodeId {
    pub const ALL: [NodeId; 7] = [
        NodeId::GradVar,
        NodeId::LossCurve,
        NodeId::DeadNeurons,
        NodeId::ActEntropy,
        NodeId::LatentDrift,
        NodeId::ConfDisp,
        NodeId::FailureRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeId::GradVar => "grad_var",
            NodeId::LossCurve => "loss_curve",
            NodeId::DeadNeurons => "dead_neurons",
            NodeId::ActEntropy => "act_entropy",
            NodeId::LatentDrift => "latent_drift",
            NodeId::ConfDisp => "conf_disp",
            NodeId::FailureRisk => "failure_risk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeId::GradVar => "Gradient Variance",
            NodeId::LossCurve => "Loss Curvature",
            NodeId::DeadNeurons => "Dead Neurons",
            NodeId::ActEntropy => "Activation Entropy",
            NodeId::LatentDrift => "Latent Drift",
            NodeId::ConfDisp => "Confidence Dispersion",
            NodeId::FailureRisk => "Failure Risk",
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeId::GradVar | NodeId::LossCurve | NodeId::LatentDrift => NodeKind::Root,
            NodeId::DeadNeurons | NodeId::ActEntropy | NodeId::ConfDisp => NodeKind::Mediator,
            NodeId::FailureRisk => NodeKind::Outcome,
        }
    }

    /// Signal backing this node; the outcome node has none
    pub fn signal_value(&self, signal: &SignalRecord) -> Option<f64> {
        match self {
            NodeId::GradVar => Some(signal.gradient_variance),
            NodeId::LossCurve => Some(signal.loss_curvature),
            NodeId::DeadNeurons => Some(signal.dead_neuron_ratio),
            NodeId::ActEntropy => Some(signal.activation_entropy),
            NodeId::LatentDrift => Some(signal.latent_drift),
            NodeId::ConfDisp => Some(signal.confidence_dispersion),
            NodeId::FailureRisk => None,
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Mediator,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalNode {
    pub id: NodeId,
    pub label: String,
    /// Clamped to [0, 1]
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

// ============================================================================
// EDGES / GRAPH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// [-1, 1]
    pub weight: f64,
    /// Epochs between cause and effect
    pub lag: u32,
    /// [0, 1]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CausalGraph {
    pub nodes: Vec<CausalNode>,
    pub edges: Vec<CausalEdge>,
}

impl CausalGraph {
    pub fn node(&self, id: NodeId) -> Option<&CausalNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&CausalEdge> {
        self.edges.iter().find(|e| e.source == source && e.target == target)
    }

    /// Root nodes whose value exceeds `threshold`
    pub fn root_causes(&self, threshold: f64) -> Vec<&CausalNode> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Root && n.value > threshold)
            .collect()
    }

    /// Whether the edge set contains a directed cycle. Cycles are reported, never removed.
    pub fn has_cycle(&self) -> bool {
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for edge in &self.edges {
            adjacency.entry(edge.source).or_default().push(edge.target);
        }

        fn visit(
            node: NodeId,
            adjacency: &HashMap<NodeId, Vec<NodeId>>,
            on_stack: &mut HashSet<NodeId>,
            done: &mut HashSet<NodeId>,
        ) -> bool {
            if on_stack.contains(&node) {
                return true;
            }
            if !done.insert(node) {
                return false;
            }
            on_stack.insert(node);
            let found = adjacency
                .get(&node)
                .map(|next| next.iter().any(|n| visit(*n, adjacency, on_stack, done)))
                .unwrap_or(false);
            on_stack.remove(&node);
            found
        }

        let mut done = HashSet::new();
        NodeId::ALL
            .iter()
            .any(|id| visit(*id, &adjacency, &mut HashSet::new(), &mut done))
    }
}
