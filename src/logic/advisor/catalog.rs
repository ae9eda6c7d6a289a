//! Intervention Catalog
//!
//! Fixed mitigations keyed by the root cause they address.

use serde::{Deserialize, Serialize};

use crate::logic::causal::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cost {
    Low,
    Medium,
    High,
}

impl Cost {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cost::Low => "Low",
            Cost::Medium => "Medium",
            Cost::High => "High",
        }
    }
}

/// A proposed mitigation. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: String,
    pub action: String,
    pub target_metric: String,
    pub expected_gain: f64,
    pub risk: f64,
    pub cost: Cost,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub action: &'static str,
    pub target_metric: &'static str,
    pub expected_gain: f64,
    pub risk: f64,
    pub cost: Cost,
    pub confidence: f64,
}

impl CatalogEntry {
    pub fn to_intervention(&self) -> Intervention {
        Intervention {
            id: self.id.to_string(),
            action: self.action.to_string(),
            target_metric: self.target_metric.to_string(),
            expected_gain: self.expected_gain,
            risk: self.risk,
            cost: self.cost,
            confidence: self.confidence,
        }
    }
}

pub static GRAD_VAR_ACTIONS: [CatalogEntry; 2] = [
    CatalogEntry {
        id: "int-lr-decay",
        action: "Reduce Learning Rate (0.5x)",
        target_metric: "gradient_variance",
        expected_gain: 0.4,
        risk: 0.1,
        cost: Cost::Low,
        confidence: 0.85,
    },
    CatalogEntry {
        id: "int-batch-up",
        action: "Increase Batch Size (2x)",
        target_metric: "gradient_variance",
        expected_gain: 0.3,
        risk: 0.2,
        cost: Cost::Medium,
        confidence: 0.75,
    },
];

pub static LOSS_CURVE_ACTIONS: [CatalogEntry; 1] = [CatalogEntry {
    id: "int-grad-clip",
    action: "Enable Gradient Clipping",
    target_metric: "loss_curvature",
    expected_gain: 0.5,
    risk: 0.05,
    cost: Cost::Low,
    confidence: 0.92,
}];

pub static EARLY_STOP: CatalogEntry = CatalogEntry {
    id: "int-early-stop",
    action: "Early Stop & Rollback",
    target_metric: "failure_risk",
    expected_gain: 0.9,
    risk: 0.0,
    cost: Cost::High,
    confidence: 0.99,
};

/// Catalog entries for a matched root cause
pub fn actions_for(root: NodeId) -> &'static [CatalogEntry] {
    match root {
        NodeId::GradVar => &GRAD_VAR_ACTIONS,
        NodeId::LossCurve => &LOSS_CURVE_ACTIONS,
        _ => &[],
    }
}
