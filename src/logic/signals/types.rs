//! Signal Types
//!
//! Core types for training signals.
//! No logic beyond trivial derived values.

use serde::{Deserialize, Serialize};

// ============================================================================
// SIGNAL RECORD
// ============================================================================

/// One epoch of internal model signals.
///
/// Records arrive in increasing epoch order. That ordering and the
/// presence of every field are caller preconditions and are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalRecord {
    pub epoch: u32,
    pub gradient_norm: f64,
    pub gradient_variance: f64,
    /// Entropy of hidden activations
    pub activation_entropy: f64,
    /// Entropy of the output distribution
    pub prediction_entropy: f64,
    pub dead_neuron_ratio: f64,
    pub latent_drift: f64,
    pub inter_class_separation: f64,
    pub confidence_dispersion: f64,
    pub loss_curvature: f64,
    pub accuracy: f64,
    pub loss: f64,
}

impl SignalRecord {
    /// Prediction confidence, `1 - prediction_entropy`
    pub fn confidence(&self) -> f64 {
        1.0 - self.prediction_entropy
    }

    /// Partial copy kept by episode memory
    pub fn snapshot(&self) -> SignalSnapshot {
        SignalSnapshot {
            gradient_norm: self.gradient_norm,
            activation_entropy: self.activation_entropy,
            latent_drift: Some(self.latent_drift),
            loss_curvature: Some(self.loss_curvature),
        }
    }
}

// ============================================================================
// SIGNAL SNAPSHOT
// ============================================================================

/// Partial signal stored with a past episode.
///
/// Similarity only ever reads `gradient_norm` and `activation_entropy`;
/// the optional fields are informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub gradient_norm: f64,
    pub activation_entropy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latent_drift: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_curvature: Option<f64>,
}

impl SignalSnapshot {
    pub fn new(gradient_norm: f64, activation_entropy: f64) -> Self {
        Self {
            gradient_norm,
            activation_entropy,
            latent_drift: None,
            loss_curvature: None,
        }
    }
}
