//! Model Module - Introspection model
//!
//! Owns ablation-weighted risk scoring, counterfactual projections and the
//! awareness score, and fronts the causal, memory and advisor engines.
//!
//! # Architecture
//! - `ablation.rs`: `Ablation`, `AblationSet`, `FeatureWeights`
//! - `risk.rs`: `RiskAssessment`, `RiskLevel`, penalty terms
//! - `counterfactual.rs`: learning-rate / batch-size sensitivity curves

pub mod ablation;
pub mod risk;
pub mod counterfactual;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::logic::advisor::{Intervention, InterventionAdvisor};
use crate::logic::causal::{CausalEngine, CausalGraph};
use crate::logic::memory::{Episode, EpisodeMemory, SimilarEpisode};
use crate::logic::signals::SignalRecord;

pub use ablation::{Ablation, AblationSet, FeatureWeights};
pub use counterfactual::{CounterfactualProjection, HyperParams, SensitivityPoint};
pub use risk::{RiskAssessment, RiskLevel, RiskTerms};

/// Whether labels are available. Only changes the reported mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelMode {
    GroundTruth,
    #[default]
    NoGroundTruth,
}

impl ModelMode {
    pub fn from_flag(ground_truth: bool) -> Self {
        if ground_truth {
            ModelMode::GroundTruth
        } else {
            ModelMode::NoGroundTruth
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelMode::GroundTruth => "Supervised (Ground Truth)",
            ModelMode::NoGroundTruth => "Self-Supervised (No Ground Truth)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntrospectionModel {
    ablations: AblationSet,
    weights: FeatureWeights,
    mode: ModelMode,
    causal: CausalEngine,
    memory: EpisodeMemory,
    advisor: InterventionAdvisor,
}

impl Default for IntrospectionModel {
    fn default() -> Self {
        Self::new(AblationSet::none(), ModelMode::default())
    }
}

impl IntrospectionModel {
    pub fn new(ablations: AblationSet, mode: ModelMode) -> Self {
        Self::with_memory(ablations, mode, EpisodeMemory::new())
    }

    pub fn with_memory(ablations: AblationSet, mode: ModelMode, memory: EpisodeMemory) -> Self {
        Self {
            ablations,
            weights: ablations.weights(),
            mode,
            causal: CausalEngine::new(),
            memory,
            advisor: InterventionAdvisor::new(),
        }
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    pub fn predict_failure_risk(&self, signal: &SignalRecord) -> RiskAssessment {
        let assessment = risk::assess(signal, &self.weights);
        log::trace!(
            "Epoch {} risk {:.4} ({})",
            signal.epoch,
            assessment.score,
            assessment.level
        );
        assessment
    }

    pub fn simulate_counterfactuals(
        &self,
        signal: &SignalRecord,
        params: HyperParams,
    ) -> CounterfactualProjection {
        counterfactual::project(signal, params)
    }

    /// Penalizes gradient/drift divergence and extreme confidence dispersion
    pub fn awareness_confidence(&self, signal: &SignalRecord) -> f64 {
        let divergence = (signal.gradient_norm - signal.latent_drift).abs().min(1.0);
        let dispersion = (0.5 - signal.confidence_dispersion).abs();
        let value = (1.0 - divergence) * (1.0 - dispersion);
        if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
    }

    // ------------------------------------------------------------------
    // Ablations / mode
    // ------------------------------------------------------------------

    /// Replaces the whole ablation set
    pub fn set_ablations<I: IntoIterator<Item = Ablation>>(&mut self, list: I) {
        let set: AblationSet = list.into_iter().collect();
        if set != self.ablations {
            log::info!("Ablations changed: {} -> {}", self.ablations, set);
        }
        self.ablations = set;
        self.weights = set.weights();
    }

    pub fn ablations(&self) -> AblationSet {
        self.ablations
    }

    pub fn weights(&self) -> FeatureWeights {
        self.weights
    }

    pub fn mode(&self) -> ModelMode {
        self.mode
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    // ------------------------------------------------------------------
    // Delegation
    // ------------------------------------------------------------------

    pub fn build_causal_graph(
        &self,
        signal: &SignalRecord,
        is_failing: bool,
        failure_risk: f64,
    ) -> CausalGraph {
        self.causal.build(signal, is_failing, failure_risk)
    }

    pub fn build_causal_graph_with_history(
        &self,
        history: &[SignalRecord],
        is_failing: bool,
        failure_risk: f64,
    ) -> CausalGraph {
        self.causal.build_with_history(history, is_failing, failure_risk)
    }

    pub fn find_similar(&self, signal: &SignalRecord) -> Vec<SimilarEpisode> {
        self.memory.find_similar(signal)
    }

    pub fn add_episode(&mut self, episode: Episode) {
        self.memory.add_episode(episode);
    }

    pub fn memory(&self) -> &EpisodeMemory {
        &self.memory
    }

    pub fn advise(&self, risk_score: f64, graph: &CausalGraph) -> Vec<Intervention> {
        self.advisor.advise(risk_score, graph)
    }
}
