//! Session Module - One engine set per monitored experiment
//!
//! A session owns every stateful component for one run. Callers that
//! share sessions across threads go through `SessionRegistry`, which
//! hands out per-session locks; there is no global engine state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::POLICY_MIN_CONFIDENCE;
use crate::logic::advisor::Intervention;
use crate::logic::anticipation::{AdaptivePolicy, AnticipationEngine, AnticipationReport, PolicyMetrics};
use crate::logic::causal::CausalGraph;
use crate::logic::failure::{FailureEngine, FailureState, FailureType};
use crate::logic::memory::{Episode, EpisodeMemory, EpisodeOutcome, SimilarEpisode};
use crate::logic::metrics::{MetricsCalculator, ResearchMetrics};
use crate::logic::model::{
    Ablation, CounterfactualProjection, HyperParams, IntrospectionModel, RiskAssessment,
};
use crate::logic::signals::SignalRecord;

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Everything the dashboard renders for one poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub experiment_id: String,
    pub epoch: u32,
    pub mode: String,
    pub risk: RiskAssessment,
    pub failure: FailureState,
    pub causal_graph: CausalGraph,
    pub similar_episodes: Vec<SimilarEpisode>,
    pub interventions: Vec<Intervention>,
    pub metrics: ResearchMetrics,
    pub awareness_confidence: f64,
    pub anticipation: AnticipationReport,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExperimentSession {
    id: String,
    failure: FailureEngine,
    model: IntrospectionModel,
    metrics: MetricsCalculator,
    policy: AdaptivePolicy,
    anticipation: AnticipationEngine,
    history: Vec<SignalRecord>,
    active_failure: Option<FailureType>,
}

impl ExperimentSession {
    pub fn new(id: impl Into<String>, config: &EngineConfig) -> Self {
        let id = id.into();
        log::info!(
            "Session '{}' opened (mode: {}, ablations: {})",
            id,
            config.mode.label(),
            config.ablations
        );
        Self {
            id,
            failure: FailureEngine::new(config.failure.clone()),
            model: IntrospectionModel::with_memory(
                config.ablations,
                config.mode,
                EpisodeMemory::with_capacity(config.memory_capacity),
            ),
            metrics: MetricsCalculator::new(config.metrics_window),
            policy: AdaptivePolicy::default(),
            anticipation: AnticipationEngine::new(),
            history: Vec::new(),
            active_failure: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &[SignalRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&SignalRecord> {
        self.history.last()
    }

    pub fn model(&self) -> &IntrospectionModel {
        &self.model
    }

    /// Feed one record to every stateful component
    pub fn push(&mut self, record: SignalRecord) -> FailureState {
        self.failure.update_from_signal(&record);
        if record.confidence() > POLICY_MIN_CONFIDENCE {
            self.policy.update(&PolicyMetrics::from(&record));
        }
        self.history.push(record);

        let state = self.failure.check_failure(record.epoch);
        match (self.active_failure, state.failure_type) {
            (None, Some(kind)) => {
                log::warn!("[{}] Failure detected at epoch {}: {}", self.id, record.epoch, kind);
            }
            (Some(prev), None) => {
                log::info!("[{}] {} cleared at epoch {}", self.id, prev, record.epoch);
            }
            (Some(prev), Some(kind)) if prev != kind => {
                log::warn!("[{}] Failure changed at epoch {}: {} -> {}", self.id, record.epoch, prev, kind);
            }
            _ => {}
        }
        self.active_failure = state.failure_type;
        state
    }

    pub fn failure_state(&self) -> FailureState {
        let epoch = self.latest().map(|r| r.epoch).unwrap_or(0);
        self.failure.check_failure(epoch)
    }

    pub fn set_ablations<I: IntoIterator<Item = Ablation>>(&mut self, list: I) {
        self.model.set_ablations(list);
    }

    pub fn counterfactuals(&self, params: HyperParams) -> Option<CounterfactualProjection> {
        self.latest()
            .map(|signal| self.model.simulate_counterfactuals(signal, params))
    }

    /// Remember the latest record as an episode; returns its id
    pub fn record_episode(&mut self, outcome: EpisodeOutcome) -> Option<String> {
        let latest = *self.latest()?;
        let label = self
            .failure_state()
            .failure_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "UNLABELED".to_string());

        let episode = Episode::from_signal(&latest, label, outcome);
        let id = episode.id.clone();
        log::info!("[{}] Recorded episode {} ({})", self.id, id, episode.failure_type);
        self.model.add_episode(episode);
        Some(id)
    }

    /// Full analytics for the latest record; `None` before the first push
    pub fn snapshot(&self, failure_epoch: Option<u32>) -> Option<DashboardSnapshot> {
        let latest = self.latest()?;

        let failure = self.failure.check_failure(latest.epoch);
        let risk = self.model.predict_failure_risk(latest);
        let causal_graph =
            self.model
                .build_causal_graph_with_history(&self.history, failure.is_failure, risk.score);
        let interventions = self.model.advise(risk.score, &causal_graph);

        let metrics_in = PolicyMetrics::from(latest);
        let violations = self.policy.check_violation(&metrics_in);
        let anticipation = self.anticipation.assess_risk(&metrics_in, &violations);

        Some(DashboardSnapshot {
            experiment_id: self.id.clone(),
            epoch: latest.epoch,
            mode: self.model.mode_label().to_string(),
            risk,
            failure,
            similar_episodes: self.model.find_similar(latest),
            interventions,
            causal_graph,
            metrics: self.metrics.calculate(&self.history, failure_epoch),
            awareness_confidence: self.model.awareness_confidence(latest),
            anticipation,
            generated_at: Utc::now(),
        })
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

pub type SessionHandle = Arc<Mutex<ExperimentSession>>;

/// Experiment id → session. Each session is locked independently.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    config: EngineConfig,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Existing session for `id`, or a fresh one
    pub fn open(&self, id: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.read().get(id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write();
        Arc::clone(
            sessions
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ExperimentSession::new(id, &self.config)))),
        )
    }

    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().get(id).cloned()
    }

    pub fn close(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            log::info!("Session '{}' closed", id);
        }
        removed
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
