//! Episode Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::signals::{SignalRecord, SignalSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeOutcome {
    Recovered,
    Failed,
}

impl EpisodeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeOutcome::Recovered => "recovered",
            EpisodeOutcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored past failure episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Free-form label, e.g. "Gradient Explosion" or a failure rule name
    pub failure_type: String,
    pub signal_snapshot: SignalSnapshot,
    pub outcome: EpisodeOutcome,
}

impl Episode {
    /// Fresh episode stamped now
    pub fn from_signal(
        signal: &SignalRecord,
        failure_type: impl Into<String>,
        outcome: EpisodeOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            failure_type: failure_type.into(),
            signal_snapshot: signal.snapshot(),
            outcome,
        }
    }
}

/// One hit of a similarity query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarEpisode {
    pub episode: Episode,
    /// Decay-weighted similarity in (0, 1]
    pub similarity: f64,
    pub distance: f64,
    /// Always "Weighted Euclidean"
    pub metric: String,
}
