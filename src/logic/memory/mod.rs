//! Memory Module - Episodic failure memory
//!
//! Bounded FIFO of past failure episodes, queried by decayed Euclidean
//! similarity over (gradient norm, activation entropy).

pub mod types;
#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use crate::constants::{EPISODE_CAPACITY, SIMILAR_TOP_K};
use crate::logic::signals::{SignalRecord, SignalSnapshot};

pub use types::{Episode, EpisodeOutcome, SimilarEpisode};

pub const SIMILARITY_METRIC: &str = "Weighted Euclidean";

/// Decay time constant (age is measured in days)
const DECAY_DAYS: f64 = 1.0;

/// Share of similarity that decays with age
const DECAY_SHARE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct EpisodeMemory {
    episodes: VecDeque<Episode>,
    capacity: usize,
}

impl Default for EpisodeMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeMemory {
    /// Capacity 100, seeded with two historical episodes
    pub fn new() -> Self {
        Self::with_capacity(EPISODE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut memory = Self::empty(capacity);
        for episode in seed_episodes(Utc::now()) {
            memory.add_episode(episode);
        }
        memory
    }

    /// No seed episodes
    pub fn empty(capacity: usize) -> Self {
        Self {
            episodes: VecDeque::with_capacity(capacity.min(EPISODE_CAPACITY) + 1),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter()
    }

    /// Append; evicts the oldest when over capacity
    pub fn add_episode(&mut self, episode: Episode) {
        self.episodes.push_back(episode);
        while self.episodes.len() > self.capacity {
            if let Some(evicted) = self.episodes.pop_front() {
                log::debug!("Episode memory full, evicted {}", evicted.id);
            }
        }
    }

    pub fn find_similar(&self, signal: &SignalRecord) -> Vec<SimilarEpisode> {
        self.find_similar_at(signal, Utc::now())
    }

    /// Top 3 episodes by decayed similarity, as of `now`
    pub fn find_similar_at(&self, signal: &SignalRecord, now: DateTime<Utc>) -> Vec<SimilarEpisode> {
        let mut scored: Vec<SimilarEpisode> = self
            .episodes
            .iter()
            .map(|episode| {
                let distance = distance(signal, &episode.signal_snapshot);
                let raw = 1.0 / (1.0 + distance);
                let age_days = age_in_days(episode.timestamp, now);
                let decay = (-age_days / DECAY_DAYS).exp();
                SimilarEpisode {
                    episode: episode.clone(),
                    similarity: raw * ((1.0 - DECAY_SHARE) + DECAY_SHARE * decay),
                    distance,
                    metric: SIMILARITY_METRIC.to_string(),
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(SIMILAR_TOP_K);
        scored
    }
}

fn distance(signal: &SignalRecord, snapshot: &SignalSnapshot) -> f64 {
    let dg = signal.gradient_norm - snapshot.gradient_norm;
    let de = signal.activation_entropy - snapshot.activation_entropy;
    let d = (dg * dg + de * de).sqrt();
    if d.is_finite() { d } else { f64::MAX }
}

/// Future timestamps count as age 0
fn age_in_days(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(timestamp).num_milliseconds().max(0);
    millis as f64 / Duration::days(1).num_milliseconds() as f64
}

/// The two historical episodes every memory starts with
fn seed_episodes(now: DateTime<Utc>) -> [Episode; 2] {
    [
        Episode {
            id: "ep-seed-001".to_string(),
            timestamp: now - Duration::days(7),
            failure_type: "Gradient Explosion".to_string(),
            signal_snapshot: SignalSnapshot {
                gradient_norm: 2.4,
                activation_entropy: 0.6,
                latent_drift: Some(1.2),
                loss_curvature: Some(1.8),
            },
            outcome: EpisodeOutcome::Recovered,
        },
        Episode {
            id: "ep-seed-002".to_string(),
            timestamp: now - Duration::days(3),
            failure_type: "Representation Collapse".to_string(),
            signal_snapshot: SignalSnapshot {
                gradient_norm: 0.3,
                activation_entropy: 0.2,
                latent_drift: Some(0.9),
                loss_curvature: None,
            },
            outcome: EpisodeOutcome::Failed,
        },
    ]
}
