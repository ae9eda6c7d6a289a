//! Anticipation Module - Label-free failure triage
//!
//! Learns "normal" ranges for entropy, gradient norm and drift, and turns
//! threshold violations into a risk level with a readable causal trace.
//!
//! # Architecture
//! - `policy.rs`: `AdaptivePolicy` (rolling mean + sigma * std bounds)
//! - `engine.rs`: `AnticipationEngine` (violations → level, trace, score)

pub mod policy;
pub mod engine;

pub use engine::{AnticipationEngine, AnticipationLevel, AnticipationReport};
pub use policy::{AdaptivePolicy, PolicyMetric, PolicyMetrics, PolicyStats};
