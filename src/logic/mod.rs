//! Logic Module - Analytics engines
//!
//! Failure detection, risk scoring, causal graph, episodic memory,
//! interventions and research metrics.
//!
//! ## Architecture
//! - `signals/` - Input records and JSONL reader
//! - `failure/` - Sliding-window failure detector
//! - `model/` - Introspection model (risk, ablation, counterfactuals)
//! - `causal/` - Rule-based causal graph
//! - `memory/` - Episodic memory with decayed similarity
//! - `advisor/` - Ranked interventions
//! - `metrics/` - ISS / PSU / ICC / FAH
//! - `anticipation/` - Adaptive thresholds and label-free triage
//! - `session` - Per-experiment session objects

pub mod stats;
pub mod signals;
pub mod failure;
pub mod causal;
pub mod memory;
pub mod advisor;
pub mod model;
pub mod metrics;
pub mod anticipation;
pub mod session;
pub mod replay;
