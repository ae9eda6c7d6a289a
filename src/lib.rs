//! AegisML Core - Training Failure Anticipation Engine
//!
//! Turns a stream of per-epoch internal model signals into failure
//! detection, risk scores, a causal graph, similar past episodes,
//! mitigation advice and research metrics.
//!
//! # Architecture
//!
//! ```text
//! SignalRecord ──► ExperimentSession ──► DashboardSnapshot
//!                   ├─ FailureEngine        (window rules, warm-up baseline)
//!                   ├─ IntrospectionModel   (risk, ablation, counterfactuals)
//!                   │   ├─ CausalEngine     (rule table → graph)
//!                   │   ├─ EpisodeMemory    (FIFO, decayed similarity)
//!                   │   └─ InterventionAdvisor
//!                   ├─ MetricsCalculator    (ISS, PSU, ICC, FAH)
//!                   └─ AdaptivePolicy       (learned bounds → anticipation)
//! ```
//!
//! Everything is synchronous and in-memory. One session per experiment.

pub mod constants;
pub mod config;
pub mod error;
pub mod logic;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use logic::session::{DashboardSnapshot, ExperimentSession, SessionRegistry};
pub use logic::signals::SignalRecord;
