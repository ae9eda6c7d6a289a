//! Signals Module - Per-epoch internal model signals
//!
//! Data structures delivered by the training loop, plus the JSONL reader
//! used by the replay driver. Records are caller-owned and append-only.

pub mod types;
pub mod reader;

pub use types::{SignalRecord, SignalSnapshot};
pub use reader::{read_signals, read_signals_from_path};
