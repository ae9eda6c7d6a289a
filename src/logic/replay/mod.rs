//! Replay Module - JSONL snapshot output for the replay driver
//!
//! Snapshots are appended one JSON object per line.

pub mod writer;

pub use writer::SnapshotWriter;
