//! Error handling
//!
//! The analytics engines never fail; only configuration and replay IO do.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A threshold or window is outside its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Ablation name outside {gradient, activation, entropy, latent}
    #[error("unknown ablation '{0}' (expected gradient, activation, entropy or latent)")]
    UnknownAblation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed signal record in a JSONL stream
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
