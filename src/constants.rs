//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! To change a default threshold or window, only edit this file.

// ============================================
// Failure detection
// ============================================

/// Accuracy drop below baseline that counts as degradation
pub const DEFAULT_ACC_DEGRADATION_THRESH: f64 = 0.15;

/// Loss rise above baseline that counts as divergence
pub const DEFAULT_LOSS_INCREASE_THRESH: f64 = 0.5;

/// Mean confidence below which the model has collapsed
pub const DEFAULT_CONFIDENCE_COLLAPSE_THRESH: f64 = 0.5;

/// Trailing window evaluated by the failure rules
pub const DEFAULT_FAILURE_WINDOW: usize = 5;

/// Number of updates during which the baseline keeps learning
pub const BASELINE_WARMUP: usize = 10;

// ============================================
// Risk model
// ============================================

/// Centre of the risk sigmoid
pub const RISK_SIGMOID_OFFSET: f64 = 0.3;

/// Steepness of the risk sigmoid
pub const RISK_SIGMOID_GAIN: f64 = 4.0;

/// Upper bound on the confidence band half-width
pub const MAX_RISK_UNCERTAINTY: f64 = 0.2;

/// Learning-rate grid used for sensitivity projections
pub const LR_CANDIDATES: [f64; 4] = [0.0001, 0.001, 0.01, 0.1];

/// Batch-size grid used for sensitivity projections
pub const BATCH_CANDIDATES: [u32; 4] = [16, 32, 64, 128];

// ============================================
// Memory / metrics
// ============================================

/// Episode memory capacity (FIFO)
pub const EPISODE_CAPACITY: usize = 100;

/// Number of episodes returned by a similarity query
pub const SIMILAR_TOP_K: usize = 3;

/// Trailing records used by the research metrics
pub const METRICS_WINDOW: usize = 20;

/// FAH reported when a failure epoch is known but nothing was detected before it
pub const FALLBACK_FAH: u32 = 15;

/// Interventions are only proposed at or above this risk
pub const ADVICE_MIN_RISK: f64 = 0.3;

// ============================================
// Adaptive policy
// ============================================

/// Rolling window of the adaptive policy
pub const POLICY_WINDOW: usize = 50;

/// Sigma multiplier of the adaptive upper bound
pub const POLICY_SIGMA: f64 = 3.0;

/// The policy only learns from records more confident than this
pub const POLICY_MIN_CONFIDENCE: f64 = 0.8;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AegisML";

// ============================================
// Environment variable names
// ============================================

pub const ENV_ACC_DEGRADATION: &str = "AEGIS_ACC_DEGRADATION";
pub const ENV_LOSS_INCREASE: &str = "AEGIS_LOSS_INCREASE";
pub const ENV_CONFIDENCE_COLLAPSE: &str = "AEGIS_CONFIDENCE_COLLAPSE";
pub const ENV_WINDOW_SIZE: &str = "AEGIS_WINDOW_SIZE";
pub const ENV_ABLATIONS: &str = "AEGIS_ABLATIONS";
pub const ENV_GROUND_TRUTH: &str = "AEGIS_GROUND_TRUTH";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Read a float from the environment or use the default
pub fn get_env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a window size from the environment or use the default
pub fn get_env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|v: &usize| *v > 0)
        .unwrap_or(default)
}

/// Check a boolean flag ("1", "true", "yes")
pub fn get_env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
