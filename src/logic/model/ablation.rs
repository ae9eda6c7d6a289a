//! Ablation Set
//!
//! Forced zero-weighting of signal families for sensitivity analysis.
//! Stored as a 4-bit mask.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ablation {
    Gradient,
    Activation,
    Entropy,
    Latent,
}

impl Ablation {
    pub const ALL: [Ablation; 4] = [
        Ablation::Gradient,
        Ablation::Activation,
        Ablation::Entropy,
        Ablation::Latent,
    ];

    fn bit(self) -> u8 {
        match self {
            Ablation::Gradient => 0b0001,
            Ablation::Activation => 0b0010,
            Ablation::Entropy => 0b0100,
            Ablation::Latent => 0b1000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ablation::Gradient => "gradient",
            Ablation::Activation => "activation",
            Ablation::Entropy => "entropy",
            Ablation::Latent => "latent",
        }
    }
}

impl FromStr for Ablation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradient" => Ok(Ablation::Gradient),
            "activation" => Ok(Ablation::Activation),
            "entropy" => Ok(Ablation::Entropy),
            "latent" => Ok(Ablation::Latent),
            _ => Err(EngineError::UnknownAblation(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Ablation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SET
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Ablation>", into = "Vec<Ablation>")]
pub struct AblationSet(u8);

impl AblationSet {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Ablation::ALL.into_iter().collect()
    }

    pub fn contains(&self, ablation: Ablation) -> bool {
        self.0 & ablation.bit() != 0
    }

    pub fn insert(&mut self, ablation: Ablation) {
        self.0 |= ablation.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Ablation> + '_ {
        Ablation::ALL.into_iter().filter(move |a| self.contains(*a))
    }

    /// Parse a comma separated list, e.g. `"gradient, latent"`
    pub fn parse_list(list: &str) -> EngineResult<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Ablation::from_str)
            .collect()
    }

    /// 0/1 weight vector
    pub fn weights(&self) -> FeatureWeights {
        let w = |a: Ablation| if self.contains(a) { 0.0 } else { 1.0 };
        FeatureWeights {
            gradient: w(Ablation::Gradient),
            activation: w(Ablation::Activation),
            entropy: w(Ablation::Entropy),
            latent: w(Ablation::Latent),
        }
    }
}

impl FromIterator<Ablation> for AblationSet {
    fn from_iter<I: IntoIterator<Item = Ablation>>(iter: I) -> Self {
        let mut set = AblationSet::none();
        for a in iter {
            set.insert(a);
        }
        set
    }
}

impl From<Vec<Ablation>> for AblationSet {
    fn from(list: Vec<Ablation>) -> Self {
        list.into_iter().collect()
    }
}

impl From<AblationSet> for Vec<Ablation> {
    fn from(set: AblationSet) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Display for AblationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|a| a.as_str()).collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(","))
        }
    }
}

/// Per-family risk weights, each 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub gradient: f64,
    pub activation: f64,
    pub entropy: f64,
    pub latent: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        AblationSet::none().weights()
    }
}
