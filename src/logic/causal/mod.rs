//! Causal Module - Rule-based causal graph builder
//!
//! Heuristic edge emission over a fixed schema, not statistical discovery.
//!
//! # Architecture
//! - `types.rs`: `CausalGraph`, `CausalNode`, `CausalEdge`, `NodeId`
//! - `rules.rs`: condition → edge template table
//!
//! The resulting graph is not forced to be acyclic.

pub mod types;
pub mod rules;
#[cfg(test)]
mod tests;

use crate::logic::signals::SignalRecord;
use crate::logic::stats::pearson;

pub use types::{CausalEdge, CausalGraph, CausalNode, NodeId, NodeKind};
use rules::{EDGE_RULES, FALLBACK_EDGES};

/// Minimum records before history correlation is blended in
const MIN_CORRELATION_HISTORY: usize = 3;

/// Weight of the template vs. observed correlation
const TEMPLATE_BLEND: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct CausalEngine;

impl CausalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the graph for one signal.
    ///
    /// `failure_risk` is the externally computed outcome value.
    pub fn build(&self, signal: &SignalRecord, is_failing: bool, failure_risk: f64) -> CausalGraph {
        let nodes = NodeId::ALL
            .iter()
            .map(|id| CausalNode {
                id: *id,
                label: id.label().to_string(),
                value: id.signal_value(signal).unwrap_or(failure_risk).clamp(0.0, 1.0),
                kind: id.kind(),
            })
            .collect();

        let mut edges = Vec::new();
        for rule in EDGE_RULES.iter() {
            if rule.condition.holds(signal, is_failing) {
                log::trace!("Causal rule '{}' fired at epoch {}", rule.name, signal.epoch);
                edges.extend(rule.edges.iter().map(|t| t.to_edge()));
            }
        }

        if edges.is_empty() && !is_failing {
            log::debug!("No causal rule fired at epoch {}, using default edges", signal.epoch);
            edges.extend(FALLBACK_EDGES.iter().map(|t| t.to_edge()));
        }

        CausalGraph { nodes, edges }
    }

    /// Build from the latest record, reweighting signal-to-signal edges by
    /// their correlation over the whole history.
    pub fn build_with_history(
        &self,
        history: &[SignalRecord],
        is_failing: bool,
        failure_risk: f64,
    ) -> CausalGraph {
        let latest = history.last().copied().unwrap_or_default();
        let mut graph = self.build(&latest, is_failing, failure_risk);

        if history.len() < MIN_CORRELATION_HISTORY {
            return graph;
        }

        for edge in graph.edges.iter_mut() {
            let series = |id: NodeId| -> Option<Vec<f64>> {
                history.iter().map(|r| id.signal_value(r)).collect()
            };
            if let (Some(xs), Some(ys)) = (series(edge.source), series(edge.target)) {
                let corr = pearson(&xs, &ys);
                edge.weight = (TEMPLATE_BLEND * edge.weight + (1.0 - TEMPLATE_BLEND) * corr)
                    .clamp(-1.0, 1.0);
            }
        }

        graph
    }
}
