//! Advisor Module - Ranked mitigation suggestions
//!
//! Maps the risk score and the causal graph's active root causes to
//! catalog interventions, best expected gain first.

pub mod catalog;

use crate::constants::ADVICE_MIN_RISK;
use crate::logic::causal::CausalGraph;

pub use catalog::{Cost, Intervention};

/// Root node value above which a cause counts as active
const ROOT_ACTIVE_THRESHOLD: f64 = 0.6;

/// Risk above which an unexplained failure warrants stopping
const EARLY_STOP_RISK: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default)]
pub struct InterventionAdvisor;

impl InterventionAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(&self, risk_score: f64, graph: &CausalGraph) -> Vec<Intervention> {
        if risk_score < ADVICE_MIN_RISK {
            return vec![];
        }

        let mut out: Vec<Intervention> = graph
            .root_causes(ROOT_ACTIVE_THRESHOLD)
            .into_iter()
            .flat_map(|node| catalog::actions_for(node.id).iter())
            .map(|entry| entry.to_intervention())
            .collect();

        if out.is_empty() && risk_score > EARLY_STOP_RISK {
            log::info!("Risk {:.2} with no actionable root cause, advising early stop", risk_score);
            out.push(catalog::EARLY_STOP.to_intervention());
        }

        out.sort_by(|a, b| {
            b.expected_gain
                .partial_cmp(&a.expected_gain)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::causal::CausalEngine;
    use crate::logic::signals::SignalRecord;

    fn graph(gradient_variance: f64, loss_curvature: f64) -> CausalGraph {
        let signal = SignalRecord {
            gradient_variance,
            loss_curvature,
            activation_entropy: 1.5,
            ..Default::default()
        };
        CausalEngine::new().build(&signal, false, 0.0)
    }

    #[test]
    fn test_low_risk_gets_nothing() {
        assert!(InterventionAdvisor::new().advise(0.29, &graph(0.9, 0.9)).is_empty());
    }

    #[test]
    fn test_gradient_variance_actions() {
        let advice = InterventionAdvisor::new().advise(0.5, &graph(0.9, 0.1));

        assert_eq!(advice.len(), 2);
        assert_eq!(advice[0].action, "Reduce Learning Rate (0.5x)");
        assert_eq!(advice[1].action, "Increase Batch Size (2x)");
        assert_eq!(advice[1].cost, Cost::Medium);
    }

    #[test]
    fn test_both_roots_sorted_by_gain() {
        let advice = InterventionAdvisor::new().advise(0.5, &graph(0.9, 1.4));
        let gains: Vec<f64> = advice.iter().map(|i| i.expected_gain).collect();

        assert_eq!(gains, vec![0.5, 0.4, 0.3]);
        assert_eq!(advice[0].action, "Enable Gradient Clipping");
    }

    #[test]
    fn test_early_stop_fallback() {
        let advisor = InterventionAdvisor::new();
        let quiet = graph(0.1, 0.1);

        assert!(advisor.advise(0.65, &quiet).is_empty());

        let advice = advisor.advise(0.85, &quiet);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].action, "Early Stop & Rollback");
        assert_eq!(advice[0].cost, Cost::High);
        assert_eq!(advice[0].confidence, 0.99);
    }

    #[test]
    fn test_roots_at_threshold_do_not_match() {
        let advice = InterventionAdvisor::new().advise(0.5, &graph(0.6, 0.6));
        assert!(advice.is_empty());
    }
}
