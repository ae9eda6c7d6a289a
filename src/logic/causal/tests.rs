use super::*;

fn calm_signal() -> SignalRecord {
    SignalRecord {
        epoch: 3,
        gradient_variance: 0.2,
        loss_curvature: 0.5,
        dead_neuron_ratio: 0.05,
        activation_entropy: 1.8,
        latent_drift: 0.1,
        confidence_dispersion: 0.3,
        ..Default::default()
    }
}

#[test]
fn test_schema_has_seven_nodes() {
    let graph = CausalEngine::new().build(&calm_signal(), false, 0.42);

    assert_eq!(graph.nodes.len(), 7);
    assert_eq!(graph.node(NodeId::GradVar).unwrap().value, 0.2);
    assert_eq!(graph.node(NodeId::FailureRisk).unwrap().value, 0.42);
    assert_eq!(graph.node(NodeId::FailureRisk).unwrap().kind, NodeKind::Outcome);
    assert_eq!(graph.node(NodeId::LossCurve).unwrap().kind, NodeKind::Root);
}

#[test]
fn test_fallback_edges_when_quiet() {
    let graph = CausalEngine::new().build(&calm_signal(), false, 0.1);

    assert_eq!(graph.edges.len(), 2);
    let first = graph.edge(NodeId::LossCurve, NodeId::GradVar).unwrap();
    assert_eq!(first.weight, 0.2);
    assert_eq!(first.confidence, 0.4);
    let second = graph.edge(NodeId::GradVar, NodeId::ActEntropy).unwrap();
    assert_eq!(second.weight, 0.1);
    assert_eq!(second.confidence, 0.3);
}

#[test]
fn test_failing_run_suppresses_fallback() {
    let graph = CausalEngine::new().build(&calm_signal(), true, 0.9);

    // Only the entropy rule fires, through the failing flag
    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edge(NodeId::ActEntropy, NodeId::FailureRisk).unwrap();
    assert_eq!(edge.weight, -0.85);
}

#[test]
fn test_all_rules_fire_together() {
    let signal = SignalRecord {
        loss_curvature: 1.5,
        dead_neuron_ratio: 0.3,
        activation_entropy: 0.6,
        latent_drift: 0.9,
        ..calm_signal()
    };
    let graph = CausalEngine::new().build(&signal, false, 0.5);

    assert_eq!(graph.edges.len(), 6);
    let lagged = graph.edge(NodeId::GradVar, NodeId::DeadNeurons).unwrap();
    assert_eq!(lagged.lag, 2);
    let drift = graph.edge(NodeId::LatentDrift, NodeId::FailureRisk).unwrap();
    assert_eq!(drift.lag, 5);
    assert_eq!(drift.confidence, 0.7);
    assert!(graph.edge(NodeId::LatentDrift, NodeId::ActEntropy).is_some());
}

#[test]
fn test_node_values_clamped() {
    let signal = SignalRecord {
        loss_curvature: 4.0,
        ..calm_signal()
    };
    let graph = CausalEngine::new().build(&signal, false, 1.7);

    assert_eq!(graph.node(NodeId::LossCurve).unwrap().value, 1.0);
    assert_eq!(graph.node(NodeId::FailureRisk).unwrap().value, 1.0);
    assert_eq!(graph.root_causes(0.6).len(), 1);
}

#[test]
fn test_cycles_reported_not_removed() {
    let graph = CausalEngine::new().build(&calm_signal(), false, 0.0);
    assert!(!graph.has_cycle());

    let mut cyclic = graph.clone();
    cyclic.edges.push(CausalEdge {
        source: NodeId::ActEntropy,
        target: NodeId::LossCurve,
        weight: 0.3,
        lag: 1,
        confidence: 0.5,
    });
    assert!(cyclic.has_cycle());
    assert_eq!(cyclic.edges.len(), 3);
}

#[test]
fn test_history_correlation_reweights_edges() {
    // Loss curvature and gradient variance rise together
    let history: Vec<SignalRecord> = (0..6)
        .map(|i| SignalRecord {
            epoch: i,
            loss_curvature: 1.1 + i as f64 * 0.2,
            gradient_variance: 0.1 + i as f64 * 0.1,
            ..calm_signal()
        })
        .collect();

    let graph = CausalEngine::new().build_with_history(&history, false, 0.5);
    let edge = graph.edge(NodeId::LossCurve, NodeId::GradVar).unwrap();
    // 0.5 * 0.8 + 0.5 * 1.0
    assert!((edge.weight - 0.9).abs() < 1e-9);
}

#[test]
fn test_short_history_keeps_templates() {
    let signal = SignalRecord {
        loss_curvature: 1.5,
        ..calm_signal()
    };
    let graph = CausalEngine::new().build_with_history(&[signal], false, 0.5);
    assert_eq!(graph.edge(NodeId::LossCurve, NodeId::GradVar).unwrap().weight, 0.8);
}

#[test]
fn test_node_ids_serialize_snake_case() {
    let graph = CausalEngine::new().build(&calm_signal(), false, 0.0);
    let json = serde_json::to_value(&graph).unwrap();

    assert_eq!(json["nodes"][0]["id"], "grad_var");
    assert_eq!(json["nodes"][0]["type"], "root");
    assert_eq!(json["edges"][0]["source"], "loss_curve");
}
