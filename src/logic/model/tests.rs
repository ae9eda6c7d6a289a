use super::*;

fn scenario_signal() -> SignalRecord {
    SignalRecord {
        gradient_norm: 1.3,
        activation_entropy: 0.9,
        latent_drift: 0.5,
        confidence_dispersion: 0.05,
        ..Default::default()
    }
}

#[test]
fn test_scenario_terms_and_level() {
    let model = IntrospectionModel::default();
    let risk = model.predict_failure_risk(&scenario_signal());

    assert!((risk.terms.gradient - 0.25).abs() < 1e-12);
    assert!((risk.terms.activation - 0.04).abs() < 1e-12);
    assert_eq!(risk.terms.latent, 0.0);
    assert!((risk.terms.entropy - 0.075).abs() < 1e-12);
    assert!((risk.terms.raw() - 0.365).abs() < 1e-12);
    assert!((risk.score - 0.5646).abs() < 1e-3);
    assert_eq!(risk.level, RiskLevel::Emerging);

    // uncertainty = min(0.2, 0.025)
    assert!((risk.confidence_upper - risk.score - 0.025).abs() < 1e-12);
    assert!((risk.score - risk.confidence_lower - 0.025).abs() < 1e-12);
}

#[test]
fn test_all_ablations_pin_score() {
    let mut model = IntrospectionModel::default();
    model.set_ablations(Ablation::ALL);

    let expected = 1.0 / (1.0 + 1.2f64.exp());
    for signal in [
        scenario_signal(),
        SignalRecord {
            gradient_norm: 50.0,
            latent_drift: 30.0,
            ..Default::default()
        },
    ] {
        let risk = model.predict_failure_risk(&signal);
        assert!((risk.score - expected).abs() < 1e-12);
        assert!((risk.score - 0.2315).abs() < 1e-4);
        assert_eq!(risk.level, RiskLevel::Low);
    }
}

#[test]
fn test_score_bounded_for_extreme_inputs() {
    let model = IntrospectionModel::default();
    for g in [0.0, 0.5, 3.0, 1e6] {
        let risk = model.predict_failure_risk(&SignalRecord {
            gradient_norm: g,
            latent_drift: g,
            confidence_dispersion: g,
            ..Default::default()
        });
        assert!((0.0..=1.0).contains(&risk.score));
        assert!((0.0..=1.0).contains(&risk.confidence_lower));
        assert!((0.0..=1.0).contains(&risk.confidence_upper));
    }
}

#[test]
fn test_negative_dispersion_keeps_band_ordered() {
    let model = IntrospectionModel::default();
    let risk = model.predict_failure_risk(&SignalRecord {
        confidence_dispersion: -1.0,
        ..scenario_signal()
    });
    assert_eq!(risk.confidence_lower, risk.score);
    assert_eq!(risk.confidence_upper, risk.score);
}

#[test]
fn test_level_bands() {
    assert_eq!(RiskLevel::from_score(0.81), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(0.8), RiskLevel::Elevated);
    assert_eq!(RiskLevel::from_score(0.61), RiskLevel::Elevated);
    assert_eq!(RiskLevel::from_score(0.6), RiskLevel::Emerging);
    assert_eq!(RiskLevel::from_score(0.3), RiskLevel::Low);
}

#[test]
fn test_set_ablations_rebuilds_from_scratch() {
    let mut model = IntrospectionModel::default();
    model.set_ablations([Ablation::Gradient, Ablation::Latent]);
    model.set_ablations([Ablation::Entropy]);

    let w = model.weights();
    assert_eq!(w.gradient, 1.0);
    assert_eq!(w.latent, 1.0);
    assert_eq!(w.entropy, 0.0);

    model.set_ablations(Vec::<Ablation>::new());
    assert!(model.ablations().is_empty());
}

#[test]
fn test_gradient_ablation_removes_term() {
    let mut model = IntrospectionModel::default();
    model.set_ablations([Ablation::Gradient]);

    let risk = model.predict_failure_risk(&scenario_signal());
    assert_eq!(risk.terms.gradient, 0.0);
    assert!((risk.terms.raw() - 0.115).abs() < 1e-12);
}

#[test]
fn test_counterfactual_curves() {
    let model = IntrospectionModel::default();
    let signal = SignalRecord {
        gradient_variance: 0.4,
        ..Default::default()
    };
    let projection = model.simulate_counterfactuals(
        &signal,
        HyperParams {
            learning_rate: 0.001,
            batch_size: 32,
        },
    );

    assert_eq!(projection.learning_rate.len(), 4);
    assert!((projection.learning_rate[2].projected_variance - 40.0).abs() < 1e-9);
    assert!(projection.learning_rate[1].is_current);

    assert_eq!(projection.batch_size.len(), 4);
    assert!((projection.batch_size[0].projected_variance - 0.8).abs() < 1e-12);
    assert!((projection.batch_size[3].projected_variance - 0.1).abs() < 1e-12);
    assert!(projection.batch_size[1].is_current);
}

#[test]
fn test_counterfactual_zero_learning_rate() {
    let model = IntrospectionModel::default();
    let signal = SignalRecord {
        gradient_variance: 0.4,
        ..Default::default()
    };
    let projection = model.simulate_counterfactuals(
        &signal,
        HyperParams {
            learning_rate: 0.0,
            batch_size: 64,
        },
    );
    assert!(projection.learning_rate.iter().all(|p| p.projected_variance == 0.0));
}

#[test]
fn test_awareness_confidence() {
    let model = IntrospectionModel::default();

    let aligned = SignalRecord {
        gradient_norm: 0.7,
        latent_drift: 0.7,
        confidence_dispersion: 0.5,
        ..Default::default()
    };
    assert_eq!(model.awareness_confidence(&aligned), 1.0);

    let diverged = SignalRecord {
        gradient_norm: 0.9,
        latent_drift: 0.4,
        confidence_dispersion: 0.3,
        ..Default::default()
    };
    // (1 - 0.5) * (1 - 0.2)
    assert!((model.awareness_confidence(&diverged) - 0.4).abs() < 1e-12);
}

#[test]
fn test_mode_only_changes_label() {
    let supervised = IntrospectionModel::new(AblationSet::none(), ModelMode::GroundTruth);
    let unsupervised = IntrospectionModel::new(AblationSet::none(), ModelMode::NoGroundTruth);

    assert_ne!(supervised.mode_label(), unsupervised.mode_label());
    assert_eq!(
        supervised.predict_failure_risk(&scenario_signal()),
        unsupervised.predict_failure_risk(&scenario_signal())
    );
}

#[test]
fn test_delegates_to_engines() {
    let mut model = IntrospectionModel::default();
    assert_eq!(model.memory().len(), 2);

    let signal = scenario_signal();
    model.add_episode(Episode::from_signal(
        &signal,
        "ACCURACY_DEGRADATION",
        crate::logic::memory::EpisodeOutcome::Failed,
    ));
    let hits = model.find_similar(&signal);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].episode.failure_type, "ACCURACY_DEGRADATION");

    let graph = model.build_causal_graph(&signal, false, 0.56);
    assert!(model.advise(0.1, &graph).is_empty());
}
