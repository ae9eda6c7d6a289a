use super::*;

fn signal(gradient_norm: f64, activation_entropy: f64) -> SignalRecord {
    SignalRecord {
        gradient_norm,
        activation_entropy,
        ..Default::default()
    }
}

fn episode(id: &str, at: DateTime<Utc>, gradient_norm: f64, activation_entropy: f64) -> Episode {
    Episode {
        id: id.to_string(),
        timestamp: at,
        failure_type: "test".to_string(),
        signal_snapshot: SignalSnapshot::new(gradient_norm, activation_entropy),
        outcome: EpisodeOutcome::Failed,
    }
}

#[test]
fn test_seeded_with_two_episodes() {
    let memory = EpisodeMemory::new();
    assert_eq!(memory.len(), 2);
    assert_eq!(memory.capacity(), 100);
}

#[test]
fn test_eviction_drops_exactly_the_oldest() {
    let mut memory = EpisodeMemory::new();
    let now = Utc::now();
    for i in 0..98 {
        memory.add_episode(episode(&format!("ep-{}", i), now, 1.0, 1.0));
    }
    assert_eq!(memory.len(), 100);
    assert_eq!(memory.episodes().next().unwrap().id, "ep-seed-001");

    memory.add_episode(episode("ep-101st", now, 1.0, 1.0));

    assert_eq!(memory.len(), 100);
    let ids: Vec<&str> = memory.episodes().map(|e| e.id.as_str()).collect();
    assert_eq!(ids[0], "ep-seed-002");
    assert_eq!(ids[99], "ep-101st");
    assert!(!ids.contains(&"ep-seed-001"));
}

#[test]
fn test_top_three_sorted_descending() {
    let now = Utc::now();
    let mut memory = EpisodeMemory::empty(100);
    memory.add_episode(episode("far", now, 5.0, 5.0));
    memory.add_episode(episode("exact", now, 1.0, 1.0));
    memory.add_episode(episode("near", now, 1.1, 1.0));
    memory.add_episode(episode("mid", now, 2.0, 1.0));

    let hits = memory.find_similar_at(&signal(1.0, 1.0), now);

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].episode.id, "exact");
    assert_eq!(hits[1].episode.id, "near");
    assert_eq!(hits[2].episode.id, "mid");
    assert!(hits.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    assert!(hits.iter().all(|h| h.metric == "Weighted Euclidean"));
}

#[test]
fn test_fresh_identical_episode_scores_one() {
    let now = Utc::now();
    let mut memory = EpisodeMemory::empty(10);
    memory.add_episode(episode("same", now, 0.7, 1.3));

    let hits = memory.find_similar_at(&signal(0.7, 1.3), now);
    assert!((hits[0].similarity - 1.0).abs() < 1e-12);
    assert_eq!(hits[0].distance, 0.0);
}

#[test]
fn test_old_memories_lose_at_most_ten_percent() {
    let now = Utc::now();
    let mut memory = EpisodeMemory::empty(10);
    memory.add_episode(episode("ancient", now - Duration::days(3650), 0.7, 1.3));

    let hits = memory.find_similar_at(&signal(0.7, 1.3), now);
    assert!((hits[0].similarity - 0.9).abs() < 1e-9);
}

#[test]
fn test_distance_uses_only_two_signals() {
    let now = Utc::now();
    let mut memory = EpisodeMemory::empty(10);
    memory.add_episode(episode("a", now, 1.0, 1.0));

    let probe = SignalRecord {
        gradient_norm: 4.0,
        activation_entropy: 5.0,
        latent_drift: 100.0,
        loss_curvature: 100.0,
        ..Default::default()
    };
    let hits = memory.find_similar_at(&probe, now);
    assert!((hits[0].distance - 5.0).abs() < 1e-12);
}

#[test]
fn test_episode_from_signal_has_uuid() {
    let e = Episode::from_signal(&signal(1.0, 0.5), "LOSS_DIVERGENCE", EpisodeOutcome::Recovered);
    assert_eq!(e.id.len(), 36);
    assert_eq!(e.signal_snapshot.gradient_norm, 1.0);
    assert_eq!(serde_json::to_value(e.outcome).unwrap(), "recovered");
}
