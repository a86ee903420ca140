//! End-to-end tests for score-proximity edge construction.
//!
//! Covers the sliding-window builder directly and the MessageGraph path
//! through a SimilarityScorer, plus property tests for the two invariants
//! that matter most: delta monotonicity and pair uniqueness.

use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use convograph::{
    MemoryStore, MessageGraph, MessageId, ProximityConfig, ProximityEdge, SimilarityScorer,
    compute_proximity_edges,
};

// ============================================================================
// Helpers
// ============================================================================

fn scores(pairs: &[(u64, f64)]) -> HashMap<MessageId, f64> {
    pairs.iter().map(|(id, s)| (MessageId(*id), *s)).collect()
}

/// Linearly spaced scores 0.0..=1.0 over ids 1..=n.
fn spaced_scores(n: u64) -> HashMap<MessageId, f64> {
    (1..=n).map(|i| (MessageId(i), (i - 1) as f64 / (n - 1).max(1) as f64)).collect()
}

fn pair_set(edges: &[ProximityEdge]) -> HashSet<(MessageId, MessageId)> {
    edges.iter().map(|e| (e.source, e.target)).collect()
}

fn config(delta: f64) -> ProximityConfig {
    ProximityConfig { delta, max_edges: 0, max_neighbors: 0 }
}

/// Serves a fixed score map for any query.
struct FixedScorer(HashMap<MessageId, f64>);

#[async_trait::async_trait]
impl SimilarityScorer for FixedScorer {
    async fn score(&self, _query_text: &str) -> convograph::Result<HashMap<MessageId, f64>> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// 1. Basic edge creation
// ============================================================================

#[test]
fn test_equal_scores_fully_connect() {
    let s = scores(&[(1, 0.5), (2, 0.5), (3, 0.5), (4, 0.5)]);

    let edges = compute_proximity_edges(&s, &config(0.1)).unwrap();

    // C(4,2) pairs, every one at full strength.
    assert_eq!(edges.len(), 6);
    for e in &edges {
        assert!((e.strength - 1.0).abs() < 1e-9, "expected strength 1.0, got {}", e.strength);
    }
}

#[test]
fn test_two_clusters_produce_no_cross_edges() {
    let s = scores(&[(1, 0.0), (2, 0.01), (3, 0.02), (4, 0.5), (5, 0.51), (6, 0.52)]);

    let edges = compute_proximity_edges(&s, &config(0.05)).unwrap();

    let low: HashSet<MessageId> = [1, 2, 3].map(MessageId).into();
    let high: HashSet<MessageId> = [4, 5, 6].map(MessageId).into();
    assert_eq!(edges.len(), 6); // 3 within each cluster
    for e in &edges {
        let same_cluster = (low.contains(&e.source) && low.contains(&e.target))
            || (high.contains(&e.source) && high.contains(&e.target));
        assert!(same_cluster, "cross-cluster edge {:?}", e);
    }
}

#[test]
fn test_boundary_distance_still_links_at_zero_strength() {
    // Difference exactly equals delta.
    let s = scores(&[(1, 0.5), (2, 0.6)]);

    let edges = compute_proximity_edges(&s, &config(0.1)).unwrap();

    assert_eq!(edges.len(), 1);
    assert!(edges[0].strength.abs() < 1e-6, "expected strength ~0, got {}", edges[0].strength);
}

#[test]
fn test_strength_decreases_with_score_distance() {
    let s = scores(&[(1, 0.5), (2, 0.55), (3, 0.59)]);

    let edges = compute_proximity_edges(&s, &config(0.1)).unwrap();

    let by_pair: HashMap<(MessageId, MessageId), f64> =
        edges.iter().map(|e| ((e.source, e.target), e.strength)).collect();
    let near = by_pair[&(MessageId(1), MessageId(2))];
    let far = by_pair[&(MessageId(1), MessageId(3))];
    assert!(near > far, "near {near} should beat far {far}");
}

#[test]
fn test_all_strengths_within_unit_interval() {
    let edges = compute_proximity_edges(&spaced_scores(50), &config(0.1)).unwrap();

    assert!(!edges.is_empty());
    for e in &edges {
        assert!((0.0..=1.0).contains(&e.strength), "strength {} out of range", e.strength);
    }
}

// ============================================================================
// 2. Caps
// ============================================================================

#[test]
fn test_max_edges_caps_output() {
    let cfg = ProximityConfig { delta: 0.5, max_edges: 10, max_neighbors: 0 };

    let edges = compute_proximity_edges(&spaced_scores(100), &cfg).unwrap();

    assert_eq!(edges.len(), 10);
}

#[test]
fn test_uncapped_returns_more_than_capped() {
    let s = spaced_scores(50);
    let capped = compute_proximity_edges(
        &s,
        &ProximityConfig { delta: 0.5, max_edges: 5, max_neighbors: 0 },
    )
    .unwrap();
    let uncapped = compute_proximity_edges(&s, &config(0.5)).unwrap();

    assert!(uncapped.len() > capped.len());
    assert_eq!(capped.len(), 5);
}

#[test]
fn test_degree_cap_bounds_every_node() {
    let cfg = ProximityConfig { delta: 1.0, max_edges: 0, max_neighbors: 3 };

    let edges = compute_proximity_edges(&spaced_scores(30), &cfg).unwrap();

    let mut degree: HashMap<MessageId, usize> = HashMap::new();
    for e in &edges {
        *degree.entry(e.source).or_insert(0) += 1;
        *degree.entry(e.target).or_insert(0) += 1;
    }
    assert!(degree.values().all(|&d| d <= 3), "degree cap violated: {degree:?}");
}

// ============================================================================
// 3. Properties: monotonicity and uniqueness
// ============================================================================

proptest! {
    /// For fixed scores without an edge cap, a larger delta yields a
    /// superset of edges.
    #[test]
    fn prop_larger_delta_is_superset(
        raw in prop::collection::vec(0.0f64..=1.0, 2..40),
        small in 0.0f64..0.25,
        extra in 0.0f64..0.25,
    ) {
        let s: HashMap<MessageId, f64> =
            raw.iter().enumerate().map(|(i, v)| (MessageId(i as u64 + 1), *v)).collect();

        let narrow = pair_set(&compute_proximity_edges(&s, &config(small)).unwrap());
        let wide = pair_set(&compute_proximity_edges(&s, &config(small + extra)).unwrap());

        prop_assert!(narrow.is_subset(&wide), "lost edges: {:?}", narrow.difference(&wide));
    }

    /// No unordered pair ever appears twice, and every edge is canonical.
    #[test]
    fn prop_no_duplicate_pairs(
        raw in prop::collection::vec(0.0f64..=1.0, 2..40),
        delta in 0.0f64..0.5,
        max_neighbors in 0usize..4,
    ) {
        let s: HashMap<MessageId, f64> =
            raw.iter().enumerate().map(|(i, v)| (MessageId(i as u64 + 1), *v)).collect();
        let cfg = ProximityConfig { delta, max_edges: 0, max_neighbors };

        let edges = compute_proximity_edges(&s, &cfg).unwrap();

        let mut seen = HashSet::new();
        for e in &edges {
            prop_assert!(e.source < e.target, "non-canonical edge {:?}", e);
            prop_assert!(seen.insert((e.source, e.target)), "duplicate pair {:?}", e);
        }
    }
}

// ============================================================================
// 4. Through the MessageGraph handle
// ============================================================================

#[tokio::test]
async fn test_proximity_graph_passes_scores_through() {
    let s = scores(&[(1, 0.1), (2, 0.5), (3, 0.9)]);
    let graph = MessageGraph::new(MemoryStore::new(), FixedScorer(s.clone()));

    let result = graph.proximity_edges("anything", &ProximityConfig::default()).await.unwrap();

    assert_eq!(result.scores, s);
    assert_eq!(result.count, result.edges.len());
}

#[tokio::test]
async fn test_empty_corpus_yields_no_edges_not_an_error() {
    let graph = MessageGraph::open_memory();

    let result = graph.proximity_edges("anything", &ProximityConfig::default()).await.unwrap();

    assert_eq!(result.count, 0);
    assert!(result.edges.is_empty());
    assert!(result.scores.is_empty());
}

#[tokio::test]
async fn test_invalid_delta_rejected_before_scoring() {
    let graph = MessageGraph::open_memory();
    let cfg = ProximityConfig { delta: -1.0, ..Default::default() };

    let err = graph.proximity_edges("anything", &cfg).await.unwrap_err();

    assert!(matches!(err, convograph::Error::ConfigError(_)));
}
