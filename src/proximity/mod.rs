//! # Proximity Edge Builder
//!
//! Links nodes whose relevance scores for a query lie within `delta` of each
//! other, via an O(n log n) sort and an amortized O(n · window) sliding-window
//! scan. Degree and total-edge caps bound both output size and worst-case
//! latency.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{MessageId, ProximityEdge};
use crate::{Error, Result};

// ============================================================================
// Configuration
// ============================================================================

/// Tuning knobs for proximity edge construction.
///
/// Validated up front: a non-finite or negative `delta` is a configuration
/// error, not undefined arithmetic downstream. Zero caps mean unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Maximum score difference that still produces an edge.
    pub delta: f64,
    /// Hard cap on total emitted edges; 0 = unlimited.
    pub max_edges: usize,
    /// Per-node degree cap; 0 = unlimited.
    pub max_neighbors: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            delta: 0.1,
            max_edges: 100_000,
            max_neighbors: 0,
        }
    }
}

impl ProximityConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() {
            return Err(Error::ConfigError(format!("delta must be finite, got {}", self.delta)));
        }
        if self.delta < 0.0 {
            return Err(Error::ConfigError(format!("delta must be >= 0, got {}", self.delta)));
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Proximity edges for one query, with the scores that produced them.
///
/// The score map is passed through untouched so the rendering layer can
/// size/color nodes without a second scorer round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityGraph {
    pub edges: Vec<ProximityEdge>,
    pub scores: HashMap<MessageId, f64>,
    pub count: usize,
}

// ============================================================================
// Edge construction
// ============================================================================

/// Build the proximity edge set for the given scores.
///
/// Nodes are sorted ascending by `(score, id)` — the id tiebreak keeps the
/// scan order, and therefore capped output, deterministic when scores
/// collide. A trailing pointer keeps the candidate window within `delta` of
/// the current score; candidates are scanned nearest-score-first so that
/// under a degree cap each node takes its closest neighbors before filling
/// up. Strength falls linearly from 1.0 at zero distance to 0.0 at `delta`
/// (`delta == 0` links equal scores at strength 1.0).
///
/// Each unordered pair is emitted at most once, canonically
/// `source < target`. Hitting `max_edges` returns immediately with the edges
/// collected so far — a hard latency cap, not a best-edges guarantee.
pub fn compute_proximity_edges(
    scores: &HashMap<MessageId, f64>,
    config: &ProximityConfig,
) -> Result<Vec<ProximityEdge>> {
    config.validate()?;

    if scores.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted_nodes: Vec<(MessageId, f64)> = scores.iter().map(|(id, s)| (*id, *s)).collect();
    sorted_nodes.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    let n = sorted_nodes.len();

    let delta = config.delta;
    let degree_capped = config.max_neighbors > 0;
    let edge_capped = config.max_edges > 0;

    let mut edges: Vec<ProximityEdge> = Vec::new();
    let mut degree: HashMap<MessageId, usize> = HashMap::new();
    let mut j = 0;

    for i in 0..n {
        let (id_i, score_i) = sorted_nodes[i];

        // Scores are sorted, so the trailing window only ever advances.
        while j < i && score_i - sorted_nodes[j].1 > delta {
            j += 1;
        }

        if degree_capped && degree.get(&id_i).copied().unwrap_or(0) >= config.max_neighbors {
            continue;
        }

        // Nearest-score-first: scan backwards from i-1 down to j.
        for k in (j..i).rev() {
            let (id_k, score_k) = sorted_nodes[k];

            if degree_capped {
                if degree.get(&id_i).copied().unwrap_or(0) >= config.max_neighbors {
                    // Node i is full; every remaining candidate is farther
                    // in score, so none could replace an accepted neighbor.
                    break;
                }
                if degree.get(&id_k).copied().unwrap_or(0) >= config.max_neighbors {
                    continue;
                }
            }

            let diff = score_i - score_k;
            let strength = if delta > 0.0 {
                (1.0 - diff / delta).clamp(0.0, 1.0)
            } else {
                1.0
            };

            edges.push(ProximityEdge::new(id_k, id_i, strength));

            if degree_capped {
                *degree.entry(id_i).or_insert(0) += 1;
                *degree.entry(id_k).or_insert(0) += 1;
            }

            if edge_capped && edges.len() >= config.max_edges {
                debug!(count = edges.len(), "edge cap reached, returning early");
                return Ok(edges);
            }
        }
    }

    debug!(count = edges.len(), nodes = n, "proximity edges computed");
    Ok(edges)
}
