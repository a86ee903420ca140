//! Edges of the rendered graph.
//!
//! Both edge kinds are undirected and stored canonically with
//! `source < target` so a pair can never appear twice under two spellings.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// An edge between two messages consecutive in sequence within the same
/// session. Derived from ordered store rows, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralEdge {
    pub source: MessageId,
    pub target: MessageId,
}

impl StructuralEdge {
    /// Build canonically: endpoints are swapped so `source < target`.
    pub fn new(a: MessageId, b: MessageId) -> Self {
        if a <= b {
            Self { source: a, target: b }
        } else {
            Self { source: b, target: a }
        }
    }
}

/// An edge between two nodes whose relevance scores lie within `delta` of
/// each other. `strength` is 1.0 at zero score distance, falling linearly to
/// 0.0 at distance `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityEdge {
    pub source: MessageId,
    pub target: MessageId,
    pub strength: f64,
}

impl ProximityEdge {
    /// Build canonically: endpoints are swapped so `source < target`.
    pub fn new(a: MessageId, b: MessageId, strength: f64) -> Self {
        if a <= b {
            Self { source: a, target: b, strength }
        } else {
            Self { source: b, target: a, strength }
        }
    }
}
