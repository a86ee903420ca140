//! Message nodes in the conversation graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message node in the conversation graph.
///
/// Identity is the id; `(session_id, sequence_num)` is assumed unique.
/// Created by ingestion — read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageNode {
    pub id: MessageId,
    pub session_id: String,
    pub sequence_num: u64,
    pub timestamp: DateTime<Utc>,
}

/// The ordering tuple the adjacency builder consumes.
///
/// Stores return these sorted by `(session_id, sequence_num)` so consecutive
/// rows of the same session are adjacent in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralRow {
    pub id: MessageId,
    pub session_id: String,
    pub sequence_num: u64,
}
