//! Result of a visibility computation.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// The visible subset of the windowed graph.
///
/// `visible_message_ids == None` means "no filtering applied" (every node is
/// visible) — a distinct state from `Some(vec![])`, which means an active
/// filter set left nothing visible. The distinction survives serialization
/// as `null` vs `[]` and consumers must preserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleSet {
    /// Sorted ascending when present.
    pub visible_message_ids: Option<Vec<MessageId>>,
    pub total_nodes: usize,
    pub visible_count: usize,
}

impl VisibleSet {
    /// The "no filtering" result: every windowed node is visible.
    pub fn unfiltered(total_nodes: usize) -> Self {
        Self {
            visible_message_ids: None,
            total_nodes,
            visible_count: total_nodes,
        }
    }

    /// Whether a given id is visible under this result.
    pub fn is_visible(&self, id: MessageId) -> bool {
        match &self.visible_message_ids {
            None => true,
            Some(ids) => ids.binary_search(&id).is_ok(),
        }
    }
}
