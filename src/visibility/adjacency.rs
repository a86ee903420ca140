//! Structural adjacency over ordered message rows.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::model::{MessageId, StructuralRow};

/// Undirected neighbor lists keyed by message id.
///
/// Structural degree is at most 2 (previous and next message of the same
/// session), so neighbor lists stay inline.
pub type Adjacency = HashMap<MessageId, SmallVec<[MessageId; 2]>>;

/// Build the undirected adjacency list of structural edges.
///
/// `rows` must be sorted by `(session_id, sequence_num)` — the order the
/// store contract guarantees. Every consecutive same-session pair is linked
/// in both directions. A session boundary breaks the chain, so the last
/// message of one session is never linked to the first of the next.
///
/// Messages with no in-window neighbor do not appear in the map; BFS treats
/// absent ids as isolated.
pub fn build_adjacency(rows: &[StructuralRow]) -> Adjacency {
    let mut adjacency = Adjacency::new();
    let mut prev: Option<&StructuralRow> = None;

    for row in rows {
        if let Some(p) = prev {
            if p.session_id == row.session_id {
                adjacency.entry(p.id).or_default().push(row.id);
                adjacency.entry(row.id).or_default().push(p.id);
            }
        }
        prev = Some(row);
    }

    adjacency
}
