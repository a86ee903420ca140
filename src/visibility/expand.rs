//! Bounded-depth breadth-first set expansion.

use std::collections::HashSet;

use super::adjacency::Adjacency;
use crate::model::MessageId;

/// Expand `seeds` outward `depth` hops along the adjacency list.
///
/// `depth == 0` returns the seeds unchanged. Ids absent from `adjacency`
/// have no neighbors. Terminates early once a frontier is empty, so depth
/// can exceed the graph diameter safely.
pub fn bfs_expand(seeds: &HashSet<MessageId>, depth: usize, adjacency: &Adjacency) -> HashSet<MessageId> {
    let mut visited = seeds.clone();
    let mut frontier: Vec<MessageId> = seeds.iter().copied().collect();

    for _ in 0..depth {
        let mut next_frontier = Vec::new();
        for id in &frontier {
            let Some(neighbors) = adjacency.get(id) else { continue };
            for &neighbor in neighbors {
                if visited.insert(neighbor) {
                    next_frontier.push(neighbor);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }

    visited
}
