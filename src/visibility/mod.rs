//! # Visibility Engine
//!
//! Turns a set of per-filter modes into the visible subset of the windowed
//! message graph. Include-family filters union their (optionally
//! BFS-expanded) matches; exclude filters subtract theirs afterwards, so an
//! exclude always wins over an include for the same node.
//!
//! The engine holds no state between calls: every invocation reads fresh
//! rows from the store and returns a fresh [`VisibleSet`], so concurrent
//! evaluations of different filter sets need no coordination.

pub mod adjacency;
pub mod expand;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::Result;
use crate::model::{FilterId, FilterMode, MessageId, TimeWindow, VisibleSet};
use crate::store::GraphStore;

pub use adjacency::{Adjacency, build_adjacency};
pub use expand::bfs_expand;

/// Filter-mode evaluation over a borrowed store.
pub struct VisibilityEngine<'a, S: GraphStore> {
    store: &'a S,
}

impl<'a, S: GraphStore> VisibilityEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compute the visible message set for the given filter modes.
    ///
    /// Steps, in order (the order is what makes exclude win):
    ///
    /// 1. Load the windowed id universe.
    /// 2. Drop `Off` entries; with none left, return the unfiltered result
    ///    (`visible_message_ids: None` — distinct from "nothing visible").
    /// 3. Batch-load positive matches for the remaining filters, chunked at
    ///    the store's page size.
    /// 4. Build the structural adjacency list only if some mode expands.
    /// 5. Union include-family contributions, each intersected with the
    ///    window universe.
    /// 6. Start from the union (or the universe if no includes), then
    ///    subtract every exclude filter's matches.
    pub async fn compute_visible_set(
        &self,
        filter_modes: &HashMap<FilterId, FilterMode>,
        window: &TimeWindow,
    ) -> Result<VisibleSet> {
        let all_ids = self.store.nodes_in_window(window).await?;
        let total_nodes = all_ids.len();

        let active: Vec<(FilterId, FilterMode)> = filter_modes
            .iter()
            .filter(|(_, mode)| **mode != FilterMode::Off)
            .map(|(id, mode)| (*id, *mode))
            .collect();

        if active.is_empty() {
            debug!(total_nodes, "no active filters, skipping visibility computation");
            return Ok(VisibleSet::unfiltered(total_nodes));
        }

        let matches = self.load_matches(&active).await?;

        let has_includes = active.iter().any(|(_, mode)| mode.is_include());
        let needs_expansion = active
            .iter()
            .any(|(_, mode)| matches!(mode, FilterMode::IncludePlus1 | FilterMode::IncludePlus2));

        // The structural-edge read is the expensive one; skip it unless some
        // filter actually expands.
        let adjacency = if needs_expansion {
            build_adjacency(&self.store.structural_rows(window).await?)
        } else {
            Adjacency::new()
        };

        let mut include_union: HashSet<MessageId> = HashSet::new();
        for (filter_id, mode) in &active {
            let Some(depth) = mode.expansion_depth() else { continue };
            let matched: HashSet<MessageId> = match matches.get(filter_id) {
                Some(set) => set.intersection(&all_ids).copied().collect(),
                None => HashSet::new(),
            };
            if depth == 0 {
                include_union.extend(matched);
            } else {
                let expanded = bfs_expand(&matched, depth, &adjacency);
                include_union.extend(expanded.intersection(&all_ids).copied());
            }
        }

        let mut visible = if has_includes { include_union } else { all_ids };

        // Exclude runs last and unrestricted: subtracting ids outside the
        // window is a no-op, and an exclude match always beats an include.
        for (filter_id, mode) in &active {
            if *mode == FilterMode::Exclude {
                if let Some(matched) = matches.get(filter_id) {
                    for id in matched {
                        visible.remove(id);
                    }
                }
            }
        }

        let mut visible_ids: Vec<MessageId> = visible.into_iter().collect();
        visible_ids.sort_unstable();
        let visible_count = visible_ids.len();

        debug!(total_nodes, visible_count, filters = active.len(), "visibility computed");

        Ok(VisibleSet {
            visible_message_ids: Some(visible_ids),
            total_nodes,
            visible_count,
        })
    }

    /// Batch-load positive match rows for every active filter, chunking the
    /// id list so a store with a bind-parameter ceiling sees bounded queries.
    async fn load_matches(
        &self,
        active: &[(FilterId, FilterMode)],
    ) -> Result<HashMap<FilterId, HashSet<MessageId>>> {
        let filter_ids: Vec<FilterId> = active.iter().map(|(id, _)| *id).collect();
        let page_size = self.store.page_size().max(1);

        let mut matches: HashMap<FilterId, HashSet<MessageId>> = HashMap::new();
        for chunk in filter_ids.chunks(page_size) {
            for row in self.store.filter_matches(chunk).await? {
                matches.entry(row.filter_id).or_default().insert(row.message_id);
            }
        }
        Ok(matches)
    }
}
