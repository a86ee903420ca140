//! # Graph Store Trait
//!
//! The contract between the visibility engine and whatever holds the
//! ingested message graph. The engine only ever needs three reads, all
//! scoped to the caller's time window — everything else about the store
//! (schema, migrations, ingestion) lives outside this crate.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |
//!
//! Stores backed by parameter-limited query engines (SQL `IN` clauses) do
//! not batch themselves: the engine chunks id lists at [`GraphStore::page_size`]
//! before each call, so one call maps to one round-trip.

pub mod memory;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::Result;
use crate::model::{FilterId, FilterMatch, MessageId, StructuralRow, TimeWindow};

pub use memory::MemoryStore;

/// Default chunk size for id-list reads. Sized for stores with a ~1000
/// bind-parameter ceiling per query.
pub const DEFAULT_PAGE_SIZE: usize = 900;

/// Read access to the materialized message graph.
///
/// All reads are window-scoped and side-effect free. Failures propagate to
/// the caller as [`crate::Error::StorageError`] — the engine never retries,
/// because a partially loaded graph would produce a misleading visible set.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Ids of every message inside the window.
    async fn nodes_in_window(&self, window: &TimeWindow) -> Result<HashSet<MessageId>>;

    /// `(id, session_id, sequence_num)` rows for every message inside the
    /// window, sorted by `(session_id, sequence_num)`. Consecutive rows of
    /// the same session are adjacent messages in that conversation.
    async fn structural_rows(&self, window: &TimeWindow) -> Result<Vec<StructuralRow>>;

    /// Positive filter-match rows for the given filter ids. Rows where the
    /// filter did not match are never returned.
    ///
    /// Callers chunk `filter_ids` at [`page_size`](Self::page_size); an
    /// implementation may assume the slice fits in a single query.
    async fn filter_matches(&self, filter_ids: &[FilterId]) -> Result<Vec<FilterMatch>>;

    /// Largest id-list length a single `filter_matches` call should carry.
    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }
}
