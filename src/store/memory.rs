//! In-memory graph store.
//!
//! This is the reference implementation of `GraphStore`.
//! It uses simple collections protected by RwLock.
//!
//! ## Limitations
//!
//! - **Single-writer only**: per-collection locks mean multi-step inserts
//!   are NOT atomic. Safe for single-threaded setup or read-heavy use.
//! - **No indexes**: every read is a full scan over the relevant map.
//!
//! Use this store for:
//! - Testing the visibility engine and the top-level handle
//! - Embedding convograph in applications that don't need persistence

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::GraphStore;
use crate::Result;
use crate::model::{FilterId, FilterMatch, MessageId, MessageNode, StructuralRow, TimeWindow};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory message graph storage.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    messages: RwLock<Vec<MessageNode>>,
    /// `(filter_id, message_id, matched)` rows, matched and unmatched alike;
    /// the trait surface only ever exposes the matched ones.
    filter_rows: RwLock<Vec<(FilterId, MessageId, bool)>>,
    next_message_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                messages: RwLock::new(Vec::new()),
                filter_rows: RwLock::new(Vec::new()),
                next_message_id: AtomicU64::new(1),
            }),
        }
    }

    /// Insert a message with an allocated id.
    pub fn insert_message(
        &self,
        session_id: impl Into<String>,
        sequence_num: u64,
        timestamp: DateTime<Utc>,
    ) -> MessageId {
        let id = MessageId(self.inner.next_message_id.fetch_add(1, Ordering::Relaxed));
        self.inner.messages.write().push(MessageNode {
            id,
            session_id: session_id.into(),
            sequence_num,
            timestamp,
        });
        id
    }

    /// Insert a message under a caller-chosen id (fixture convenience).
    /// The id allocator is bumped past it so allocated ids never collide.
    pub fn insert_message_with_id(
        &self,
        id: MessageId,
        session_id: impl Into<String>,
        sequence_num: u64,
        timestamp: DateTime<Utc>,
    ) {
        self.inner.next_message_id.fetch_max(id.0 + 1, Ordering::Relaxed);
        self.inner.messages.write().push(MessageNode {
            id,
            session_id: session_id.into(),
            sequence_num,
            timestamp,
        });
    }

    /// Record a scoring outcome for `(filter, message)`.
    pub fn insert_filter_result(&self, filter_id: FilterId, message_id: MessageId, matched: bool) {
        self.inner.filter_rows.write().push((filter_id, message_id, matched));
    }

    pub fn message_count(&self) -> usize {
        self.inner.messages.read().len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GraphStore impl
// ============================================================================

#[async_trait]
impl GraphStore for MemoryStore {
    async fn nodes_in_window(&self, window: &TimeWindow) -> Result<HashSet<MessageId>> {
        Ok(self
            .inner
            .messages
            .read()
            .iter()
            .filter(|m| window.contains(m.timestamp))
            .map(|m| m.id)
            .collect())
    }

    async fn structural_rows(&self, window: &TimeWindow) -> Result<Vec<StructuralRow>> {
        let mut rows: Vec<StructuralRow> = self
            .inner
            .messages
            .read()
            .iter()
            .filter(|m| window.contains(m.timestamp))
            .map(|m| StructuralRow {
                id: m.id,
                session_id: m.session_id.clone(),
                sequence_num: m.sequence_num,
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.session_id.as_str(), a.sequence_num).cmp(&(b.session_id.as_str(), b.sequence_num))
        });
        Ok(rows)
    }

    async fn filter_matches(&self, filter_ids: &[FilterId]) -> Result<Vec<FilterMatch>> {
        let wanted: HashSet<FilterId> = filter_ids.iter().copied().collect();
        Ok(self
            .inner
            .filter_rows
            .read()
            .iter()
            .filter(|(fid, _, matched)| *matched && wanted.contains(fid))
            .map(|(fid, mid, _)| FilterMatch { filter_id: *fid, message_id: *mid })
            .collect())
    }
}
