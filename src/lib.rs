//! # convograph — Message-Graph Visibility & Proximity
//!
//! The decision core of a conversation-transcript visualizer: given an
//! ingested message graph, decide *which nodes and edges appear*.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphStore` and `SimilarityScorer` are the contracts
//!    between the engines and the outside world
//! 2. **Clean DTOs**: `MessageNode`, `VisibleSet`, `ProximityEdge` cross all
//!    boundaries
//! 3. **Pure engines**: visibility and proximity are deterministic functions
//!    over fresh inputs — no hidden state, no cross-call coupling
//! 4. **Caches are explicit**: the one cache in the system (the scorer's
//!    embedding matrix) is an owned, lock-guarded, invalidatable object
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use convograph::{FilterId, FilterMode, MessageGraph, TimeWindow};
//!
//! # async fn example() -> convograph::Result<()> {
//! let graph = MessageGraph::open_memory();
//! // ... ingest messages and filter results via graph.store() ...
//!
//! let modes = HashMap::from([(FilterId(1), FilterMode::IncludePlus1)]);
//! let window = TimeWindow::last_hours(24.0);
//! let visible = graph.compute_visible_set(&modes, &window).await?;
//!
//! println!("{} of {} nodes visible", visible.visible_count, visible.total_nodes);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipelines
//!
//! | Pipeline | Input | Output |
//! |----------|-------|--------|
//! | Visibility | filter modes + time window | [`VisibleSet`] |
//! | Proximity | query text + [`ProximityConfig`] | [`ProximityGraph`] |
//!
//! The two pipelines share no mutable state and may run concurrently.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod store;
pub mod visibility;
pub mod proximity;
pub mod scorer;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    FilterId, FilterMatch, FilterMode, MessageId, MessageNode, ProximityEdge, StructuralEdge,
    StructuralRow, TimeWindow, VisibleSet,
};

// ============================================================================
// Re-exports: Store
// ============================================================================

pub use store::{GraphStore, MemoryStore};

// ============================================================================
// Re-exports: Engines
// ============================================================================

pub use proximity::{ProximityConfig, ProximityGraph, compute_proximity_edges};
pub use visibility::VisibilityEngine;

// ============================================================================
// Re-exports: Scorer
// ============================================================================

pub use scorer::{
    MatrixScorer, NullScorer, QueryEmbedder, ScoreNormalization, SimilarityScorer, VectorSource,
};

use std::collections::HashMap;

// ============================================================================
// Top-level MessageGraph handle
// ============================================================================

/// The primary entry point. A `MessageGraph` wraps a graph store and a
/// similarity scorer and exposes the operations the rendering layer consumes.
pub struct MessageGraph<S: GraphStore, C = NullScorer> {
    store: S,
    scorer: C,
}

impl<S: GraphStore, C> MessageGraph<S, C> {
    /// Create a handle over the given store and scorer.
    pub fn new(store: S, scorer: C) -> Self {
        Self { store, scorer }
    }

    /// Compute the visible message set for the given filter modes.
    ///
    /// See [`VisibilityEngine::compute_visible_set`] for the full semantics.
    pub async fn compute_visible_set(
        &self,
        filter_modes: &HashMap<FilterId, FilterMode>,
        window: &TimeWindow,
    ) -> Result<VisibleSet> {
        VisibilityEngine::new(&self.store).compute_visible_set(filter_modes, window).await
    }

    /// Canonical structural edge list for the window: one undirected edge
    /// per consecutive same-session message pair, for the rendering layer.
    pub async fn structural_edges(&self, window: &TimeWindow) -> Result<Vec<StructuralEdge>> {
        let rows = self.store.structural_rows(window).await?;

        let mut edges = Vec::new();
        let mut prev: Option<&StructuralRow> = None;
        for row in &rows {
            if let Some(p) = prev {
                if p.session_id == row.session_id {
                    edges.push(StructuralEdge::new(p.id, row.id));
                }
            }
            prev = Some(row);
        }
        Ok(edges)
    }

    /// Access the underlying store (for ingestion or advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the underlying scorer (e.g. to invalidate its cache).
    pub fn scorer(&self) -> &C {
        &self.scorer
    }
}

impl<S: GraphStore, C: SimilarityScorer> MessageGraph<S, C> {
    /// Score every embedded node against `query_text` and link nodes whose
    /// scores lie within `config.delta` of each other.
    ///
    /// An empty score map (no embedded corpus) yields an empty edge list,
    /// not an error.
    pub async fn proximity_edges(
        &self,
        query_text: &str,
        config: &ProximityConfig,
    ) -> Result<ProximityGraph> {
        config.validate()?;

        let scores = self.scorer.score(query_text).await?;
        let edges = compute_proximity_edges(&scores, config)?;
        let count = edges.len();

        Ok(ProximityGraph { edges, scores, count })
    }
}

/// In-memory graph for testing and embedding.
impl MessageGraph<MemoryStore, NullScorer> {
    pub fn open_memory() -> Self {
        Self::new(MemoryStore::new(), NullScorer)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Scorer error: {0}")]
    ScorerError(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
