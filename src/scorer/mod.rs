//! # Similarity Scorer Boundary
//!
//! The proximity pipeline consumes relevance scores through the
//! [`SimilarityScorer`] trait and never sees where they come from. The crate
//! ships one implementation, [`MatrixScorer`], which scores queries by cosine
//! similarity against a cached embedding matrix; vector *generation* stays
//! behind the [`QueryEmbedder`] and [`VectorSource`] seams.

pub mod matrix;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::Result;
use crate::model::MessageId;

pub use matrix::{MatrixScorer, ScoreNormalization};

/// Per-node relevance of free text, in `[0, 1]`.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Score every embedded node against `query_text`.
    ///
    /// An empty map signals "no embedded corpus" and must propagate as "no
    /// edges", not as an error.
    async fn score(&self, query_text: &str) -> Result<HashMap<MessageId, f64>>;
}

/// Scorer for deployments with no embedded corpus: every query reports an
/// empty score map, which downstream means "no proximity edges".
pub struct NullScorer;

#[async_trait]
impl SimilarityScorer for NullScorer {
    async fn score(&self, _query_text: &str) -> Result<HashMap<MessageId, f64>> {
        Ok(HashMap::new())
    }
}

/// Turns query text into an embedding vector. External I/O lives here.
#[async_trait]
pub trait QueryEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Supplies the stored per-message embedding vectors.
///
/// Loaded in full on cache rebuild; implementations own persistence and must
/// pair every write with a [`MatrixScorer::invalidate`] call.
#[async_trait]
pub trait VectorSource: Send + Sync {
    async fn load_vectors(&self) -> Result<Vec<(MessageId, Vec<f32>)>>;
}
