//! Cosine-similarity scoring over a cached, normalized embedding matrix.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{QueryEmbedder, SimilarityScorer, VectorSource};
use crate::model::MessageId;
use crate::{Error, Result};

// ============================================================================
// Normalization strategy
// ============================================================================

/// How raw cosine similarity (practically ~[0.3, 0.9] for text embeddings)
/// is mapped into `[0, 1]`.
///
/// The choice changes absolute edge strengths, never relative ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreNormalization {
    /// Per-query min-max stretch: the closest node scores 1.0, the farthest
    /// 0.0. Zero spread (single node, or all cosines equal) maps to 0.5.
    MinMaxStretch,
    /// Linear `(cos + 1) / 2` remap, clamped. Scores are comparable across
    /// queries but rarely reach the ends of the range.
    CosineRemap,
}

impl Default for ScoreNormalization {
    fn default() -> Self {
        Self::MinMaxStretch
    }
}

// ============================================================================
// Matrix cache
// ============================================================================

/// L2-normalized corpus matrix plus its id index.
struct MatrixCache {
    ids: Vec<MessageId>,
    /// Row-major; row i is the normalized vector for `ids[i]`.
    matrix: Vec<f32>,
    dims: usize,
}

impl MatrixCache {
    fn build(rows: Vec<(MessageId, Vec<f32>)>) -> Result<Self> {
        let Some((_, first)) = rows.first() else {
            return Ok(Self { ids: Vec::new(), matrix: Vec::new(), dims: 0 });
        };
        let dims = first.len();

        let mut ids = Vec::with_capacity(rows.len());
        let mut matrix = Vec::with_capacity(rows.len() * dims);
        for (id, mut vector) in rows {
            if vector.len() != dims {
                return Err(Error::DimensionMismatch { expected: dims, got: vector.len() });
            }
            l2_normalize(&mut vector);
            ids.push(id);
            matrix.extend_from_slice(&vector);
        }

        Ok(Self { ids, matrix, dims })
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.matrix[i * self.dims..(i + 1) * self.dims]
    }
}

/// Normalize in place; a zero vector is left as-is so it scores 0 against
/// everything instead of producing NaN.
fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

// ============================================================================
// MatrixScorer
// ============================================================================

/// Reference [`SimilarityScorer`]: embeds the query, takes dot products
/// against a cached normalized matrix, and maps raw cosine into `[0, 1]`.
///
/// The cache is rebuilt lazily on the first call after construction or
/// [`invalidate`](Self::invalidate). Concurrent cold-cache callers may race
/// to rebuild; the last write wins and the data is identical, so no
/// coordination beyond the RwLock is needed.
pub struct MatrixScorer<E, V> {
    embedder: E,
    source: V,
    normalization: ScoreNormalization,
    cache: RwLock<Option<Arc<MatrixCache>>>,
}

impl<E: QueryEmbedder, V: VectorSource> MatrixScorer<E, V> {
    pub fn new(embedder: E, source: V) -> Self {
        Self::with_normalization(embedder, source, ScoreNormalization::default())
    }

    pub fn with_normalization(embedder: E, source: V, normalization: ScoreNormalization) -> Self {
        Self {
            embedder,
            source,
            normalization,
            cache: RwLock::new(None),
        }
    }

    /// Drop the cached matrix. Must be called after every write to the
    /// underlying vector store; the next `score` call rebuilds.
    pub fn invalidate(&self) {
        *self.cache.write() = None;
    }

    async fn cached_matrix(&self) -> Result<Arc<MatrixCache>> {
        if let Some(cache) = self.cache.read().as_ref() {
            return Ok(Arc::clone(cache));
        }

        let rows = self.source.load_vectors().await?;
        let cache = Arc::new(MatrixCache::build(rows)?);
        debug!(rows = cache.ids.len(), dims = cache.dims, "embedding matrix cache rebuilt");

        *self.cache.write() = Some(Arc::clone(&cache));
        Ok(cache)
    }
}

#[async_trait]
impl<E: QueryEmbedder, V: VectorSource> SimilarityScorer for MatrixScorer<E, V> {
    async fn score(&self, query_text: &str) -> Result<HashMap<MessageId, f64>> {
        let mut query = self.embedder.embed(query_text).await?;
        if query.is_empty() {
            return Ok(HashMap::new());
        }

        let cache = self.cached_matrix().await?;
        if cache.ids.is_empty() {
            return Ok(HashMap::new());
        }
        if query.len() != cache.dims {
            return Err(Error::DimensionMismatch { expected: cache.dims, got: query.len() });
        }

        l2_normalize(&mut query);

        let similarities: Vec<f64> =
            (0..cache.ids.len()).map(|i| dot(cache.row(i), &query) as f64).collect();

        let scores = match self.normalization {
            ScoreNormalization::MinMaxStretch => {
                let min = similarities.iter().copied().fold(f64::INFINITY, f64::min);
                let max = similarities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let spread = max - min;
                similarities
                    .iter()
                    .map(|s| if spread > 0.0 { (s - min) / spread } else { 0.5 })
                    .collect::<Vec<f64>>()
            }
            ScoreNormalization::CosineRemap => {
                similarities.iter().map(|s| ((s + 1.0) / 2.0).clamp(0.0, 1.0)).collect()
            }
        };

        Ok(cache.ids.iter().copied().zip(scores).collect())
    }
}
