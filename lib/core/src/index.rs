//! Similarity index
//!
//! [`SimilarityIndex`] is the seam between callers and the nearest-neighbor
//! structure. [`FlatL2Index`] is the exact brute-force implementation: every
//! row is scored against the query and the `k` closest rows are returned.
//!
//! With unit-length query and rows, `|q - r|² = 2 - 2·cos(q, r)`, so ascending
//! squared L2 order is the same as descending cosine similarity order.

use crate::{CorpusMatrix, Error, Result, Vector};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Row count above which distances are computed on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 4096;

/// One search hit: a corpus row and its squared L2 distance to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f32,
}

impl Neighbor {
    /// Cosine similarity implied by the distance, valid for unit-length inputs
    #[inline]
    pub fn cosine_similarity(&self) -> f32 {
        1.0 - self.distance / 2.0
    }

    #[inline]
    fn sort_key(&self) -> (OrderedFloat<f32>, usize) {
        (OrderedFloat(self.distance), self.row)
    }
}

/// Nearest-neighbor structure over a corpus matrix
///
/// `build` replaces the indexed corpus entirely. `search` takes `&self` and
/// must be safe to call from many threads once `build` has returned.
pub trait SimilarityIndex: Send + Sync {
    /// Index a new corpus, discarding the previous one
    fn build(&mut self, corpus: CorpusMatrix) -> Result<()>;

    /// The `k` rows closest to `query`, ascending by distance, ties by row.
    /// `k` larger than the corpus returns every row.
    fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>>;

    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row dimension
    fn dim(&self) -> usize;
}

/// Exact L2 index, the equivalent of a flat L2 index
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    corpus: CorpusMatrix,
}

impl FlatL2Index {
    /// Empty index over `dim`-dimensional rows
    pub fn new(dim: usize) -> Self {
        Self {
            corpus: CorpusMatrix::new(dim),
        }
    }

    /// Index built from an existing corpus. Fails if the matrix shape is
    /// inconsistent, as `build` does.
    pub fn from_corpus(corpus: CorpusMatrix) -> Result<Self> {
        corpus.validate()?;
        Ok(Self { corpus })
    }

    pub fn corpus(&self) -> &CorpusMatrix {
        &self.corpus
    }

    fn distances(&self, query: &[f32]) -> Vec<Neighbor> {
        let corpus = &self.corpus;
        let score = |row: usize| Neighbor {
            row,
            distance: corpus
                .row(row)
                .map(|r| crate::simd::l2_squared_simd(query, r))
                .unwrap_or(f32::INFINITY),
        };

        if corpus.len() >= PARALLEL_THRESHOLD {
            (0..corpus.len()).into_par_iter().map(score).collect()
        } else {
            (0..corpus.len()).map(score).collect()
        }
    }
}

impl SimilarityIndex for FlatL2Index {
    fn build(&mut self, corpus: CorpusMatrix) -> Result<()> {
        if corpus.dim() != self.corpus.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.corpus.dim(),
                actual: corpus.dim(),
            });
        }
        corpus.validate()?;

        debug!(rows = corpus.len(), dim = corpus.dim(), "flat index built");
        self.corpus = corpus;
        Ok(())
    }

    fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        if query.dim() != self.corpus.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.corpus.dim(),
                actual: query.dim(),
            });
        }
        if self.corpus.is_empty() {
            return Ok(Vec::new());
        }

        let k = k.min(self.corpus.len());
        let mut hits = self.distances(query.as_slice());
        let by_key = |a: &Neighbor, b: &Neighbor| -> Ordering { a.sort_key().cmp(&b.sort_key()) };

        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, by_key);
            hits.truncate(k);
        }
        hits.sort_unstable_by(by_key);

        Ok(hits)
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }

    fn dim(&self) -> usize {
        self.corpus.dim()
    }
}
