//! Corpus matrix
//!
//! Row-major storage of the normalized candidate vectors. Row `i` always
//! belongs to row `i` of the candidate table it was built from.

use crate::{Error, RankWeightedEncoder, Result, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stacked, row-normalized category vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMatrix {
    dim: usize,
    rows: usize,
    data: Vec<f32>,
}

impl CorpusMatrix {
    /// Empty matrix with a fixed row dimension
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: 0,
            data: Vec::new(),
        }
    }

    pub fn with_capacity(dim: usize, rows: usize) -> Self {
        Self {
            dim,
            rows: 0,
            data: Vec::with_capacity(dim * rows),
        }
    }

    /// Stack vectors as rows, unchanged
    pub fn from_vectors<I>(dim: usize, vectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        let mut matrix = Self::new(dim);
        for v in vectors {
            matrix.push_row(v.as_slice())?;
        }
        Ok(matrix)
    }

    /// Encode every ranking with the permissive path, then L2-normalize
    /// each row on its own. Rows with no known label stay zero.
    pub fn build_filtered<R, S>(encoder: &RankWeightedEncoder, rankings: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut matrix = Self::with_capacity(encoder.dim(), rankings.len());
        let mut empty_rows = 0usize;

        for ranking in rankings {
            let mut v = encoder.encode_filtered(ranking.as_ref());
            if v.is_zero() {
                empty_rows += 1;
            }
            v.normalize();
            matrix.data.extend_from_slice(v.as_slice());
            matrix.rows += 1;
        }

        debug!(
            rows = matrix.rows,
            dim = matrix.dim,
            empty_rows,
            "built corpus matrix"
        );
        matrix
    }

    pub fn push_row(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.dim;
        Some(&self.data[start..start + self.dim])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |i| {
            let start = i * self.dim;
            &self.data[start..start + self.dim]
        })
    }

    /// Check the internal layout after deserialization
    pub fn validate(&self) -> Result<()> {
        if self.data.len() != self.dim * self.rows {
            return Err(Error::Serialization(format!(
                "corpus matrix holds {} values, expected {} x {}",
                self.data.len(),
                self.rows,
                self.dim
            )));
        }
        Ok(())
    }
}
