//! Rank-Weighted Encoder
//!
//! Turns an ordered label ranking into a dense vector over the vocabulary.
//! The label at ranking position `i` receives weight `top_n - i`; every
//! other dimension is zero.
//!
//! Two entry points share the same weighting:
//!
//! - [`RankWeightedEncoder::encode_strict`] rejects labels outside the
//!   vocabulary. Query rankings go through this path.
//! - [`RankWeightedEncoder::encode_filtered`] silently drops unknown labels.
//!   Candidate rankings go through this path since profile data is noisier
//!   than the fixed category set.

use crate::{Error, Result, Vector, Vocabulary};
use ahash::AHashSet;
use std::sync::Arc;

/// Default ranking length produced by categorizers
pub const DEFAULT_TOP_N: usize = 5;

/// Split a comma-delimited label list, trimming entries and dropping empties
pub fn parse_label_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Encodes label rankings into category vectors
#[derive(Debug, Clone)]
pub struct RankWeightedEncoder {
    vocabulary: Arc<Vocabulary>,
    top_n: usize,
}

impl RankWeightedEncoder {
    pub fn new(vocabulary: Arc<Vocabulary>, top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be positive".to_string()));
        }
        Ok(Self { vocabulary, top_n })
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Output dimension
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Encode a ranking whose labels must all be vocabulary members.
    ///
    /// Fails with [`Error::UnknownCategory`] on the first label outside the
    /// vocabulary, [`Error::DuplicateLabel`] on a repeated label and
    /// [`Error::RankingTooLong`] when more than `top_n` labels are given.
    pub fn encode_strict<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vector> {
        if labels.len() > self.top_n {
            return Err(Error::RankingTooLong {
                len: labels.len(),
                max: self.top_n,
            });
        }

        let mut indices = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref();
            let idx = self
                .vocabulary
                .index_of(label)
                .ok_or_else(|| Error::UnknownCategory {
                    label: label.to_string(),
                })?;
            if indices.contains(&idx) {
                return Err(Error::DuplicateLabel {
                    label: label.to_string(),
                });
            }
            indices.push(idx);
        }

        Ok(self.weigh(&indices))
    }

    /// Encode a ranking after dropping unknown and repeated labels.
    ///
    /// Survivors keep their relative order; only the first `top_n` of them
    /// are weighted.
    pub fn encode_filtered<S: AsRef<str>>(&self, labels: &[S]) -> Vector {
        let mut seen = AHashSet::with_capacity(labels.len());
        let indices: Vec<usize> = labels
            .iter()
            .filter_map(|l| self.vocabulary.index_of(l.as_ref()))
            .filter(|idx| seen.insert(*idx))
            .take(self.top_n)
            .collect();

        self.weigh(&indices)
    }

    /// The labels of `labels` that `encode_filtered` keeps, in order
    pub fn filter_known<S: AsRef<str>>(&self, labels: &[S]) -> Vec<String> {
        let mut seen = AHashSet::with_capacity(labels.len());
        labels
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| self.vocabulary.contains(l))
            .filter(|l| seen.insert(*l))
            .take(self.top_n)
            .map(str::to_string)
            .collect()
    }

    fn weigh(&self, indices: &[usize]) -> Vector {
        let mut vector = Vector::zeros(self.dim());
        let data = vector.as_mut_slice();
        for (rank, &idx) in indices.iter().enumerate() {
            data[idx] = (self.top_n - rank) as f32;
        }
        vector
    }
}
