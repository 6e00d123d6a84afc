//! Explainability for ranking results
//!
//! Cosine similarity between unit vectors is a sum of per-dimension
//! products, so each shared category's share of a candidate's score can be
//! reported directly.

use crate::candidate::Candidate;
use serde::Serialize;
use speakerrank_core::{Neighbor, Vector, Vocabulary};
use std::collections::BTreeMap;

/// One ranked candidate with its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    /// Row in the candidate table
    pub row: usize,
    /// Squared L2 distance to the query vector
    pub distance: f32,
    /// Cosine similarity to the query vector
    pub similarity: f32,
    pub candidate: Candidate,
    /// Per-category contribution to `similarity`, shared categories only
    pub explain: BTreeMap<String, f32>,
}

impl RankedCandidate {
    /// `query` and `row_vector` must be the normalized vectors the search used
    pub fn new(
        hit: Neighbor,
        candidate: Candidate,
        query: &Vector,
        row_vector: &Vector,
        vocabulary: &Vocabulary,
    ) -> Self {
        Self {
            row: hit.row,
            distance: hit.distance,
            // 1 - d/2 only holds when both sides are unit length
            similarity: query.cosine_similarity(row_vector),
            candidate,
            explain: contributions(query, row_vector, vocabulary),
        }
    }
}

/// Non-zero products `q[i] * r[i]`, keyed by category label
pub fn contributions(query: &Vector, row: &Vector, vocabulary: &Vocabulary) -> BTreeMap<String, f32> {
    query
        .as_slice()
        .iter()
        .zip(row.as_slice())
        .enumerate()
        .filter(|(_, (q, r))| **q != 0.0 && **r != 0.0)
        .filter_map(|(i, (q, r))| vocabulary.label(i).map(|l| (l.to_string(), q * r)))
        .collect()
}

/// Response for one ranking request
#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub topic: String,
    /// Categories the topic was reduced to, most relevant first
    pub topic_labels: Vec<String>,
    /// Requested result count
    pub k: usize,
    /// Candidates searched
    pub candidates_count: usize,
    pub results: Vec<RankedCandidate>,
}

impl RankingReport {
    pub fn names(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|r| r.candidate.name.as_str())
            .collect()
    }
}
