//! Categorizers
//!
//! A [`Categorizer`] reduces free text to the `top_n` vocabulary labels most
//! relevant to it, most relevant first.

use crate::embedder::TextEmbedder;
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use speakerrank_core::{parse_label_list, Result, Vector, Vocabulary};
use std::sync::Arc;
use tracing::{debug, trace};

/// Maps text to an ordered label ranking over a vocabulary
pub trait Categorizer: Send + Sync {
    /// At most `top_n` labels, most relevant first
    fn categorize(&self, text: &str, vocabulary: &Vocabulary, top_n: usize) -> Result<Vec<String>>;
}

impl<C: Categorizer + ?Sized> Categorizer for Arc<C> {
    fn categorize(&self, text: &str, vocabulary: &Vocabulary, top_n: usize) -> Result<Vec<String>> {
        (**self).categorize(text, vocabulary, top_n)
    }
}

impl<C: Categorizer + ?Sized> Categorizer for Box<C> {
    fn categorize(&self, text: &str, vocabulary: &Vocabulary, top_n: usize) -> Result<Vec<String>> {
        (**self).categorize(text, vocabulary, top_n)
    }
}

/// Reads the text as an already-ranked, comma-delimited label list.
///
/// Labels are returned as given, truncated to `top_n`; membership in the
/// vocabulary is left for the encoder to enforce.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelListCategorizer;

impl Categorizer for LabelListCategorizer {
    fn categorize(&self, text: &str, _vocabulary: &Vocabulary, top_n: usize) -> Result<Vec<String>> {
        let mut labels = parse_label_list(text);
        labels.truncate(top_n);
        Ok(labels)
    }
}

struct LabelEmbeddings {
    fingerprint: u64,
    vectors: Vec<Vector>,
}

/// Ranks vocabulary labels by cosine similarity between the text embedding
/// and each label's embedding.
///
/// Label embeddings are computed on first use for a vocabulary and reused
/// until a different vocabulary is seen.
pub struct EmbeddingCategorizer<E> {
    embedder: E,
    labels: RwLock<Option<Arc<LabelEmbeddings>>>,
}

impl<E: TextEmbedder> EmbeddingCategorizer<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            labels: RwLock::new(None),
        }
    }

    /// Embed the vocabulary up front
    pub fn with_vocabulary(embedder: E, vocabulary: &Vocabulary) -> Result<Self> {
        let categorizer = Self::new(embedder);
        categorizer.label_embeddings(vocabulary)?;
        Ok(categorizer)
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Cosine similarity of `text` to every label, in vocabulary order
    pub fn scores(&self, text: &str, vocabulary: &Vocabulary) -> Result<Vec<f32>> {
        let labels = self.label_embeddings(vocabulary)?;
        let query = self.embedder.embed(text)?;
        Ok(labels
            .vectors
            .iter()
            .map(|label| query.cosine_similarity(label))
            .collect())
    }

    fn label_embeddings(&self, vocabulary: &Vocabulary) -> Result<Arc<LabelEmbeddings>> {
        let fingerprint = vocabulary.fingerprint();
        if let Some(cached) = self.labels.read().as_ref() {
            if cached.fingerprint == fingerprint {
                return Ok(cached.clone());
            }
        }

        let vectors = vocabulary
            .iter()
            .map(|label| self.embedder.embed(label))
            .collect::<Result<Vec<_>>>()?;
        debug!(labels = vectors.len(), "embedded category vocabulary");

        let embeddings = Arc::new(LabelEmbeddings {
            fingerprint,
            vectors,
        });
        *self.labels.write() = Some(embeddings.clone());
        Ok(embeddings)
    }
}

impl<E: TextEmbedder> Categorizer for EmbeddingCategorizer<E> {
    fn categorize(&self, text: &str, vocabulary: &Vocabulary, top_n: usize) -> Result<Vec<String>> {
        let scores = self.scores(text, vocabulary)?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // descending score, vocabulary order on ties
        order.sort_by_key(|&i| (std::cmp::Reverse(OrderedFloat(scores[i])), i));
        order.truncate(top_n);

        let labels: Vec<String> = order
            .into_iter()
            .filter_map(|i| vocabulary.label(i).map(str::to_string))
            .collect();
        trace!(?labels, "categorized text");
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::HashingEmbedder;

    fn vocab() -> Vocabulary {
        Vocabulary::new([
            "AI",
            "technology",
            "business",
            "healthcare",
            "sports",
            "culture",
            "arts",
        ])
        .unwrap()
    }

    #[test]
    fn test_label_list_passthrough() {
        let labels = LabelListCategorizer
            .categorize("arts, culture, unknown, sports", &vocab(), 3)
            .unwrap();
        assert_eq!(labels, vec!["arts", "culture", "unknown"]);
    }

    #[test]
    fn test_embedding_categorizer_returns_vocabulary_members() {
        let v = vocab();
        let c = EmbeddingCategorizer::new(HashingEmbedder::default());
        let labels = c.categorize("Sports medicine and healthcare", &v, 5).unwrap();
        assert_eq!(labels.len(), 5);
        assert!(labels.iter().all(|l| v.contains(l)));

        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn test_exact_label_ranks_first() {
        let c = EmbeddingCategorizer::with_vocabulary(HashingEmbedder::default(), &vocab()).unwrap();
        let labels = c.categorize("healthcare", &vocab(), 2).unwrap();
        assert_eq!(labels[0], "healthcare");
    }

    #[test]
    fn test_deterministic() {
        let c = EmbeddingCategorizer::new(HashingEmbedder::default());
        let a = c.categorize("the business of arts", &vocab(), 3).unwrap();
        let b = c.categorize("the business of arts", &vocab(), 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_top_n_larger_than_vocabulary() {
        let c = EmbeddingCategorizer::new(HashingEmbedder::default());
        let labels = c.categorize("anything", &vocab(), 50).unwrap();
        assert_eq!(labels.len(), vocab().len());
    }

    #[test]
    fn test_vocabulary_change_reembeds_labels() {
        let c = EmbeddingCategorizer::new(HashingEmbedder::default());
        c.categorize("culture", &vocab(), 1).unwrap();
        let other = Vocabulary::new(["wellness", "lifestyle"]).unwrap();
        let labels = c.categorize("wellness", &other, 1).unwrap();
        assert_eq!(labels, vec!["wellness"]);
    }

    #[test]
    fn test_works_through_arc() {
        let c: Arc<dyn Categorizer> = Arc::new(LabelListCategorizer);
        assert_eq!(c.categorize("AI", &vocab(), 5).unwrap(), vec!["AI"]);
    }
}
