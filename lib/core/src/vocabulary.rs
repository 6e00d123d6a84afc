//! Category vocabulary
//!
//! The ordered label set that defines the category space. Position `i` in
//! the vocabulary is dimension `i` of every category vector built from it.

use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::hash::{BuildHasher, Hash, Hasher};

/// Fixed, ordered set of distinct category labels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    labels: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl Vocabulary {
    /// Create a vocabulary from labels in dimension order.
    ///
    /// Labels are trimmed. An empty list or a repeated label is rejected.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .collect();

        if labels.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut positions = AHashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if positions.insert(label.clone(), i).is_some() {
                return Err(Error::DuplicateCategory(label.clone()));
            }
        }

        Ok(Self { labels, positions })
    }

    /// Dimension of the category space
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    #[inline]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// In-process identity of the label sequence.
    /// Not stable across builds; persisted keys hash the labels directly.
    pub fn fingerprint(&self) -> u64 {
        let state = ahash::RandomState::with_seeds(
            0x5eed_0001,
            0x5eed_0002,
            0x5eed_0003,
            0x5eed_0004,
        );
        let mut hasher = state.build_hasher();
        self.labels.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Vocabulary {}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = Error;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Vocabulary::new(labels)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_input_order() {
        let vocab = Vocabulary::new(["AI", "business", " arts "]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("AI"), Some(0));
        assert_eq!(vocab.index_of("arts"), Some(2));
        assert_eq!(vocab.index_of("sports"), None);
        assert_eq!(vocab.label(1), Some("business"));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let labels: Vec<String> = Vec::new();
        assert!(matches!(Vocabulary::new(labels), Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = Vocabulary::new(["AI", "arts", "AI"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateCategory(ref l) if l == "AI"));
    }

    #[test]
    fn test_fingerprint_depends_on_order() {
        let a = Vocabulary::new(["A", "B"]).unwrap();
        let b = Vocabulary::new(["B", "A"]).unwrap();
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let vocab = Vocabulary::new(["A", "B"]).unwrap();
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["A","B"]"#);
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
        assert!(serde_json::from_str::<Vocabulary>(r#"["A","A"]"#).is_err());
    }
}
