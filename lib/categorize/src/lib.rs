//! # speakerrank Categorize
//!
//! Reduces free text to a ranked list of category labels.
//!
//! The ranking engine treats categorization as an external step: anything
//! implementing [`Categorizer`] can feed it. Two implementations ship here:
//!
//! - [`LabelListCategorizer`] - the text already is a comma-delimited ranking
//! - [`EmbeddingCategorizer`] - cosine similarity between a text embedding
//!   and each label's embedding, using any [`TextEmbedder`]
//!
//! ## Example
//!
//! ```rust
//! use speakerrank_categorize::{Categorizer, EmbeddingCategorizer, HashingEmbedder};
//! use speakerrank_core::Vocabulary;
//!
//! let vocab = Vocabulary::new(["sports", "arts", "healthcare"]).unwrap();
//! let categorizer = EmbeddingCategorizer::new(HashingEmbedder::default());
//! let labels = categorizer.categorize("healthcare", &vocab, 2).unwrap();
//! assert_eq!(labels[0], "healthcare");
//! ```

pub mod categorizer;
pub mod embedder;

pub use categorizer::{Categorizer, EmbeddingCategorizer, LabelListCategorizer};
pub use embedder::{HashingEmbedder, TextEmbedder, DEFAULT_EMBEDDING_DIM};
