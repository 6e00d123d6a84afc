//! # speakerrank Core
//!
//! Core library for ranking candidate profiles against a topic in a shared
//! category space.
//!
//! - [`Vocabulary`] - the fixed, ordered category set defining the space
//! - [`RankWeightedEncoder`] - label ranking to weighted category vector
//! - [`CorpusMatrix`] - stacked, row-normalized candidate vectors
//! - [`SimilarityIndex`] / [`FlatL2Index`] - exact nearest-neighbor search
//!
//! ## Example
//!
//! ```rust
//! use speakerrank_core::{CorpusMatrix, FlatL2Index, RankWeightedEncoder, SimilarityIndex, Vocabulary};
//! use std::sync::Arc;
//!
//! let vocab = Arc::new(Vocabulary::new(["A", "B", "C"]).unwrap());
//! let encoder = RankWeightedEncoder::new(vocab.clone(), 4).unwrap();
//!
//! let rankings = vec![vec!["A", "B"], vec!["C"], vec!["A", "C", "B"]];
//! let corpus = CorpusMatrix::build_filtered(&encoder, &rankings);
//!
//! let mut index = FlatL2Index::new(vocab.len());
//! index.build(corpus).unwrap();
//!
//! let query = encoder.encode_strict(&["B", "A"]).unwrap().normalized();
//! let hits = index.search(&query, 2).unwrap();
//! assert_eq!(hits[0].row, 0);
//! assert_eq!(hits[1].row, 2);
//! ```

pub mod encoder;
pub mod error;
pub mod index;
pub mod matrix;
pub mod vector;
pub mod vocabulary;

/// Vector kernels with an AVX2 fast path on x86_64
pub mod simd;

pub use encoder::{parse_label_list, RankWeightedEncoder, DEFAULT_TOP_N};
pub use error::{Error, Result};
pub use index::{FlatL2Index, Neighbor, SimilarityIndex};
pub use matrix::CorpusMatrix;
pub use vector::Vector;
pub use vocabulary::Vocabulary;
