//! # speakerrank
//!
//! Ranks speaker profiles against a target topic.
//!
//! Both the topic and every candidate are reduced to a short ranking of
//! category labels, encoded as rank-weighted vectors over a fixed
//! vocabulary, normalized, and compared with an exact L2 nearest-neighbor
//! search. On unit vectors that order is the same as descending cosine
//! similarity.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! speakerrank preprocess --input profiles.json --output speakers.json
//! speakerrank rank --candidates speakers.json --topic "Storytelling and culture in the media" -k 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use speakerrank::prelude::*;
//!
//! let session = RankingSession::new(RankerConfig::default(), LabelListCategorizer).unwrap();
//! session.load(CandidateTable::new(vec![
//!     Candidate::new("Ada", "CTO", "AI, technology, innovation"),
//!     Candidate::new("Bo", "Curator", "arts, culture"),
//! ])).unwrap();
//!
//! let hits = session.rank("culture, arts", 1).unwrap();
//! assert_eq!(hits[0].row, 1);
//! ```
//!
//! ## Crate Structure
//!
//! - [`speakerrank-core`](speakerrank_core) - vocabulary, encoder, corpus matrix, similarity index
//! - [`speakerrank-categorize`](speakerrank_categorize) - text to label ranking
//! - [`speakerrank-storage`](speakerrank_storage) - corpus matrix cache
//! - [`speakerrank-recommend`](speakerrank_recommend) - candidates, preprocessing, ranking sessions

// Re-export core types
pub use speakerrank_core::{
    parse_label_list, CorpusMatrix, Error, FlatL2Index, Neighbor, RankWeightedEncoder, Result,
    SimilarityIndex, Vector, Vocabulary,
};

// Re-export categorizers
pub use speakerrank_categorize::{
    Categorizer, EmbeddingCategorizer, HashingEmbedder, LabelListCategorizer, TextEmbedder,
};

// Re-export storage
pub use speakerrank_storage::{CorpusCache, CorpusKey};

// Re-export recommendation
pub use speakerrank_recommend::{
    Candidate, CandidateTable, Preprocessor, RankedCandidate, RankerConfig, RankingReport,
    RankingSession, RawProfile,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Candidate, CandidateTable, Categorizer, CorpusMatrix, EmbeddingCategorizer, Error,
        FlatL2Index, HashingEmbedder, LabelListCategorizer, Neighbor, RankWeightedEncoder,
        RankerConfig, RankingReport, RankingSession, Result, SimilarityIndex, Vector, Vocabulary,
    };
}

/// Vector kernels
pub mod simd {
    pub use speakerrank_core::simd::{dot_product_simd, l2_distance_simd, l2_squared_simd, norm_simd};
}
