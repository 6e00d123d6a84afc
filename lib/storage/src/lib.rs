//! # speakerrank Storage
//!
//! Persistence for derived ranking state. The corpus matrix is fully
//! reproducible from the candidate table and vocabulary; [`CorpusCache`]
//! only saves recomputing it across runs.

pub mod cache;

pub use cache::{CorpusCache, CorpusKey};
