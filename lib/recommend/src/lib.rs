//! # speakerrank Recommend
//!
//! Speaker recommendation on top of the ranking core.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ RawProfile  │────>│Preprocessor │────>│ Candidate   │
//! │  (scraped)  │     │(categorize) │     │   Table     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │ load
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Topic     │────>│  Ranking    │<────│ Corpus      │
//! │   (text)    │     │  Session    │     │ Matrix+Index│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │  Ranking    │
//!                     │  Report     │
//!                     └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use speakerrank_categorize::LabelListCategorizer;
//! use speakerrank_recommend::{Candidate, CandidateTable, RankerConfig, RankingSession};
//!
//! let config = RankerConfig::default();
//! let session = RankingSession::new(config, LabelListCategorizer).unwrap();
//! session.load(CandidateTable::new(vec![
//!     Candidate::new("Ada", "CTO", "AI, technology"),
//!     Candidate::new("Bo", "Coach", "sports, wellness"),
//! ])).unwrap();
//!
//! let report = session.recommend("technology, AI", 1).unwrap();
//! assert_eq!(report.names(), vec!["Ada"]);
//! ```

pub mod candidate;
pub mod config;
pub mod explain;
pub mod preprocess;
pub mod session;

pub use candidate::{Candidate, CandidateTable};
pub use config::{RankerConfig, DEFAULT_CATEGORIES, DEFAULT_K};
pub use explain::{RankedCandidate, RankingReport};
pub use preprocess::{Preprocessor, RawProfile};
pub use session::RankingSession;
