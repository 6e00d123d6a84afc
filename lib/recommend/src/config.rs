//! Ranking configuration
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use speakerrank_categorize::DEFAULT_EMBEDDING_DIM;
use speakerrank_core::{Error, Result, Vocabulary, DEFAULT_TOP_N};
use std::path::{Path, PathBuf};

/// Category set used when no vocabulary is configured
pub const DEFAULT_CATEGORIES: [&str; 15] = [
    "AI",
    "technology",
    "innovation",
    "business",
    "leadership",
    "education",
    "science",
    "healthcare",
    "wellness",
    "arts",
    "culture",
    "sports",
    "entertainment",
    "social impact",
    "lifestyle",
];

pub const DEFAULT_K: usize = 5;

/// Configuration for a ranking session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Category labels in dimension order
    pub vocabulary: Vec<String>,
    /// Labels per ranking; the top label weighs `top_n`
    pub top_n: usize,
    /// Result count when a caller does not pass one
    pub default_k: usize,
    /// Bucket count of the hashing embedder
    pub embedding_dim: usize,
    /// Directory for cached corpus matrices, disabled when unset
    pub cache_dir: Option<PathBuf>,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            top_n: DEFAULT_TOP_N,
            default_k: DEFAULT_K,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            cache_dir: None,
        }
    }
}

impl RankerConfig {
    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: RankerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be positive".to_string()));
        }
        if self.default_k == 0 {
            return Err(Error::InvalidConfig("default_k must be positive".to_string()));
        }
        if self.embedding_dim == 0 {
            return Err(Error::InvalidConfig(
                "embedding_dim must be positive".to_string(),
            ));
        }
        self.build_vocabulary().map(|_| ())
    }

    pub fn build_vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(&self.vocabulary)
    }
}
