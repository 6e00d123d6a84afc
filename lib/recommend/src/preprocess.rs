//! Profile preprocessing
//!
//! Turns scraped profiles into candidate rows: a display name, the title,
//! and the profile text reduced to a ranked label list by a categorizer.

use crate::candidate::{Candidate, CandidateTable};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use speakerrank_categorize::Categorizer;
use speakerrank_core::{Result, Vocabulary};
use std::sync::Arc;
use tracing::{debug, info};

/// A profile as collected, before categorization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub background: String,
    pub experience: String,
    pub keywords: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Title, background, experience and keywords as one text blob
    pub fn expertise_text(&self) -> String {
        [
            self.title.as_str(),
            self.background.as_str(),
            self.experience.as_str(),
            self.keywords.as_str(),
        ]
        .join(" ")
    }

    /// Every field, extra columns included, as one comparable string.
    /// Extra keys serialize in sorted order.
    fn identity(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds a candidate table from raw profiles
pub struct Preprocessor<C> {
    categorizer: C,
    vocabulary: Arc<Vocabulary>,
    top_n: usize,
}

impl<C: Categorizer> Preprocessor<C> {
    pub fn new(categorizer: C, vocabulary: Arc<Vocabulary>, top_n: usize) -> Self {
        Self {
            categorizer,
            vocabulary,
            top_n,
        }
    }

    /// Categorize one profile into a candidate row
    pub fn candidate(&self, profile: &RawProfile) -> Result<Candidate> {
        let labels = self
            .categorizer
            .categorize(&profile.expertise_text(), &self.vocabulary, self.top_n)?;

        Ok(Candidate {
            name: profile.full_name(),
            title: profile.title.clone(),
            expertise_topics: labels.join(","),
            extra: Map::new(),
        })
    }

    /// Drop profiles equal in every field (first occurrence kept) and categorize
    /// the rest, preserving input order
    pub fn run(&self, profiles: &[RawProfile]) -> Result<CandidateTable> {
        let mut seen = AHashSet::with_capacity(profiles.len());
        let mut rows = Vec::with_capacity(profiles.len());

        for profile in profiles {
            if !seen.insert(profile.identity()?) {
                debug!(name = %profile.full_name(), "skipping duplicate profile");
                continue;
            }
            rows.push(self.candidate(profile)?);
        }

        info!(
            input = profiles.len(),
            candidates = rows.len(),
            "preprocessed profiles"
        );
        Ok(CandidateTable::new(rows))
    }
}
