//! Candidate table
//!
//! Positionally ordered speaker records. Row `i` of the table is row `i` of
//! the corpus matrix built from it, so the table is never reordered once
//! loaded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use speakerrank_core::{parse_label_list, Neighbor, Result};
use std::fs;
use std::path::Path;

/// One speaker profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Comma-delimited label ranking, most relevant first
    #[serde(default)]
    pub expertise_topics: String,
    /// Any other fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, title: impl Into<String>, expertise_topics: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            expertise_topics: expertise_topics.into(),
            extra: Map::new(),
        }
    }

    /// The expertise field split into labels
    pub fn expertise_labels(&self) -> Vec<String> {
        parse_label_list(&self.expertise_topics)
    }
}

/// Ordered collection of candidates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateTable {
    rows: Vec<Candidate>,
}

impl CandidateTable {
    pub fn new(rows: Vec<Candidate>) -> Self {
        Self { rows }
    }

    /// Read a JSON array of candidate records
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&Candidate> {
        self.rows.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Candidate] {
        &self.rows
    }

    /// Every candidate's label ranking, in row order
    pub fn expertise_rankings(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(Candidate::expertise_labels).collect()
    }

    /// Resolve search hits back into records, keeping hit order.
    /// Hits pointing past the end of the table are skipped.
    pub fn select<'a>(&'a self, hits: &[Neighbor]) -> Vec<(Neighbor, &'a Candidate)> {
        hits.iter()
            .filter_map(|hit| self.rows.get(hit.row).map(|c| (*hit, c)))
            .collect()
    }
}

impl FromIterator<Candidate> for CandidateTable {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CandidateTable {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let json = r#"[{"name": "Ada", "title": "CTO", "expertise_topics": "AI, technology", "linkedinUrl": "https://example.com/ada"}]"#;
        let table: CandidateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 1);
        let ada = table.get(0).unwrap();
        assert_eq!(ada.expertise_labels(), vec!["AI", "technology"]);
        assert_eq!(ada.extra["linkedinUrl"], "https://example.com/ada");

        let back = serde_json::to_value(&table).unwrap();
        assert_eq!(back[0]["linkedinUrl"], "https://example.com/ada");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let table: CandidateTable = serde_json::from_str(r#"[{"name": "Bo"}]"#).unwrap();
        assert!(table.get(0).unwrap().expertise_labels().is_empty());
    }

    #[test]
    fn test_select_keeps_hit_order() {
        let table: CandidateTable = vec![
            Candidate::new("a", "", "AI"),
            Candidate::new("b", "", "arts"),
            Candidate::new("c", "", "sports"),
        ]
        .into_iter()
        .collect();
        let hits = [
            Neighbor { row: 2, distance: 0.1 },
            Neighbor { row: 0, distance: 0.4 },
            Neighbor { row: 9, distance: 0.9 },
        ];
        let names: Vec<&str> = table
            .select(&hits)
            .into_iter()
            .map(|(_, c)| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speakers.json");
        let table = CandidateTable::new(vec![Candidate::new("a", "Dean", "education, science")]);
        table.to_json_file(&path).unwrap();
        assert_eq!(CandidateTable::from_json_file(&path).unwrap(), table);
    }
}
