//! Ranking session
//!
//! Owns the pieces that stay fixed for a session (vocabulary, encoder,
//! categorizer) and the pieces rebuilt when the dataset changes (candidate
//! table and its index). The table and the index sit behind one lock so a
//! search always resolves rows against the table it was built from.

use crate::candidate::CandidateTable;
use crate::config::RankerConfig;
use crate::explain::{RankedCandidate, RankingReport};
use parking_lot::RwLock;
use speakerrank_categorize::Categorizer;
use speakerrank_core::{
    CorpusMatrix, Error, FlatL2Index, Neighbor, RankWeightedEncoder, Result, SimilarityIndex,
    Vector, Vocabulary,
};
use speakerrank_storage::{CorpusCache, CorpusKey};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct LoadedCorpus<I> {
    table: Arc<CandidateTable>,
    index: I,
}

/// Ranks a candidate table against free-text topics
pub struct RankingSession<C, I = FlatL2Index> {
    config: RankerConfig,
    encoder: RankWeightedEncoder,
    categorizer: C,
    cache: Option<CorpusCache>,
    corpus: RwLock<LoadedCorpus<I>>,
}

impl<C: Categorizer> RankingSession<C, FlatL2Index> {
    /// Session backed by an exact flat L2 index
    pub fn new(config: RankerConfig, categorizer: C) -> Result<Self> {
        let dim = config.vocabulary.len();
        Self::with_index(config, categorizer, FlatL2Index::new(dim))
    }
}

impl<C: Categorizer, I: SimilarityIndex> RankingSession<C, I> {
    /// Session backed by any index over `vocabulary.len()` dimensions.
    /// The session starts with an empty candidate table.
    pub fn with_index(config: RankerConfig, categorizer: C, index: I) -> Result<Self> {
        config.validate()?;
        let vocabulary = Arc::new(config.build_vocabulary()?);
        if index.dim() != vocabulary.len() {
            return Err(Error::DimensionMismatch {
                expected: vocabulary.len(),
                actual: index.dim(),
            });
        }

        let encoder = RankWeightedEncoder::new(vocabulary, config.top_n)?;
        let cache = match &config.cache_dir {
            Some(dir) => Some(CorpusCache::new(dir)?),
            None => None,
        };

        Ok(Self {
            config,
            encoder,
            categorizer,
            cache,
            corpus: RwLock::new(LoadedCorpus {
                table: Arc::new(CandidateTable::default()),
                index,
            }),
        })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.encoder.vocabulary()
    }

    pub fn encoder(&self) -> &RankWeightedEncoder {
        &self.encoder
    }

    pub fn categorizer(&self) -> &C {
        &self.categorizer
    }

    /// The currently indexed candidate table
    pub fn candidates(&self) -> Arc<CandidateTable> {
        self.corpus.read().table.clone()
    }

    pub fn candidate_count(&self) -> usize {
        self.corpus.read().index.len()
    }

    /// Encode every candidate's expertise ranking into the corpus matrix,
    /// going through the cache when one is configured
    pub fn build_corpus(&self, table: &CandidateTable) -> Result<CorpusMatrix> {
        let Some(cache) = &self.cache else {
            return Ok(CorpusMatrix::build_filtered(
                &self.encoder,
                &table.expertise_rankings(),
            ));
        };

        let key = CorpusKey::compute(
            self.vocabulary(),
            self.encoder.top_n(),
            table.iter().map(|c| c.expertise_topics.as_str()),
        );

        if let Some(matrix) = cache.load(&key)? {
            if matrix.len() == table.len() && matrix.dim() == self.encoder.dim() {
                return Ok(matrix);
            }
            warn!(%key, "cached corpus shape does not match candidate table, rebuilding");
        }

        let matrix = CorpusMatrix::build_filtered(&self.encoder, &table.expertise_rankings());
        if let Err(e) = cache.store(&key, &matrix) {
            warn!(error = %e, "failed to cache corpus matrix");
        }
        Ok(matrix)
    }

    /// Replace the candidate table and rebuild the index from it.
    ///
    /// On error the previous table and index stay in place.
    pub fn load(&self, table: CandidateTable) -> Result<()> {
        let matrix = self.build_corpus(&table)?;

        let mut corpus = self.corpus.write();
        corpus.index.build(matrix)?;
        corpus.table = Arc::new(table);

        info!(
            candidates = corpus.table.len(),
            dim = self.encoder.dim(),
            "ranking corpus loaded"
        );
        Ok(())
    }

    /// The topic's label ranking, as produced by the categorizer
    pub fn topic_labels(&self, topic: &str) -> Result<Vec<String>> {
        let labels = self
            .categorizer
            .categorize(topic, self.vocabulary(), self.encoder.top_n())?;
        debug!(topic, ?labels, "categorized topic");
        Ok(labels)
    }

    /// Normalized query vector for a label ranking. Every label must be a
    /// vocabulary member.
    pub fn query_vector<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vector> {
        Ok(self.encoder.encode_strict(labels)?.normalized())
    }

    /// The `k` candidates nearest to an already-ranked label list
    pub fn rank_labels<S: AsRef<str>>(&self, labels: &[S], k: usize) -> Result<Vec<Neighbor>> {
        let query = self.query_vector(labels)?;
        self.corpus.read().index.search(&query, k)
    }

    /// The `k` candidates nearest to a free-text topic, as
    /// `(row, distance)` pairs ascending by distance
    pub fn rank(&self, topic: &str, k: usize) -> Result<Vec<Neighbor>> {
        let labels = self.topic_labels(topic)?;
        self.rank_labels(&labels, k)
    }

    /// Rank and resolve rows into candidate records with explanations
    pub fn recommend(&self, topic: &str, k: usize) -> Result<RankingReport> {
        let labels = self.topic_labels(topic)?;
        let query = self.query_vector(&labels)?;

        let corpus = self.corpus.read();
        let hits = corpus.index.search(&query, k)?;

        let results = corpus
            .table
            .select(&hits)
            .into_iter()
            .map(|(hit, candidate)| {
                let row_vector = self
                    .encoder
                    .encode_filtered(&candidate.expertise_labels())
                    .normalized();
                RankedCandidate::new(hit, candidate.clone(), &query, &row_vector, self.vocabulary())
            })
            .collect();

        Ok(RankingReport {
            topic: topic.to_string(),
            topic_labels: labels,
            k,
            candidates_count: corpus.table.len(),
            results,
        })
    }
}
