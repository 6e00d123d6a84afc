// Integration tests for speakerrank
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use speakerrank_categorize::{EmbeddingCategorizer, HashingEmbedder, LabelListCategorizer};
use speakerrank_core::{
    CorpusMatrix, Error, FlatL2Index, RankWeightedEncoder, SimilarityIndex, Vector, Vocabulary,
};
use speakerrank_recommend::{
    Candidate, CandidateTable, Preprocessor, RankerConfig, RankingSession, RawProfile,
};
use std::sync::Arc;
use std::thread;

fn abc_config() -> RankerConfig {
    RankerConfig {
        vocabulary: vec!["A".into(), "B".into(), "C".into()],
        top_n: 4,
        ..Default::default()
    }
}

fn abc_table() -> CandidateTable {
    CandidateTable::new(vec![
        Candidate::new("first", "Engineer", "A, B"),
        Candidate::new("second", "Curator", "C"),
        Candidate::new("third", "Founder", "A, C, B"),
    ])
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
    }
}

#[test]
fn test_end_to_end_scenario() {
    let vocab = Arc::new(Vocabulary::new(["A", "B", "C"]).unwrap());
    let encoder = RankWeightedEncoder::new(vocab, 4).unwrap();

    let rankings = vec![vec!["A", "B"], vec!["C"], vec!["A", "C", "B"]];
    let corpus = CorpusMatrix::build_filtered(&encoder, &rankings);

    let expected = [
        Vector::new(vec![4.0, 3.0, 0.0]).normalized(),
        Vector::new(vec![0.0, 0.0, 4.0]).normalized(),
        Vector::new(vec![4.0, 2.0, 3.0]).normalized(),
    ];
    for (row, want) in corpus.rows().zip(&expected) {
        assert_close(row, want.as_slice());
    }

    let query = encoder.encode_strict(&["B", "A"]).unwrap().normalized();
    assert_close(query.as_slice(), Vector::new(vec![3.0, 4.0, 0.0]).normalized().as_slice());

    let mut index = FlatL2Index::new(3);
    index.build(corpus).unwrap();

    let hits = index.search(&query, 2).unwrap();
    let rows: Vec<usize> = hits.iter().map(|h| h.row).collect();
    assert_eq!(rows, vec![0, 2]);

    let all = index.search(&query, 3).unwrap();
    assert_eq!(all[2].row, 1);
}

#[test]
fn test_session_matches_scenario() {
    let session = RankingSession::new(abc_config(), LabelListCategorizer).unwrap();
    session.load(abc_table()).unwrap();

    let report = session.recommend("B, A", 2).unwrap();
    assert_eq!(report.names(), vec!["first", "third"]);
    assert!(report.results[0].similarity > report.results[1].similarity);
}

#[test]
fn test_k_larger_than_corpus_returns_every_row() {
    let session = RankingSession::new(abc_config(), LabelListCategorizer).unwrap();
    session.load(abc_table()).unwrap();

    let hits = session.rank("C", 10).unwrap();
    assert_eq!(hits.len(), 3);
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_empty_corpus_returns_empty() {
    let mut index = FlatL2Index::new(3);
    index.build(CorpusMatrix::new(3)).unwrap();

    let query = Vector::new(vec![1.0, 0.0, 0.0]);
    for k in [1, 5, 100] {
        assert!(index.search(&query, k).unwrap().is_empty());
    }
}

#[test]
fn test_invalid_k_and_dimension_rejected() {
    let vocab = Arc::new(Vocabulary::new(["A", "B", "C"]).unwrap());
    let encoder = RankWeightedEncoder::new(vocab, 4).unwrap();
    let index = FlatL2Index::from_corpus(CorpusMatrix::build_filtered(&encoder, &[vec!["A"]])).unwrap();

    let query = Vector::new(vec![1.0, 0.0, 0.0]);
    assert!(matches!(index.search(&query, 0), Err(Error::InvalidK(0))));

    let short = Vector::new(vec![1.0, 0.0]);
    assert!(matches!(
        index.search(&short, 1),
        Err(Error::DimensionMismatch { expected: 3, actual: 2 })
    ));
}

#[test]
fn test_unknown_category_leaves_session_untouched() {
    let session = RankingSession::new(abc_config(), LabelListCategorizer).unwrap();
    session.load(abc_table()).unwrap();
    let before = session.rank("B, A", 3).unwrap();

    let err = session.rank("A, Unknown", 3).unwrap_err();
    assert!(matches!(err, Error::UnknownCategory { ref label } if label == "Unknown"));

    assert_eq!(session.candidate_count(), 3);
    assert_eq!(session.rank("B, A", 3).unwrap(), before);
}

#[test]
fn test_encoder_weights_follow_rank() {
    let labels: Vec<String> = (0..10).map(|i| format!("L{i}")).collect();
    let vocab = Arc::new(Vocabulary::new(labels.clone()).unwrap());
    let encoder = RankWeightedEncoder::new(vocab.clone(), 5).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let m = rng.random_range(0..=5);
        let mut pool = labels.clone();
        pool.shuffle(&mut rng);
        let ranking = &pool[..m];

        let v = encoder.encode_strict(ranking).unwrap();
        assert_eq!(v.nnz(), m);
        for (i, label) in ranking.iter().enumerate() {
            let pos = vocab.index_of(label).unwrap();
            assert_eq!(v.as_slice()[pos], (5 - i) as f32);
        }

        let unit = v.normalized();
        if m == 0 {
            assert!(unit.is_zero());
        } else {
            assert!((unit.norm() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn test_search_order_matches_cosine_order() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let dim = rng.random_range(2..16);
        let rows = rng.random_range(1..64);

        let vectors: Vec<Vector> = (0..rows)
            .map(|_| {
                let data = (0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect::<Vec<_>>();
                Vector::new(data).normalized()
            })
            .collect();
        let query = Vector::new((0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect()).normalized();

        let corpus = CorpusMatrix::from_vectors(dim, vectors.iter().cloned()).unwrap();
        let index = FlatL2Index::from_corpus(corpus).unwrap();
        let hits = index.search(&query, rows).unwrap();
        assert_eq!(hits.len(), rows);

        let cosines: Vec<f32> = hits
            .iter()
            .map(|h| query.cosine_similarity(&vectors[h.row]))
            .collect();
        for pair in cosines.windows(2) {
            assert!(pair[0] + 1e-5 >= pair[1], "cosine order broken: {cosines:?}");
        }
        for (hit, cos) in hits.iter().zip(&cosines) {
            assert!((hit.cosine_similarity() - cos).abs() < 1e-4);
        }
    }
}

#[test]
fn test_concurrent_searches_agree() {
    let session = Arc::new(RankingSession::new(abc_config(), LabelListCategorizer).unwrap());
    session.load(abc_table()).unwrap();
    let expected = session.rank("B, A", 3).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = session.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|_| session.rank("B, A", 3).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for hits in handle.join().unwrap() {
            assert_eq!(hits, expected);
        }
    }
}

#[test]
fn test_cached_corpus_gives_same_ranking() {
    let dir = tempfile::tempdir().unwrap();
    let config = RankerConfig {
        cache_dir: Some(dir.path().join("cache")),
        ..abc_config()
    };

    let cold = RankingSession::new(config.clone(), LabelListCategorizer).unwrap();
    cold.load(abc_table()).unwrap();
    let cold_hits = cold.rank("B, A", 3).unwrap();

    let warm = RankingSession::new(config, LabelListCategorizer).unwrap();
    warm.load(abc_table()).unwrap();
    assert_eq!(warm.rank("B, A", 3).unwrap(), cold_hits);
}

#[test]
fn test_preprocess_then_rank() {
    let config = RankerConfig::default();
    let vocabulary = Arc::new(config.build_vocabulary().unwrap());
    let categorizer = Arc::new(
        EmbeddingCategorizer::with_vocabulary(HashingEmbedder::default(), &vocabulary).unwrap(),
    );

    let profile = |first: &str, keywords: &str| RawProfile {
        first_name: first.to_string(),
        last_name: "Speaker".to_string(),
        keywords: keywords.to_string(),
        ..Default::default()
    };
    let profiles = vec![
        profile("Sam", "healthcare"),
        profile("Kai", "sports"),
        profile("Sam", "healthcare"),
    ];

    let preprocessor = Preprocessor::new(categorizer.clone(), vocabulary, config.top_n);
    let table = preprocessor.run(&profiles).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|c| c.expertise_labels().len() == config.top_n));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speakers.json");
    table.to_json_file(&path).unwrap();
    let table = CandidateTable::from_json_file(&path).unwrap();

    let session = RankingSession::new(config, categorizer).unwrap();
    session.load(table).unwrap();

    let report = session.recommend("sports", 1).unwrap();
    assert_eq!(report.topic_labels[0], "sports");
    assert_eq!(report.names(), vec!["Kai Speaker"]);
}
