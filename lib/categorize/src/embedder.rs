//! Text embedders
//!
//! A [`TextEmbedder`] turns free text into a dense vector. The
//! [`HashingEmbedder`] needs no model: it hashes word tokens and character
//! trigrams into a fixed number of buckets, so texts sharing vocabulary land
//! close together.

use speakerrank_core::{Error, Result, Vector};
use std::hash::{BuildHasher, Hash, Hasher};

/// Default bucket count for [`HashingEmbedder`]
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

const HASH_SEEDS: [u64; 4] = [
    0x9e37_79b9_7f4a_7c15,
    0xbf58_476d_1ce4_e5b9,
    0x94d0_49bb_1331_11eb,
    0x2545_f491_4f6c_dd1d,
];

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Maps text to a dense vector
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vector>;

    /// Output dimension
    fn dim(&self) -> usize;
}

/// Deterministic feature-hashing embedder
///
/// Output vectors are unit length, or zero for text without any word
/// characters. Hash seeds are fixed, so a given build always produces the
/// same vector for the same text.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    state: ahash::RandomState,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimension must be positive".to_string(),
            ));
        }
        Ok(Self::with_dim(dim))
    }

    fn with_dim(dim: usize) -> Self {
        let [k0, k1, k2, k3] = HASH_SEEDS;
        Self {
            dim,
            state: ahash::RandomState::with_seeds(k0, k1, k2, k3),
        }
    }

    /// Bucket and sign for one feature
    fn slot<T: Hash + ?Sized>(&self, feature: &T) -> (usize, f32) {
        let mut hasher = self.state.build_hasher();
        feature.hash(&mut hasher);
        let h = hasher.finish();
        let bucket = (h % self.dim as u64) as usize;
        // top bit picks the sign so colliding features partly cancel
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::with_dim(DEFAULT_EMBEDDING_DIM)
    }
}

impl TextEmbedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vector> {
        let mut v = Vector::zeros(self.dim);
        let data = v.as_mut_slice();

        for token in Self::tokens(text) {
            let (bucket, sign) = self.slot(token.as_str());
            data[bucket] += sign * WORD_WEIGHT;

            let padded: Vec<char> = std::iter::once('^')
                .chain(token.chars())
                .chain(std::iter::once('$'))
                .collect();
            for gram in padded.windows(3) {
                let (bucket, sign) = self.slot(gram);
                data[bucket] += sign * TRIGRAM_WEIGHT;
            }
        }

        v.normalize();
        Ok(v)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
