// On-disk cache for corpus matrices.
// Entries are addressed by a SHA-256 digest of everything the matrix is derived from,
// so a changed candidate table or vocabulary simply misses.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use speakerrank_core::{CorpusMatrix, Error, Result, Vocabulary};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CACHE_FORMAT_VERSION: u32 = 1;

/// Content hash identifying one corpus matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusKey(String);

impl CorpusKey {
    /// Digest of the vocabulary, the ranking length and every candidate's
    /// expertise field, in row order
    pub fn compute<'a, I>(vocabulary: &Vocabulary, top_n: usize, expertise: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hasher = Sha256::new();
        hasher.update(CACHE_FORMAT_VERSION.to_le_bytes());
        hasher.update((top_n as u64).to_le_bytes());

        hasher.update((vocabulary.len() as u64).to_le_bytes());
        for label in vocabulary.iter() {
            update_field(&mut hasher, label);
        }

        let mut rows = 0u64;
        for text in expertise {
            update_field(&mut hasher, text);
            rows += 1;
        }
        hasher.update(rows.to_le_bytes());

        CorpusKey(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorpusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// length prefix keeps ("ab", "c") and ("a", "bc") apart
fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    version: u32,
    key: CorpusKey,
    matrix: CorpusMatrix,
}

/// Directory of cached corpus matrices, one JSON file per key
pub struct CorpusCache {
    cache_dir: PathBuf,
}

impl CorpusCache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, key: &CorpusKey) -> PathBuf {
        self.cache_dir.join(format!("corpus-{}.json", key.as_str()))
    }

    /// Cached matrix for `key`, if present and intact.
    ///
    /// Unreadable or inconsistent entries are logged and reported as a miss.
    pub fn load(&self, key: &CorpusKey) -> Result<Option<CorpusMatrix>> {
        let path = self.entry_path(key);
        if !path.exists() {
            debug!(%key, "corpus cache miss");
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable corpus cache entry");
                return Ok(None);
            }
        };

        if entry.version != CACHE_FORMAT_VERSION || entry.key != *key {
            warn!(path = %path.display(), "discarding stale corpus cache entry");
            return Ok(None);
        }
        if let Err(e) = entry.matrix.validate() {
            warn!(path = %path.display(), error = %e, "discarding corrupt corpus cache entry");
            return Ok(None);
        }

        debug!(%key, rows = entry.matrix.len(), "corpus cache hit");
        Ok(Some(entry.matrix))
    }

    /// Write `matrix` under `key`, replacing any previous entry atomically
    pub fn store(&self, key: &CorpusKey, matrix: &CorpusMatrix) -> Result<()> {
        let entry = CacheEntry {
            version: CACHE_FORMAT_VERSION,
            key: key.clone(),
            matrix: matrix.clone(),
        };
        let bytes = serde_json::to_vec(&entry)?;

        let path = self.entry_path(key);
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&bytes))
            .map_err(|e| Error::Storage(format!("writing {}: {}", path.display(), e)))?;

        debug!(%key, rows = matrix.len(), "corpus cache stored");
        Ok(())
    }

    /// Remove the entry for `key`. Returns whether one existed.
    pub fn remove(&self, key: &CorpusKey) -> Result<bool> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
