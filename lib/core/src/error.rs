use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown category: {label:?} is not in the vocabulary")]
    UnknownCategory { label: String },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid result count k={0}: k must be positive")]
    InvalidK(usize),

    #[error("Vocabulary must contain at least one category")]
    EmptyVocabulary,

    #[error("Category listed twice in vocabulary: {0}")]
    DuplicateCategory(String),

    #[error("Label {label:?} appears more than once in the ranking")]
    DuplicateLabel { label: String },

    #[error("Label ranking too long: {len} labels, at most {max} allowed")]
    RankingTooLong { len: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Categorizer error: {0}")]
    Categorizer(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
