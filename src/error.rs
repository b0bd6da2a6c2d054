/// Errors raised while preparing data, exporting, or loading an exported model
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An item names a category that the corpus does not declare
    #[error("item {text:?} has undeclared category {category:?}")]
    UnknownCategory {
        /// The item text
        text: String,
        /// The offending category
        category: String,
    },

    /// A class has too few examples to appear in both splits
    #[error("class {label:?} has {count} example(s), at least 2 are required for a stratified split")]
    TooFewExamples {
        /// The class label
        label: String,
        /// The number of examples found
        count: usize,
    },

    /// The validation fraction must lie strictly between 0 and 1
    #[error("validation fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),

    /// The metadata sidecar was written by an unknown format version
    #[error("unsupported metadata version {0:?}")]
    UnsupportedVersion(String),

    /// The vocabulary in the sidecar breaks the reserved or contiguous index layout
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// The model shape in the sidecar disagrees with its vocabulary or labels
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The sidecar and the model artifact come from different exports
    #[error("fingerprint mismatch: sidecar expects {expected}, artifact is {actual}")]
    FingerprintMismatch {
        /// The fingerprint stored in the sidecar
        expected: String,
        /// The fingerprint of the artifact on disk
        actual: String,
    },

    /// File system failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Burn record failure
    #[error("record error: {0}")]
    Record(String),
}

/// Result alias for the library
pub type Result<T> = std::result::Result<T, Error>;
