use thiserror::Error;


#[derive(Error, Debug)]
pub enum YueziError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Word vector error: {0}")]
    WordVectors(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}


pub type Result<T> = std::result::Result<T, YueziError>;


/// Why an optional enhancement produced nothing for a request.
///
/// Every optional-feature accessor returns `Result<_, DegradedReason>`; the
/// orchestrator turns an `Err` into the degraded path and records it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    #[error("model not loaded")]
    ModelAbsent,

    #[error("term not in vocabulary: {0}")]
    OutOfVocabulary(String),

    #[error("model failed to load: {0}")]
    LoadFailed(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("model returned no usable output")]
    EmptyOutput,
}

impl DegradedReason {
    pub fn inference(err: impl std::fmt::Display) -> Self {
        Self::InferenceFailed(err.to_string())
    }

    /// Absent models are reported at startup; everything else is worth a warning per request.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ModelAbsent | Self::OutOfVocabulary(_))
    }
}
