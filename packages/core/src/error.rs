//! Engine error definitions

use std::path::PathBuf;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations
///
/// Startup errors (`ArtifactRead`, `ArtifactDecode`, `InvalidArtifact`) are fatal:
/// the engine never reaches the ready state and the embedding process is expected
/// to abort. Record errors are returned to the caller per prediction, untranslated.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to read model artifact at {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode model artifact: {0}")]
    ArtifactDecode(String),

    #[error("Failed to encode model artifact: {0}")]
    ArtifactEncode(String),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Record is missing feature `{0}`")]
    MissingFeature(String),

    #[error("Feature `{0}` is not a number")]
    NonNumericFeature(String),

    #[error("Failed to shape record into a model row: {0}")]
    RecordShape(String),

    #[error("Model returned an empty prediction")]
    EmptyPrediction,

    #[error("Inference engine is not initialized")]
    Uninitialized,
}
