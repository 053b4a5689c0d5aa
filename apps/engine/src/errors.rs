use thiserror::Error;

/// Engine-level error type.
/// Scoring and recommendation are total functions and never produce one of
/// these; only the persistence layer and the export seams can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export unavailable: no {0} writer registered")]
    ExportUnavailable(&'static str),
}
