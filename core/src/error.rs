use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not extract JSON from model response: {0}")]
    Extraction(String),

    // `text` is the repaired document that still failed to parse.
    #[error("failed to parse sanitized JSON: {reason}")]
    Sanitize { reason: String, text: String },

    #[error("invalid payload: {0}")]
    PayloadShape(String),

    #[error("template copy failed at {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
