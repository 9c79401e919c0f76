//! Errors raised while loading form documents.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid form JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
    #[error("More than one field has role {0}")]
    DuplicateRole(String),
    #[error("Form '{0}' has no fields")]
    Empty(String),
}
