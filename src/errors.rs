//! Shared error types.

use std::path::PathBuf;
use thiserror::Error;

/// Catalogue load failures. Fatal to startup; never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalogue is empty")]
    Empty,
}

/// Malformed or incompatible session document. Structural failures abort
/// the entire import; per-entry anomalies are filtered instead (see
/// `session::SessionImport::dropped`).
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("session document is not a JSON object")]
    NotAnObject,

    #[error("not a recognized session document (kind {found:?})")]
    WrongKind { found: String },

    #[error("unsupported session version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: u32 },

    #[error("session document has no answers map")]
    MissingAnswers,

    #[error("failed to parse session document: {0}")]
    Parse(#[from] serde_json::Error),
}
