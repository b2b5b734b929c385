//! Error types.
//!
//! Only persistence can fail at runtime. Illegal card references are
//! integration bugs and panic instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("save I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode save: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("could not parse save: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("save is inconsistent: {0}")]
    Invalid(String),

    #[error("could not determine a data directory for saves")]
    NoSaveDirectory,
}

impl PersistenceError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::Invalid(detail.into())
    }
}
