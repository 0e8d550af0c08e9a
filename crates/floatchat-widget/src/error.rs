#![forbid(unsafe_code)]

//! Error taxonomy. Geometry and rendering are total functions; errors only
//! arise at the edges (network, storage), and none of them are fatal to the
//! widget.

use thiserror::Error;

/// Failures in the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Backend(String),

    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode value for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures surfaced to the conversation.
///
/// A `Connection` error flips the connectivity indicator and produces the
/// fixed offline message; everything else degrades to the generic error
/// message. The conversation always continues.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("could not reach the chat server: {0}")]
    Connection(String),

    #[error("the server could not process the request: {0}")]
    Processing(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ChatError {
    /// Whether this error indicates the server is unreachable.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatError, StorageError};

    #[test]
    fn connection_classification() {
        assert!(ChatError::Connection("refused".into()).is_connection());
        assert!(!ChatError::Processing("500".into()).is_connection());
    }

    #[test]
    fn storage_error_converts() {
        let err: ChatError = StorageError::Backend("quota".into()).into();
        assert!(!err.is_connection());
    }
}
