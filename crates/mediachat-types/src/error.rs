use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by session and generation operations.
///
/// The transport layer maps each variant to a status code without
/// reinterpreting it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session not found")]
    NotFound,

    #[error("session belongs to another identity")]
    Forbidden,

    #[error("generation failed: {0}")]
    GenerationFailure(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<RepositoryError> for SessionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => SessionError::NotFound,
            other => SessionError::StorageError(other.to_string()),
        }
    }
}

impl From<GeneratorError> for SessionError {
    fn from(e: GeneratorError) -> Self {
        SessionError::GenerationFailure(e.to_string())
    }
}

/// Errors from a Generator backend.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator '{generator}' failed: {message}")]
    Failed { generator: String, message: String },

    #[error("generator timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from store operations (used by trait definitions in mediachat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to identities and API keys.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identity name: {0}")]
    InvalidName(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_session_not_found() {
        let err: SessionError = RepositoryError::NotFound.into();
        assert!(matches!(err, SessionError::NotFound));
    }

    #[test]
    fn test_repository_query_maps_to_storage_error() {
        let err: SessionError = RepositoryError::Query("disk I/O error".to_string()).into();
        match err {
            SessionError::StorageError(msg) => assert_eq!(msg, "query error: disk I/O error"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_generator_error_maps_to_generation_failure() {
        let err: SessionError = GeneratorError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(err.to_string(), "generation failed: generator timed out after 30s");
    }
}
