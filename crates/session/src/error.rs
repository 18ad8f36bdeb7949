use thiserror::Error;

/// Errors that can occur when loading or saving session records.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The session backend could not be reached or rejected a command.
    #[error("Session backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// A session record could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, SessionStoreError>;
