use thiserror::Error;

/// Errors from talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response or the body could not be read.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// backend's own message when it sent one, or `"Request failed"`.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
