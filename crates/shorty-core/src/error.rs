use thiserror::Error;

/// Result type for operations against the Shorty backend.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status and a readable error envelope.
    #[error("{message}")]
    Backend {
        status: u16,
        id: Option<String>,
        message: String,
    },
    /// The body did not match the result or error envelope.
    #[error("malformed response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Returns the HTTP status attached to the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } | ApiError::MalformedResponse { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(_) | ApiError::InvalidInput(_) => None,
        }
    }
}
