//! Backend-specific error definitions.

use thiserror::Error;

/// Errors returned by a backend call.
///
/// These travel through the translation layer unchanged; only the envelope
/// builder looks at them, to pick a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered and classified the failure itself.
    #[error("backend returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The request never produced a backend answer.
    #[error("backend transport error: {0}")]
    Transport(String),

    /// The backend answered with a payload we could not decode.
    #[error("backend response could not be decoded: {0}")]
    Decode(String),

    /// The call context deadline elapsed while waiting on the backend.
    #[error("backend call exceeded its deadline")]
    DeadlineExceeded,

    /// The call context was cancelled before the backend answered.
    #[error("backend call cancelled")]
    Cancelled,
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Status code a caller should see for this failure.
    ///
    /// Backend classifications in the 4xx/5xx range pass through as-is;
    /// anything else the backend reports becomes 502.
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Status { status, .. } if (400..=599).contains(status) => *status,
            BackendError::Status { .. } => 502,
            BackendError::Transport(_) | BackendError::Decode(_) => 502,
            BackendError::DeadlineExceeded => 504,
            BackendError::Cancelled => 503,
        }
    }
}
