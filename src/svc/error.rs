//! Translation-layer error taxonomy.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors that abort a single call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was absent from its group.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A present parameter could not be coerced to its required type.
    #[error("field `{field}` has invalid value {value:?}: {reason}")]
    InvalidFormat {
        field: String,
        value: String,
        reason: String,
    },

    /// A discriminator value with no recognized handling.
    #[error("unsupported svc_type {0:?}")]
    UnsupportedType(String),

    /// The backend call failed; carried unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The call context was cancelled before any work started.
    #[error("call cancelled")]
    Cancelled,

    /// A successful result could not be serialized.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for translation-layer operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// True for failures detected locally while validating input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApiError::MissingField { .. } | ApiError::InvalidFormat { .. } | ApiError::UnsupportedType(_)
        )
    }

    /// Short machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingField { .. } => "missing_field",
            ApiError::InvalidFormat { .. } => "invalid_format",
            ApiError::UnsupportedType(_) => "unsupported_type",
            ApiError::Backend(_) => "backend_failure",
            ApiError::Cancelled => "cancelled",
            ApiError::Encode(_) => "encode_failure",
        }
    }

    /// Status code for the response envelope. Never 200.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingField { .. } | ApiError::InvalidFormat { .. } | ApiError::UnsupportedType(_) => 400,
            ApiError::Backend(e) => e.status_code(),
            ApiError::Cancelled => 503,
            ApiError::Encode(_) => 500,
        }
    }
}
