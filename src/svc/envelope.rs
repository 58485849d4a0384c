//! Uniform response envelope.
//!
//! Every call ends in exactly one [`OutboundResponse`]: a status code and a
//! JSON body. Success bodies hold the serialized backend value; error bodies
//! hold only a coarse kind, plus the message for locally detected errors.

use serde::{Deserialize, Serialize};

use crate::svc::error::{ApiError, ApiResult};

pub const STATUS_OK: u16 = 200;

/// Status code plus serialized JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// 200 with `value` serialized as JSON.
    pub fn success<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(Self {
            status_code: STATUS_OK,
            body: serde_json::to_string(value)?,
        })
    }

    /// Error envelope for `err`.
    pub fn failure(err: &ApiError) -> Self {
        let payload = if matches!(err, ApiError::Backend(_)) {
            serde_json::json!({ "error": err.kind() })
        } else {
            serde_json::json!({ "error": err.kind(), "message": err.to_string() })
        };
        Self {
            status_code: err.status_code(),
            body: payload.to_string(),
        }
    }

    /// Envelope for a finished call.
    pub fn from_result<T: Serialize>(result: ApiResult<T>) -> Self {
        match result.and_then(|value| Self::success(&value)) {
            Ok(response) => response,
            Err(err) => Self::failure(&err),
        }
    }
}
