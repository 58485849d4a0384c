//! Inbound request parsing.
//!
//! # Responsibilities
//! - Split the URL query string into the `query` parameter group
//! - Decode a form-urlencoded body into the `body` parameter group
//! - Reject bodies of any other media type
//!
//! # Design Decisions
//! - Empty bodies are accepted regardless of content type
//! - Body size is bounded by the router's `DefaultBodyLimit`

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::svc::params::{InboundRequest, ParamGroup};

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Why an inbound request could not be turned into parameter groups.
#[derive(Debug)]
pub enum InboundRejection {
    /// Non-empty body with a media type other than form-urlencoded.
    UnsupportedMediaType(Option<String>),
    /// Body could not be read (too large, aborted, ...).
    Body(axum::extract::rejection::BytesRejection),
}

impl IntoResponse for InboundRejection {
    fn into_response(self) -> Response {
        match self {
            InboundRejection::UnsupportedMediaType(media_type) => {
                let message = match media_type {
                    Some(mt) => format!("unsupported media type '{}'", mt),
                    None => "missing content type for request body".to_string(),
                };
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    Json(serde_json::json!({
                        "error": "unsupported_media_type",
                        "message": message,
                    })),
                )
                    .into_response()
            }
            InboundRejection::Body(rejection) => rejection.into_response(),
        }
    }
}

/// Parse `application/x-www-form-urlencoded` bytes into a parameter group.
pub fn parse_form(input: &[u8]) -> ParamGroup {
    url::form_urlencoded::parse(input).into_owned().collect()
}

fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next().unwrap_or_default();
    Some(essence.trim().to_ascii_lowercase())
}

impl<S> FromRequest<S> for InboundRequest
where
    S: Send + Sync,
{
    type Rejection = InboundRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req
            .uri()
            .query()
            .map(|q| parse_form(q.as_bytes()))
            .unwrap_or_default();
        let media_type = media_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(InboundRejection::Body)?;

        if bytes.is_empty() {
            return Ok(InboundRequest::new(query, ParamGroup::new()));
        }

        match media_type.as_deref() {
            Some(FORM_URLENCODED) => Ok(InboundRequest::new(query, parse_form(&bytes))),
            _ => Err(InboundRejection::UnsupportedMediaType(media_type)),
        }
    }
}
