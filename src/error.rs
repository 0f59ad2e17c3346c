//! Error types for Huntress API operations.

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::context::CancelReason;

/// Header carrying the vendor's request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest slice of a non-JSON error body kept in a synthetic message.
const MAX_BODY_PREVIEW: usize = 512;

/// Errors that can occur during Huntress API operations.
#[derive(Debug, Error)]
pub enum HuntressError {
    /// Configuration is missing or incomplete.
    #[error("Huntress configuration required: {0}")]
    ConfigMissing(String),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP transport error (DNS, connect, TLS, timeout) before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body did not match the expected shape.
    #[error("Failed to decode response at '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A request path resolved outside the configured API base URL.
    #[error("URL '{0}' is outside the configured API base")]
    ForeignUrl(String),

    /// A caller-supplied header could not be encoded.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The call's context was cancelled or its deadline passed.
    #[error("Request {0}")]
    Cancelled(CancelReason),
}

impl HuntressError {
    /// Whether the call ended because its context was cancelled or expired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Whether the call ended because its deadline passed.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::Cancelled(CancelReason::DeadlineExceeded))
    }

    /// HTTP status associated with the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Whether the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the API reported rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// The normalized API error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn invalid_header(name: &str, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A non-2xx response, normalized regardless of how the body was shaped.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Huntress API error ({status}): {message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Vendor error code, when the body carried one.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Extra structured detail from the body.
    pub details: Option<Value>,
    /// `X-Request-Id` header, or the body's `request_id`.
    pub request_id: Option<String>,
    /// Parsed `Retry-After`, if the server sent one.
    pub retry_after: Option<Duration>,
}

/// Vendor error body. Every field is optional; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
    #[serde(default)]
    details: Option<Value>,
    #[serde(default)]
    request_id: Option<String>,
}

impl ApiError {
    /// Build an error from the parts of a failed response.
    ///
    /// Never fails: a body that is not a JSON error envelope yields a
    /// synthetic message carrying the status and a preview of the body.
    pub fn from_response(status: u16, headers: &HeaderMap, body: &[u8]) -> Self {
        let header_request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let retry_after = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let envelope = match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value::<ErrorEnvelope>(value).ok(),
            _ => None,
        };

        let Some(envelope) = envelope else {
            return Self {
                status,
                code: None,
                message: synthetic_message(status, body),
                details: None,
                request_id: header_request_id,
                retry_after,
            };
        };

        let message = envelope
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| envelope.error.as_ref().and_then(value_text))
            .or_else(|| envelope.errors.as_ref().and_then(value_text))
            .unwrap_or_else(|| synthetic_message(status, &[]));

        Self {
            status,
            code: envelope.code.as_ref().and_then(value_text),
            message,
            details: envelope.details.or(envelope.errors),
            request_id: header_request_id.or(envelope.request_id),
            retry_after,
        }
    }

    /// Whether this status is one the default policy retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status, 429 | 500 | 502 | 503 | 504)
    }
}

/// Render a JSON scalar or a list of messages as text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        Value::Object(map) => map.get("message").and_then(value_text),
        _ => None,
    }
}

fn synthetic_message(status: u16, body: &[u8]) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status");
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return format!("HTTP {status} {reason}");
    }
    let preview: String = text.chars().take(MAX_BODY_PREVIEW).collect();
    format!("HTTP {status} {reason}: {preview}")
}

/// Result type alias for Huntress operations.
pub type Result<T> = core::result::Result<T, HuntressError>;
