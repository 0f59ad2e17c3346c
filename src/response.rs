//! Response metadata and body decoding.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{HuntressError, Result, REQUEST_ID_HEADER};
use crate::pagination::Pagination;

/// What the executor learned about a successful response besides its body.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// `X-Request-Id`, when present.
    pub request_id: Option<String>,
    /// Pagination derived from headers.
    pub pagination: Pagination,
}

impl ResponseMeta {
    pub(crate) fn new(status: u16, headers: HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let pagination = Pagination::from_headers(&headers);
        Self {
            status,
            headers,
            request_id,
            pagination,
        }
    }
}

/// A decoded response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Discard metadata and keep the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// An undecoded successful response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub meta: ResponseMeta,
    pub body: Bytes,
}

impl RawResponse {
    /// Decode the body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.body)
    }

    pub(crate) fn into_api_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        let data = self.decode()?;
        Ok(ApiResponse {
            data,
            meta: self.meta,
        })
    }
}

/// Decode JSON, reporting the path of the first mismatch.
///
/// An empty body decodes as `null`, so `()` and `Option<_>` targets accept
/// `204 No Content`.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    let de = &mut serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize(de).map_err(|err| HuntressError::Decode {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

/// Decode an already-parsed JSON value.
pub(crate) fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| HuntressError::Decode {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}
