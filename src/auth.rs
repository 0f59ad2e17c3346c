//! API credentials and Basic-Auth header construction.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;

use crate::error::{HuntressError, Result};

/// Huntress API key pair.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Create credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// The public half of the key pair.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// `Basic base64(key:secret)`, marked sensitive so it is redacted from
    /// `reqwest`'s debug output.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let encoded = STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| HuntressError::invalid_header("authorization", e))?;
        value.set_sensitive(true);
        Ok(value)
    }
}
