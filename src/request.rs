//! Per-call request options.

use std::time::Duration;

use crate::query::{QueryParams, ToQuery};

/// Caller-supplied extras for a single request.
///
/// Headers and query parameters given here override the executor's
/// defaults on conflict.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: QueryParams,
    pub(crate) timeout: Option<Duration>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Repeating a name sends every value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Merge query parameters; later values override earlier ones by key.
    #[must_use]
    pub fn query(mut self, query: &impl ToQuery) -> Self {
        self.query = self.query.merged_with(&query.to_query());
        self
    }

    /// Add a single query parameter, replacing any earlier value for `key`.
    #[must_use]
    pub fn param(self, key: &str, value: impl std::fmt::Display) -> Self {
        let query = QueryParams::new().with(key, value);
        self.query(&query)
    }

    /// Per-attempt timeout overriding the client default.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }
}
