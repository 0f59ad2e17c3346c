//! Optional GET response cache.
//!
//! [`CachedClient`] wraps a [`HuntressClient`] cache-aside: a fresh entry is
//! served without touching the rate limiter or the network; a miss goes
//! through the full pipeline and is stored only after the body decodes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::time::Instant;

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::request::RequestOptions;
use crate::response::{decode, ApiResponse, ResponseMeta};

/// Default time-to-live for cached entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: Instant,
    meta: ResponseMeta,
    body: Bytes,
}

/// A [`HuntressClient`] decorated with a TTL cache for GET requests.
///
/// Entries are keyed by method and fully resolved URL, including query
/// parameters. Expired entries are dropped whenever a new one is stored.
/// Clones share the same cache.
#[derive(Debug, Clone)]
pub struct CachedClient {
    client: HuntressClient,
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl CachedClient {
    pub fn new(client: HuntressClient) -> Self {
        Self::with_ttl(client, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(client: HuntressClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The wrapped client, for uncached calls.
    pub fn inner(&self) -> &HuntressClient {
        &self.client
    }

    /// GET `path`, serving a fresh cached body when one exists.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>> {
        let key = self.key(path, options)?;

        if let Some(entry) = self.lookup(&key) {
            tracing::trace!(%key, "cache hit");
            return Ok(ApiResponse {
                data: decode(&entry.body)?,
                meta: entry.meta,
            });
        }

        let raw = self
            .client
            .execute_raw::<()>(ctx, Method::GET, path, None, options)
            .await?;
        let data = raw.decode()?;

        let now = Instant::now();
        let ttl = self.ttl;
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                meta: raw.meta.clone(),
                body: raw.body,
            },
        );
        drop(entries);

        Ok(ApiResponse {
            data,
            meta: raw.meta,
        })
    }

    /// Drop the cached entry for `path` with `options`' query.
    pub fn invalidate(&self, path: &str, options: &RequestOptions) -> Result<()> {
        let key = self.key(path, options)?;
        self.entries.lock().remove(&key);
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Drop expired entries.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .lock()
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(&self, path: &str, options: &RequestOptions) -> Result<String> {
        let url = self.client.resolve_url(path, options.query_params())?;
        Ok(format!("{} {url}", Method::GET))
    }

    fn lookup(&self, key: &str) -> Option<CacheEntry> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}
