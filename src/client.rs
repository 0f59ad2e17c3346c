//! Huntress API client.
//!
//! Every API call funnels through [`HuntressClient::execute_raw`], which
//! authenticates the request, waits for a rate-limit token, runs the round
//! trip under the retry policy, and normalizes non-2xx responses into
//! [`ApiError`]. Higher-level operations are implemented via traits on
//! entity types.

use std::sync::Arc;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::{ApiError, HuntressError, Result};
use crate::logger::Logger;
use crate::query::QueryParams;
use crate::rate_limit::RateLimiter;
use crate::request::RequestOptions;
use crate::response::{ApiResponse, RawResponse, ResponseMeta};
use crate::retry::{Retrier, RetryPolicy};

const JSON: &str = "application/json";

/// Huntress API client.
///
/// Handles authentication, rate limiting, retries and error normalization.
/// Entity-specific operations are implemented via the `Get` and `List`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the rate limiter.
///
/// # Example
///
/// ```no_run
/// use huntress::{Context, HuntressClient, RequestOptions};
///
/// # async fn example() -> huntress::Result<()> {
/// // Create from environment variables
/// let client = HuntressClient::from_env()?;
///
/// // Or configure manually
/// let client = HuntressClient::new("api-key", "api-secret", "https://api.huntress.io/v1")?;
///
/// let ctx = Context::background();
/// let account: serde_json::Value = client
///     .get(&ctx, "account", &RequestOptions::default())
///     .await?
///     .into_data();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HuntressClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Option<Arc<Credentials>>,
    user_agent: HeaderValue,
    limiter: Option<Arc<RateLimiter>>,
    retrier: Retrier,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for HuntressClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuntressClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl HuntressClient {
    /// Create a client from environment variables.
    ///
    /// Uses `HUNTRESS_API_KEY` and `HUNTRESS_API_SECRET` for authentication
    /// and optionally `HUNTRESS_API_URL` for the base URL (defaults to
    /// `https://api.huntress.io/v1/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the key or secret is not set.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env()?.build()
    }

    /// Create a client with default retry and rate-limit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, api_secret: &str, base_url: &str) -> Result<Self> {
        ClientConfig::new()
            .credentials(api_key, api_secret)
            .base_url(base_url)
            .build()
    }

    /// Start building a client.
    pub fn builder() -> ClientConfig {
        ClientConfig::new()
    }

    /// Create a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or user agent is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with / so relative paths join beneath it.
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| HuntressError::invalid_header("user-agent", e))?;

        let http = Client::builder()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(HuntressError::Transport)?;

        let retrier = Retrier::new(config.retry_policy).with_logger(config.logger.clone());

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: config.credentials.map(Arc::new),
            user_agent,
            limiter: config.rate_limit.build().map(Arc::new),
            retrier,
            logger: config.logger,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared rate limiter, if limiting is enabled.
    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_deref()
    }

    /// The retry policy applied to every call.
    pub fn retry_policy(&self) -> &RetryPolicy {
        self.retrier.policy()
    }

    /// Make a GET request and decode the body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.execute::<(), T>(ctx, Method::GET, path, None, options)
            .await
    }

    /// Make a POST request with a JSON body and decode the response.
    pub async fn post<B, T>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(ctx, Method::POST, path, Some(body), options)
            .await
    }

    /// Make a PUT request with a JSON body and decode the response.
    pub async fn put<B, T>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(ctx, Method::PUT, path, Some(body), options)
            .await
    }

    /// Make a DELETE request. The response body is not decoded.
    pub async fn delete(
        &self,
        ctx: &Context,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ResponseMeta> {
        let raw = self
            .execute_raw::<()>(ctx, Method::DELETE, path, None, options)
            .await?;
        Ok(raw.meta)
    }

    /// Run a request and decode a successful body into `T`.
    ///
    /// Decode failures surface as [`HuntressError::Decode`], never as
    /// [`HuntressError::Api`].
    pub async fn execute<B, T>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.execute_raw(ctx, method, path, body, options).await?;
        raw.into_api_response()
    }

    /// Run a request through the full pipeline and return the undecoded body.
    #[tracing::instrument(skip(self, ctx, method, body, options), fields(method = %method))]
    pub async fn execute_raw<B>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body, options)?;

        if let Some(limiter) = &self.limiter {
            limiter.wait(ctx).await?;
        }

        let http = &self.http;
        let request = &request;
        let response = self
            .retrier
            .run(ctx, || {
                let attempt = request.try_clone();
                async move {
                    let attempt = attempt.ok_or_else(|| {
                        HuntressError::invalid_header("body", "request body cannot be replayed")
                    })?;
                    http.execute(attempt).await.map_err(HuntressError::Transport)
                }
            })
            .await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();

        // Consuming the body here releases the connection on every path.
        let body = tokio::select! {
            biased;
            reason = ctx.done() => return Err(HuntressError::Cancelled(reason)),
            body = response.bytes() => body.map_err(HuntressError::Transport)?,
        };

        if !(200..300).contains(&status) {
            let err = ApiError::from_response(status, &headers, &body);
            let message = format!(
                "{} {path} failed: {err} (request id: {})",
                request.method(),
                err.request_id.as_deref().unwrap_or("-")
            );
            if status >= 500 {
                self.logger.warn(&message);
            } else {
                self.logger.info(&message);
            }
            return Err(err.into());
        }

        self.logger
            .debug(&format!("{} {path} -> {status}", request.method()));
        Ok(RawResponse {
            meta: ResponseMeta::new(status, headers),
            body,
        })
    }

    /// Resolve `path` against the base URL and merge query parameters.
    ///
    /// `query` wins over any parameters already present in `path`.
    ///
    /// Credentials are attached to every request, so a path that resolves
    /// to another origin or above the base path is rejected with
    /// [`HuntressError::ForeignUrl`].
    pub fn resolve_url(&self, path: &str, query: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path())
        {
            return Err(HuntressError::ForeignUrl(url.to_string()));
        }
        if !query.is_empty() {
            let merged = url
                .query_pairs()
                .into_owned()
                .collect::<QueryParams>()
                .merged_with(query);
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in merged.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path, &options.query)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(USER_AGENT, self.user_agent.clone());

        let payload = match body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
                Some(serde_json::to_vec(body).map_err(HuntressError::Serialize)?)
            }
            None => None,
        };

        if let Some(credentials) = &self.credentials {
            headers.insert(AUTHORIZATION, credentials.authorization_header()?);
        }

        let mut caller = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HuntressError::invalid_header(name, e))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| HuntressError::invalid_header(name, e))?;
            caller.append(header_name, header_value);
        }
        for name in caller.keys() {
            headers.remove(name);
        }
        for (name, value) in &caller {
            headers.append(name, value.clone());
        }

        let mut request = reqwest::Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(payload) = payload {
            *request.body_mut() = Some(payload.into());
        }
        if let Some(timeout) = options.timeout {
            *request.timeout_mut() = Some(timeout);
        }
        Ok(request)
    }
}
