//! Client configuration.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::Credentials;
use crate::client::HuntressClient;
use crate::error::{HuntressError, Result};
use crate::logger::{Logger, NoopLogger};
use crate::rate_limit::RateLimitConfig;
use crate::retry::RetryPolicy;

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.huntress.io/v1/";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("huntress-rs/", env!("CARGO_PKG_VERSION"));

pub const API_KEY_ENV: &str = "HUNTRESS_API_KEY";
pub const API_SECRET_ENV: &str = "HUNTRESS_API_SECRET";
pub const API_URL_ENV: &str = "HUNTRESS_API_URL";

/// Settings for a [`HuntressClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use huntress::{ClientConfig, RetryPolicy};
///
/// # fn example() -> huntress::Result<()> {
/// let client = ClientConfig::new()
///     .credentials("api-key", "api-secret")
///     .timeout(Duration::from_secs(10))
///     .retry_policy(RetryPolicy::default().with_max_attempts(5))
///     .requests_per_minute(30)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-attempt HTTP timeout.
    pub timeout: Duration,
    /// Without credentials requests go out unauthenticated.
    pub credentials: Option<Credentials>,
    pub retry_policy: RetryPolicy,
    pub rate_limit: RateLimitConfig,
    pub user_agent: String,
    pub logger: Arc<dyn Logger>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
            retry_policy: RetryPolicy::default(),
            rate_limit: RateLimitConfig::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            logger: Arc::new(NoopLogger),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `HUNTRESS_API_KEY`, `HUNTRESS_API_SECRET` and optionally
    /// `HUNTRESS_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or secret is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = required_env(API_KEY_ENV)?;
        let api_secret = required_env(API_SECRET_ENV)?;
        let mut config = Self::new().credentials(api_key, api_secret);
        if let Ok(url) = env::var(API_URL_ENV) {
            config.base_url = url;
        }
        Ok(config)
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn credentials(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(api_key, api_secret));
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    #[must_use]
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Shorthand for [`RateLimitConfig::per_minute`]. Zero disables limiting.
    #[must_use]
    pub fn requests_per_minute(self, requests_per_minute: u32) -> Self {
        self.rate_limit(RateLimitConfig::per_minute(requests_per_minute))
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or user agent is invalid.
    pub fn build(self) -> Result<HuntressClient> {
        HuntressClient::from_config(self)
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HuntressError::ConfigMissing(format!("{name} environment variable not set")))
}
