//! Huntress API client library.
//!
//! An async Rust client for the Huntress REST API. Every call flows through
//! one request pipeline:
//!
//! 1. build the request and attach Basic-Auth credentials,
//! 2. wait for a token from the shared [`RateLimiter`],
//! 3. send it under the [`RetryPolicy`] (exponential backoff with jitter),
//! 4. turn non-2xx responses into an [`ApiError`] and decode the rest.
//!
//! A [`Context`] travels with each call and cancels it promptly, whether it
//! is waiting for a token, in flight, or backing off.
//!
//! # Quick Start
//!
//! ```no_run
//! use huntress::{Agent, AgentListQuery, Context, Get, HuntressClient, List, Organization};
//!
//! #[tokio::main]
//! async fn main() -> huntress::Result<()> {
//!     // Create client from environment variables
//!     let client = HuntressClient::from_env()?;
//!     let ctx = Context::background();
//!
//!     // Get an organization by ID
//!     let org = Organization::get(&client, &ctx, 42).await?;
//!     println!("Organization: {}", org.name);
//!
//!     // List all agents in it
//!     let query = AgentListQuery {
//!         organization_id: Some(org.id),
//!         ..Default::default()
//!     };
//!     let agents = Agent::list_all(&client, &ctx, &query).await?;
//!     println!("Found {} agents", agents.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `HUNTRESS_API_KEY` (required) - Your Huntress API key
//! - `HUNTRESS_API_SECRET` (required) - Your Huntress API secret
//! - `HUNTRESS_API_URL` (optional) - Base URL (defaults to `https://api.huntress.io/v1/`)
//!
//! Use [`ClientConfig`] to tune timeouts, retries, rate limits, the user
//! agent, or to plug in a [`Logger`].

mod auth;
mod cache;
mod client;
mod config;
mod context;
mod error;
mod logger;
mod models;
mod pagination;
mod query;
mod rate_limit;
mod request;
mod response;
mod retry;
mod traits;

pub mod cli;
pub mod output;

// Re-export core types
pub use auth::Credentials;
pub use cache::{CachedClient, DEFAULT_CACHE_TTL};
pub use client::HuntressClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use context::{CancelReason, Context};
pub use error::{ApiError, HuntressError, Result};
pub use logger::{Level, Logger, NoopLogger, TracingLogger};
pub use pagination::{Page, Pagination};
pub use query::{QueryParams, ToQuery};
pub use rate_limit::{RateLimitConfig, RateLimiter, DEFAULT_REQUESTS_PER_MINUTE};
pub use request::RequestOptions;
pub use response::{ApiResponse, RawResponse, ResponseMeta};
pub use retry::{AttemptOutcome, AttemptState, Retrier, RetryPolicy};

// Re-export traits
pub use traits::{Get, List, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    Account, Agent, AgentListQuery, BillingReport, BillingReportListQuery, IncidentReport,
    IncidentReportListQuery, Organization, Report, ReportListQuery,
};

// Re-export the HTTP method type used by `execute`
pub use reqwest::Method;
