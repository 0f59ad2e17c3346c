//! Organization model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::{Get, List};

/// A customer organization within the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Organization key used when deploying agents.
    #[serde(default)]
    pub key: Option<String>,

    /// Owning account.
    #[serde(default)]
    pub account_id: Option<u64>,

    /// Number of agents reporting for this organization.
    #[serde(default)]
    pub agents_count: Option<u64>,

    /// Number of incident reports raised for this organization.
    #[serde(default)]
    pub incident_reports_count: Option<u64>,

    /// Addresses notified about incidents.
    #[serde(default)]
    pub notify_emails: Vec<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl Get for Organization {
    type Id = u64;

    #[tracing::instrument(skip(client, ctx))]
    async fn get(client: &HuntressClient, ctx: &Context, id: u64) -> Result<Self> {
        super::fetch_one(client, ctx, &format!("organizations/{id}"), "organization").await
    }
}

#[async_trait]
impl List for Organization {
    type Query = ();

    #[tracing::instrument(skip(client, ctx))]
    async fn list_page(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
        page: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        super::fetch_page(client, ctx, "organizations", "organizations", query, page, limit).await
    }
}
