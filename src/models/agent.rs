//! Agent model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::pagination::Page;
use crate::query::{QueryParams, ToQuery};
use crate::traits::{Get, List};

/// An endpoint running the Huntress agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Agent ID.
    pub id: u64,

    /// Host name reported by the agent.
    #[serde(default)]
    pub hostname: String,

    /// Organization the host belongs to.
    #[serde(default)]
    pub organization_id: Option<u64>,

    #[serde(default)]
    pub account_id: Option<u64>,

    /// Platform (e.g., "windows", "darwin", "linux").
    #[serde(default)]
    pub platform: Option<String>,

    /// Operating system description.
    #[serde(default)]
    pub os: Option<String>,

    /// Agent version.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub ipv4_address: Option<String>,

    #[serde(default)]
    pub external_ip: Option<String>,

    #[serde(default)]
    pub mac_addresses: Vec<String>,

    #[serde(default)]
    pub serial_number: Option<String>,

    #[serde(default)]
    pub domain_name: Option<String>,

    /// Microsoft Defender status as reported by the agent.
    #[serde(default)]
    pub defender_status: Option<String>,

    /// Last time the agent called home.
    #[serde(default)]
    pub last_callback_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Whether the agent called home within `window` of `now`.
    pub fn is_active(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.last_callback_at
            .is_some_and(|seen| now.signed_duration_since(seen) <= window)
    }
}

/// Query parameters for listing agents.
#[derive(Debug, Clone, Default)]
pub struct AgentListQuery {
    /// Only agents in this organization.
    pub organization_id: Option<u64>,

    /// Only agents on this platform.
    pub platform: Option<String>,

    /// Only agents updated at or after this time.
    pub updated_at_min: Option<DateTime<Utc>>,
}

impl ToQuery for AgentListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("organization_id", self.organization_id)
            .with_opt("platform", self.platform.as_deref())
            .with_opt("updated_at_min", self.updated_at_min.map(|t| t.to_rfc3339()))
    }
}

#[async_trait]
impl Get for Agent {
    type Id = u64;

    #[tracing::instrument(skip(client, ctx))]
    async fn get(client: &HuntressClient, ctx: &Context, id: u64) -> Result<Self> {
        super::fetch_one(client, ctx, &format!("agents/{id}"), "agent").await
    }
}

#[async_trait]
impl List for Agent {
    type Query = AgentListQuery;

    #[tracing::instrument(skip(client, ctx))]
    async fn list_page(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
        page: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        super::fetch_page(client, ctx, "agents", "agents", query, page, limit).await
    }
}
