//! Incident report model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::pagination::Page;
use crate::query::{QueryParams, ToQuery};
use crate::traits::{Get, List};

/// A security incident raised by the Huntress SOC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    /// Incident report ID.
    pub id: u64,

    /// Status (e.g., "sent", "closed", "dismissed", "auto_remediating").
    #[serde(default)]
    pub status: Option<String>,

    /// Severity (e.g., "low", "high", "critical").
    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    /// Full report body (HTML).
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub organization_id: Option<u64>,

    #[serde(default)]
    pub agent_id: Option<u64>,

    /// Indicator categories involved (e.g., "footholds", "process_detections").
    #[serde(default)]
    pub indicator_types: Vec<String>,

    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IncidentReport {
    /// Whether the incident still needs attention.
    pub fn is_open(&self) -> bool {
        !matches!(self.status.as_deref(), Some("closed" | "dismissed"))
    }
}

/// Query parameters for listing incident reports.
#[derive(Debug, Clone, Default)]
pub struct IncidentReportListQuery {
    pub organization_id: Option<u64>,
    pub agent_id: Option<u64>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub platform: Option<String>,
    pub indicator_type: Option<String>,
}

impl ToQuery for IncidentReportListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("organization_id", self.organization_id)
            .with_opt("agent_id", self.agent_id)
            .with_opt("status", self.status.as_deref())
            .with_opt("severity", self.severity.as_deref())
            .with_opt("platform", self.platform.as_deref())
            .with_opt("indicator_type", self.indicator_type.as_deref())
    }
}

#[async_trait]
impl Get for IncidentReport {
    type Id = u64;

    #[tracing::instrument(skip(client, ctx))]
    async fn get(client: &HuntressClient, ctx: &Context, id: u64) -> Result<Self> {
        super::fetch_one(client, ctx, &format!("incident_reports/{id}"), "incident_report").await
    }
}

#[async_trait]
impl List for IncidentReport {
    type Query = IncidentReportListQuery;

    #[tracing::instrument(skip(client, ctx))]
    async fn list_page(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
        page: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        super::fetch_page(
            client,
            ctx,
            "incident_reports",
            "incident_reports",
            query,
            page,
            limit,
        )
        .await
    }
}
