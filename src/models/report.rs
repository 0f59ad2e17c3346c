//! Summary and billing report models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::pagination::Page;
use crate::query::{QueryParams, ToQuery};
use crate::traits::{Get, List};

/// A periodic summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,

    /// Report type (e.g., "monthly_summary", "quarterly_summary").
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,

    /// Covered period, as reported by the API.
    #[serde(default)]
    pub period: Option<String>,

    #[serde(default)]
    pub organization_id: Option<u64>,

    /// Download link.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing summary reports.
#[derive(Debug, Clone, Default)]
pub struct ReportListQuery {
    pub organization_id: Option<u64>,
    pub report_type: Option<String>,
    pub period_min: Option<String>,
    pub period_max: Option<String>,
}

impl ToQuery for ReportListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("organization_id", self.organization_id)
            .with_opt("type", self.report_type.as_deref())
            .with_opt("period_min", self.period_min.as_deref())
            .with_opt("period_max", self.period_max.as_deref())
    }
}

#[async_trait]
impl Get for Report {
    type Id = u64;

    #[tracing::instrument(skip(client, ctx))]
    async fn get(client: &HuntressClient, ctx: &Context, id: u64) -> Result<Self> {
        super::fetch_one(client, ctx, &format!("reports/{id}"), "report").await
    }
}

#[async_trait]
impl List for Report {
    type Query = ReportListQuery;

    #[tracing::instrument(skip(client, ctx))]
    async fn list_page(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
        page: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        super::fetch_page(client, ctx, "reports", "reports", query, page, limit).await
    }
}

/// A billing statement for the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingReport {
    pub id: u64,

    #[serde(default)]
    pub plan: Option<String>,

    /// Billed seat count.
    #[serde(default)]
    pub quantity: Option<u64>,

    /// Amount in `currency_type` units.
    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub currency_type: Option<String>,

    /// Payment status (e.g., "open", "paid", "failed").
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub receipt: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing billing reports.
#[derive(Debug, Clone, Default)]
pub struct BillingReportListQuery {
    pub status: Option<String>,
}

impl ToQuery for BillingReportListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new().with_opt("status", self.status.as_deref())
    }
}

#[async_trait]
impl Get for BillingReport {
    type Id = u64;

    #[tracing::instrument(skip(client, ctx))]
    async fn get(client: &HuntressClient, ctx: &Context, id: u64) -> Result<Self> {
        super::fetch_one(client, ctx, &format!("billing_reports/{id}"), "billing_report").await
    }
}

#[async_trait]
impl List for BillingReport {
    type Query = BillingReportListQuery;

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
            "billing_reports",
            "billing_reports",
            query,
            page,
            limit,
        )
        .await
    }
}
