//! Account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;

/// The Huntress account that owns the API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: u64,

    /// Account name.
    pub name: String,

    /// Portal subdomain (e.g., "acme" for acme.huntress.io).
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Account status (e.g., "enabled").
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Fetch the account the client's credentials belong to.
    #[tracing::instrument(skip(client, ctx))]
    pub async fn current(client: &HuntressClient, ctx: &Context) -> Result<Self> {
        super::fetch_one(client, ctx, "account", "account").await
    }

    /// Portal URL, when the subdomain is known.
    pub fn portal_url(&self) -> Option<String> {
        self.subdomain
            .as_ref()
            .map(|s| format!("https://{s}.huntress.io"))
    }
}
