//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use huntress::{Context, HuntressClient, List, Organization};
///
/// let client = HuntressClient::from_env()?;
/// let ctx = Context::background();
///
/// // Fetch a single page
/// let page = Organization::list_page(&client, &ctx, &Default::default(), 1, 50).await?;
///
/// // Fetch all pages
/// let all = Organization::list_all(&client, &ctx, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-indexed)
    /// * `limit` - Number of items per page (max 500)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
        page: u32,
        limit: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Every page goes through the client's rate limiter, so large
    /// collections take a while under the default rate limit.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(
        client: &HuntressClient,
        ctx: &Context,
        query: &Self::Query,
    ) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, ctx, query, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more();
            let items_count = result.items.len();
            all_items.extend(result.items);

            if !has_more || items_count == 0 {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}
