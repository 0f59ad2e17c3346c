//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use huntress::{Agent, Context, Get, HuntressClient};
///
/// let client = HuntressClient::from_env()?;
/// let agent = Agent::get(&client, &Context::background(), 42).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send + Sync;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &HuntressClient, ctx: &Context, id: Self::Id) -> Result<Self>;
}
