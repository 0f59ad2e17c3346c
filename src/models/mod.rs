//! Huntress API model types.
//!
//! Huntress wraps single entities as `{"<singular>": {...}}` and
//! collections as `{"<plural>": [...], "pagination": {...}}`. The helpers
//! here unwrap both shapes; a body without the expected key is decoded
//! as-is.

mod account;
mod agent;
mod incident_report;
mod organization;
mod report;

pub use account::*;
pub use agent::*;
pub use incident_report::*;
pub use organization::*;
pub use report::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::HuntressClient;
use crate::context::Context;
use crate::error::{HuntressError, Result};
use crate::pagination::{BodyPagination, Page};
use crate::query::ToQuery;
use crate::request::RequestOptions;
use crate::response::decode_value;

/// Fetch `path` and unwrap the entity stored under `key`.
pub(crate) async fn fetch_one<T: DeserializeOwned>(
    client: &HuntressClient,
    ctx: &Context,
    path: &str,
    key: &str,
) -> Result<T> {
    let response = client
        .get::<Value>(ctx, path, &RequestOptions::default())
        .await?;
    take_field(response.data, key)
}

/// Fetch one page of `path` and unwrap the items stored under `key`.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &HuntressClient,
    ctx: &Context,
    path: &str,
    key: &str,
    query: &impl ToQuery,
    page: u32,
    limit: u32,
) -> Result<Page<T>> {
    let options = RequestOptions::new()
        .query(query)
        .param("page", page)
        .param("limit", limit);
    let response = client.get::<Value>(ctx, path, &options).await?;

    let mut pagination = response.meta.pagination;
    if !response.meta.headers.contains_key("x-page") {
        pagination.page = page;
    }
    if !response.meta.headers.contains_key("x-per-page") {
        pagination.per_page = limit;
    }

    let mut body = response.data;
    let body_pagination = body
        .get_mut("pagination")
        .map(Value::take)
        .and_then(|v| serde_json::from_value::<BodyPagination>(v).ok());
    if let Some(body_pagination) = body_pagination {
        pagination = body_pagination.apply(pagination);
    }

    let items = take_field(body, key)?;
    Ok(Page::new(items, pagination))
}

fn take_field<T: DeserializeOwned>(body: Value, key: &str) -> Result<T> {
    match body {
        Value::Object(mut map) => match map.remove(key) {
            Some(value) => decode_value(value).map_err(|err| match err {
                HuntressError::Decode { path, source } => HuntressError::Decode {
                    path: nested_path(key, &path),
                    source,
                },
                other => other,
            }),
            None => decode_value(Value::Object(map)),
        },
        other => decode_value(other),
    }
}

fn nested_path(key: &str, path: &str) -> String {
    match path {
        "." => key.to_string(),
        p if p.starts_with('[') => format!("{key}{p}"),
        p => format!("{key}.{p}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_take_field_unwraps_envelope() {
        let org: Organization = take_field(
            json!({"organization": {"id": 7, "name": "Acme"}}),
            "organization",
        )
        .unwrap();
        assert_eq!(org.id, 7);
        assert_eq!(org.name, "Acme");
    }

    #[test]
    fn test_take_field_accepts_bare_body() {
        let org: Organization = take_field(json!({"id": 8, "name": "Bare"}), "organization").unwrap();
        assert_eq!(org.id, 8);
    }

    #[test]
    fn test_take_field_prefixes_decode_path() {
        let err = take_field::<Vec<Organization>>(
            json!({"organizations": [{"id": "x", "name": "n"}]}),
            "organizations",
        )
        .unwrap_err();
        match err {
            HuntressError::Decode { path, .. } => assert_eq!(path, "organizations[0].id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
