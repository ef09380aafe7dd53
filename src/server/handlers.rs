//! HTTP handlers of the mock data service
//!
//! Responses use the OData v2 JSON envelope: a collection is
//! `{"d": {"results": [...]}}` (plus `"__count"` when requested) and a single
//! entity is `{"d": {...}}`.

use super::host::MockServerHost;
use super::query::ListQuery;
use crate::core::error::{EntityError, RequestError, Result};
use crate::core::product::{PRODUCTS_ENTITY_SET, Product};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Only `serverDelay` is read from single-entity requests
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DelayQuery {
    #[serde(rename = "serverDelay")]
    pub server_delay: Option<u64>,
}

/// GET `$metadata`
pub async fn metadata(
    State(host): State<MockServerHost>,
    Query(query): Query<DelayQuery>,
) -> impl IntoResponse {
    host.delay(query.server_delay).await;
    (
        [(header::CONTENT_TYPE, "application/xml")],
        host.metadata.to_string(),
    )
}

/// GET `Products`
pub async fn list_products(
    State(host): State<MockServerHost>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>> {
    host.delay(query.server_delay).await;

    let page = query.apply(host.service.list().await?)?;
    tracing::debug!(
        total = page.total,
        returned = page.rows.len(),
        "listing products"
    );

    let mut body = json!({ "results": page.rows });
    if query.wants_count() {
        body["__count"] = Value::String(page.total.to_string());
    }
    Ok(Json(json!({ "d": body })))
}

/// GET `Products(<id>)`
pub async fn get_product(
    State(host): State<MockServerHost>,
    Path(segment): Path<String>,
    Query(query): Query<DelayQuery>,
) -> Result<Json<Value>> {
    host.delay(query.server_delay).await;

    let id = parse_key(&segment)?;
    let product = host
        .service
        .get(id)
        .await?
        .ok_or_else(|| EntityError::NotFound {
            entity_set: PRODUCTS_ENTITY_SET.to_string(),
            id,
        })?;
    Ok(Json(json!({ "d": product })))
}

/// POST `Products`
pub async fn create_product(
    State(host): State<MockServerHost>,
    Query(query): Query<DelayQuery>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    host.delay(query.server_delay).await;

    let product: Product = serde_json::from_slice(&body)?;
    let created = host.service.create(product).await?;
    tracing::info!(id = created.id, name = %created.name, "product created");

    Ok((StatusCode::CREATED, Json(json!({ "d": created }))))
}

/// GET `/health`
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "worklist-mockserver"
    }))
}

/// Parse an entity key segment like `Products(42)` or `Products('42')`
pub fn parse_key(segment: &str) -> Result<i64> {
    static KEY: OnceLock<Regex> = OnceLock::new();
    let regex = KEY.get_or_init(|| {
        Regex::new(r"^(\w+)\('?(-?\d+)'?\)$").expect("valid key segment regex")
    });

    let invalid = || RequestError::InvalidPath {
        path: segment.to_string(),
    };
    let caps = regex.captures(segment).ok_or_else(invalid)?;
    if &caps[1] != PRODUCTS_ENTITY_SET {
        return Err(invalid().into());
    }
    caps[2].parse::<i64>().map_err(|_| invalid().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WorklistError;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Products(42)").unwrap(), 42);
        assert_eq!(parse_key("Products('7')").unwrap(), 7);
    }

    #[test]
    fn test_parse_key_rejects_other_paths() {
        for segment in ["Orders(1)", "Products", "Products(abc)", "Products()"] {
            let err = parse_key(segment).unwrap_err();
            assert!(
                matches!(err, WorklistError::Request(RequestError::InvalidPath { .. })),
                "{segment} should be an invalid path"
            );
        }
    }
}
