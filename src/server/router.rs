//! Route table of the mock data service

use super::handlers::{create_product, get_product, health_check, list_products, metadata};
use super::host::MockServerHost;
use crate::core::product::PRODUCTS_ENTITY_SET;
use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the service routes mounted under `host.root_uri`
///
/// - GET  {root}$metadata
/// - GET  {root}Products
/// - POST {root}Products
/// - GET  {root}Products(<id>)
/// - GET  /health, /healthz
pub fn build_router(host: MockServerHost) -> Router {
    let root = host.root_uri.trim_end_matches('/').to_string();

    let service_routes = Router::new()
        .route("/$metadata", get(metadata))
        .route(
            &format!("/{}", PRODUCTS_ENTITY_SET),
            get(list_products).post(create_product),
        )
        .route("/{key}", get(get_product))
        .with_state(host);

    // axum cannot nest at the root path
    let app = if root.is_empty() {
        service_routes
    } else {
        Router::new().nest(&root, service_routes)
    };

    app.merge(health_routes()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
