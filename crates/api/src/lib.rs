//! HTTP API server with observability for the product catalog.
//!
//! Provides REST endpoints for product commands and queries,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use store::CatalogStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, LogFormat};
pub use error::ApiError;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CatalogStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/products",
            post(routes::products::create::<S>).get(routes::products::list::<S>),
        )
        .route(
            "/products/{id}",
            get(routes::products::get::<S>).put(routes::products::update::<S>),
        )
        .route(
            "/products/{id}/activate",
            post(routes::products::activate::<S>),
        )
        .route(
            "/products/{id}/deactivate",
            post(routes::products::deactivate::<S>),
        )
        .route(
            "/products/{id}/archive",
            post(routes::products::archive::<S>),
        )
        .route(
            "/products/{id}/discount",
            post(routes::products::apply_discount::<S>)
                .delete(routes::products::remove_discount::<S>),
        )
        .route(
            "/categories/{category}/count",
            get(routes::products::count_by_category::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
