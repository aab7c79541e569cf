//! HTTP API for the order orchestrator.
//!
//! Exposes order creation, lookup, payment and cancellation, plus catalog
//! lookups, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use catalog::InMemoryCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use orders::{InMemoryOrderStore, OrderService};
use payment::InMemoryPaymentProcessor;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route("/api/v1/orders", post(routes::orders::create))
        .route("/api/v1/orders/{order_uuid}", get(routes::orders::get))
        .route("/api/v1/orders/{order_uuid}/pay", post(routes::orders::pay))
        .route(
            "/api/v1/orders/{order_uuid}/cancel",
            post(routes::orders::cancel),
        )
        .route("/api/v1/parts/search", post(routes::parts::search))
        .route("/api/v1/parts/{part_uuid}", get(routes::parts::get))
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

/// Creates application state with a seeded in-memory catalog and an
/// in-memory payment processor.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    let catalog = InMemoryCatalog::seeded();
    let payment = InMemoryPaymentProcessor::with_latency(config.payment_latency);
    let orders = OrderService::new(InMemoryOrderStore::new(), catalog.clone(), payment.clone());

    Arc::new(AppState {
        orders,
        catalog,
        payment,
        request_timeout: config.request_timeout,
    })
}
