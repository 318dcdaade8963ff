use crate::infra::AppState;
use crate::lookups::{Lookups, LOOKUPS};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use flatwise::recommend::{recommendation_router, RecommendationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recommendation_routes(service: Arc<RecommendationService>) -> axum::Router {
    recommendation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/lookups", axum::routing::get(lookups_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        return (StatusCode::OK, Json(json!({ "status": "ready" })));
    }

    let reason = if state.store.is_loaded() {
        "initializing"
    } else {
        "catalog_unavailable"
    };
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": reason })),
    )
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn lookups_endpoint() -> Json<Lookups> {
    Json(LOOKUPS)
}
