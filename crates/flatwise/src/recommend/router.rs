use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::RecommendRequest;
use super::service::RecommendationService;
use super::RecommendError;
use crate::catalog::CatalogError;

/// Router builder exposing the recommendation and catalog endpoints.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/api/v1/recommend", post(recommend_handler))
        .route("/recommend", post(recommend_handler))
        .route("/api/v1/catalog", get(catalog_handler))
        .route("/api/v1/catalog/reload", post(reload_handler))
        .with_state(service)
}

pub(crate) async fn recommend_handler(
    State(service): State<Arc<RecommendationService>>,
    payload: Result<axum::Json<RecommendRequest>, JsonRejection>,
) -> Response {
    // malformed bodies share the constraint error envelope
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            return recommend_error_response(RecommendError::invalid(
                "body",
                rejection.body_text(),
            ))
        }
    };
    match service.recommend(&request) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => recommend_error_response(error),
    }
}

pub(crate) fn recommend_error_response(error: RecommendError) -> Response {
    let status = error.status_code();
    let payload = match &error {
        RecommendError::SnapshotMismatch { requested, current } => json!({
            "error": error.to_string(),
            "retryable": true,
            "requested_version": requested,
            "current_version": current,
        }),
        other => json!({
            "error": other.to_string(),
            "retryable": other.is_retryable(),
        }),
    };
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn catalog_handler(State(service): State<Arc<RecommendationService>>) -> Response {
    match service.catalog_status() {
        Some(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        None => recommend_error_response(RecommendError::CatalogUnavailable),
    }
}

pub(crate) async fn reload_handler(State(service): State<Arc<RecommendationService>>) -> Response {
    match service.reload() {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(CatalogError::NoSource) => {
            let payload = json!({ "error": CatalogError::NoSource.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
