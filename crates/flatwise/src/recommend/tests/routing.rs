use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::catalog::CatalogSnapshot;
use crate::recommend::router::{catalog_handler, recommend_error_response, reload_handler};
use crate::recommend::{recommendation_router, RecommendError};

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn recommend_route_returns_ranked_page() {
    let router = recommendation_router(build_service(three_price_catalog(), 10));

    let response = router
        .oneshot(post_json(
            "/api/v1/recommend",
            json!({ "constraints": { "max_price": 350000 }, "priority": "price" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_found"], json!(2));
    assert_eq!(payload["page"], json!(1));
    assert_eq!(payload["recommendations"][0]["unit_id"], json!(1));
    assert_eq!(payload["recommendations"][0]["rank"], json!(1));
    assert!(payload["recommendations"][0]["insight_summary"]["text"].is_string());
    assert_eq!(
        payload["recommendations"][0]["insight_summary"]["tiers"]["lease_value"],
        json!("Average")
    );
    assert!(payload["snapshot_version"].is_u64());
}

#[tokio::test]
async fn legacy_path_and_priority_labels_are_accepted() {
    let router = recommendation_router(build_service(mixed_catalog(), 10));

    let response = router
        .oneshot(post_json(
            "/recommend",
            json!({
                "constraints": { "towns": ["tampines"] },
                "priority": "Nearest MRT",
                "sort": "transit-asc"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_found"], json!(3));
    assert_eq!(payload["recommendations"][0]["unit_id"], json!(5));
}

#[tokio::test]
async fn invalid_constraints_return_bad_request() {
    let router = recommendation_router(build_service(three_price_catalog(), 10));

    let response = router
        .oneshot(post_json(
            "/api/v1/recommend",
            json!({ "constraints": { "min_remaining_lease": 150 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["retryable"], json!(false));
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("min_remaining_lease"));
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let bodies = [
        json!({ "constraints": { "max_price": "cheap" } }),
        json!({ "constraints": { "max_price": 300000.5 } }),
        json!({ "priority": "views" }),
    ];

    for body in bodies {
        let router = recommendation_router(build_service(three_price_catalog(), 10));
        let response = router
            .oneshot(post_json("/api/v1/recommend", body.clone()))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let payload = read_json_body(response).await;
        assert_eq!(payload["retryable"], json!(false), "{body}");
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("`body`"));
    }
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let router = recommendation_router(build_service(three_price_catalog(), 10));

    let response = router
        .oneshot(
            Request::post("/api/v1/recommend")
                .body(Body::from(r#"{"priority":"price"}"#))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn stale_snapshot_returns_conflict() {
    let service = build_service(three_price_catalog(), 10);
    let stale = service.store().current().expect("snapshot").version();
    let current = service
        .store()
        .install(CatalogSnapshot::new("refresh", three_price_catalog(), 0))
        .version();
    let router = recommendation_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommend",
            json!({ "page": 2, "snapshot_version": stale.0 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["retryable"], json!(true));
    assert_eq!(payload["requested_version"], json!(stale.0));
    assert_eq!(payload["current_version"], json!(current.0));
}

#[tokio::test]
async fn catalog_route_reports_snapshot_status() {
    let router = recommendation_router(build_service(mixed_catalog(), 10));

    let response = router
        .oneshot(
            Request::get("/api/v1/catalog")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["units"], json!(6));
    assert_eq!(payload["source"], json!("fixture"));
}

#[tokio::test]
async fn catalog_handler_is_unavailable_before_loading() {
    let response = catalog_handler(State(empty_service())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert_eq!(payload["retryable"], json!(true));
}

#[tokio::test]
async fn reload_handler_conflicts_without_source() {
    let response = reload_handler(State(build_service(three_price_catalog(), 10))).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn error_response_maps_status_codes() {
    let invalid = recommend_error_response(RecommendError::InvalidConstraint {
        field: "page",
        reason: "must be 1 or greater".to_string(),
    });
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let unavailable = recommend_error_response(RecommendError::CatalogUnavailable);
    assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
}
