use super::common::*;
use std::io::Write;

use crate::catalog::{CatalogError, CatalogSnapshot};
use crate::recommend::{
    ConstraintSet, Priority, RecommendError, RecommendRequest, SortKey, Tier,
};

fn price_request() -> RecommendRequest {
    RecommendRequest::new(ConstraintSet::default(), Priority::Price)
}

#[test]
fn recommend_ranks_cheapest_first_under_price_priority() {
    let service = build_service(three_price_catalog(), 10);

    let page = service.recommend(&price_request()).expect("recommendation");

    assert_eq!(page.total_found, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    let top = &page.recommendations[0];
    assert_eq!(top.unit_id, 1);
    assert_eq!(top.resale_price, 300_000);
    assert_eq!(top.score, 10.0);
    assert_eq!(top.rank, 1);

    let ranks: Vec<usize> = page.recommendations.iter().map(|view| view.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn zero_page_size_is_rejected_not_widened() {
    let service = build_service(three_price_catalog(), 0);
    assert_eq!(service.page_size(), 0);

    match service.recommend(&price_request()) {
        Err(RecommendError::InvalidConstraint { field, .. }) => assert_eq!(field, "page_size"),
        other => panic!("expected invalid page_size, got {other:?}"),
    }
}

#[test]
fn recommendations_carry_tiers_and_insight_text() {
    let service = build_service(three_price_catalog(), 10);

    let page = service.recommend(&price_request()).expect("recommendation");

    let best = &page.recommendations[0].insight_summary;
    assert_eq!(best.tiers.lease_value, Tier::Good);
    assert_eq!(
        best.text,
        "Excellent overall match for all your criteria. Stands out for strong value for the lease remaining."
    );

    let worst = &page.recommendations[2].insight_summary;
    assert_eq!(worst.tiers.lease_value, Tier::Bad);
    assert_eq!(
        worst.text,
        "Meets essential criteria. Watch for a high price for the lease remaining."
    );
}

#[test]
fn no_matches_is_an_empty_page_not_an_error() {
    let service = build_service(three_price_catalog(), 10);
    let request = RecommendRequest::new(
        ConstraintSet {
            max_price: Some(100_000),
            ..ConstraintSet::default()
        },
        Priority::Balanced,
    );

    let page = service.recommend(&request).expect("empty result");

    assert!(page.recommendations.is_empty());
    assert_eq!(page.total_found, 0);
}

#[test]
fn page_past_the_end_is_empty_but_counts_matches() {
    let service = build_service(three_price_catalog(), 10);

    let page = service
        .recommend(&price_request().with_page(5))
        .expect("recommendation");

    assert!(page.recommendations.is_empty());
    assert_eq!(page.total_found, 3);
    assert_eq!(page.page, 5);
}

#[test]
fn non_positive_page_is_rejected() {
    let service = build_service(three_price_catalog(), 10);

    match service.recommend(&price_request().with_page(0)) {
        Err(RecommendError::InvalidConstraint { field, .. }) => assert_eq!(field, "page"),
        other => panic!("expected invalid page, got {other:?}"),
    }
}

#[test]
fn pages_share_one_ordering() {
    let service = build_service(mixed_catalog(), 2);
    let first = service
        .recommend(&price_request().with_sort(SortKey::AreaDesc))
        .expect("first page");

    let mut seen = Vec::new();
    for page in 1..=3 {
        let request = price_request()
            .with_sort(SortKey::AreaDesc)
            .with_page(page)
            .pinned_to(first.snapshot_version);
        let result = service.recommend(&request).expect("page");
        assert_eq!(result.total_found, 6);
        seen.extend(result.recommendations.iter().map(|view| (view.rank, view.unit_id)));
    }

    assert_eq!(
        seen,
        vec![(1, 4), (2, 2), (3, 1), (4, 3), (5, 5), (6, 0)]
    );
}

#[test]
fn missing_snapshot_is_reported_as_unavailable() {
    let service = empty_service();

    let error = service.recommend(&price_request()).expect_err("no catalog");

    assert_eq!(error, RecommendError::CatalogUnavailable);
    assert!(error.is_retryable());
    assert!(service.catalog_status().is_none());
}

#[test]
fn pinned_request_detects_catalog_refresh() {
    let service = build_service(three_price_catalog(), 10);
    let first = service.recommend(&price_request()).expect("first page");

    let replacement = service
        .store()
        .install(CatalogSnapshot::new("refresh", mixed_catalog(), 0));

    let error = service
        .recommend(&price_request().with_page(2).pinned_to(first.snapshot_version))
        .expect_err("stale session");
    assert_eq!(
        error,
        RecommendError::SnapshotMismatch {
            requested: first.snapshot_version,
            current: replacement.version(),
        }
    );

    let fresh = service.recommend(&price_request()).expect("fresh search");
    assert_eq!(fresh.snapshot_version, replacement.version());
    assert_eq!(fresh.total_found, 6);
}

#[test]
fn reload_without_a_source_is_rejected() {
    let service = build_service(three_price_catalog(), 10);

    match service.reload() {
        Err(CatalogError::NoSource) => {}
        other => panic!("expected missing source, got {other:?}"),
    }
}

#[test]
fn failed_reload_keeps_the_previous_snapshot() {
    let store = build_service(three_price_catalog(), 10).store().clone();
    let before = store.current().expect("snapshot").version();
    let service = crate::recommend::RecommendationService::new(store.clone(), 10)
        .with_catalog_path("./missing-resale-export.csv");

    match service.reload() {
        Err(CatalogError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
    assert_eq!(store.current().expect("snapshot").version(), before);
}

#[test]
fn reload_installs_a_new_snapshot() {
    let path = std::env::temp_dir().join(format!(
        "flatwise-reload-{}.csv",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).expect("create export");
    writeln!(
        file,
        "town,flat_type,block,street_name,storey_range,floor_area_sqm,flat_model,resale_price,remaining_lease_years,dist_mrt_km"
    )
    .expect("write header");
    writeln!(
        file,
        "BEDOK,4 ROOM,12,BEDOK NTH RD,04 TO 06,92,Model A,455000,71.5,0.62"
    )
    .expect("write row");
    drop(file);

    let store = build_service(three_price_catalog(), 10).store().clone();
    let before = store.current().expect("snapshot").version();
    let service =
        crate::recommend::RecommendationService::new(store.clone(), 10).with_catalog_path(&path);

    let status = service.reload().expect("reload succeeds");
    std::fs::remove_file(&path).ok();

    assert_ne!(status.snapshot_version, before);
    assert_eq!(status.units, 1);
    assert_eq!(store.current().expect("snapshot").units()[0].town, "BEDOK");
}
