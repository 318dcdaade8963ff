use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::catalog::{CatalogSnapshot, CatalogStore, Unit, UnitId};
use crate::recommend::RecommendationService;

pub(super) fn unit(id: u32, resale_price: u32) -> Unit {
    Unit {
        id: UnitId(id),
        block: format!("{}", 100 + id),
        street_name: "TAMPINES ST 21".to_string(),
        town: "TAMPINES".to_string(),
        flat_type: "4 ROOM".to_string(),
        flat_model: "Model A".to_string(),
        storey_range: "07 TO 09".to_string(),
        resale_price,
        floor_area_sqm: 92.0,
        remaining_lease_years: 70.0,
        dist_mrt_km: Some(0.8),
    }
}

pub(super) fn unit_with(id: u32, resale_price: u32, adjust: impl FnOnce(&mut Unit)) -> Unit {
    let mut unit = unit(id, resale_price);
    adjust(&mut unit);
    unit
}

pub(super) fn refs(units: &[Unit]) -> Vec<&Unit> {
    units.iter().collect()
}

/// Three flats differing only in price.
pub(super) fn three_price_catalog() -> Vec<Unit> {
    vec![
        unit(0, 400_000),
        unit(1, 300_000),
        unit(2, 350_000),
    ]
}

/// A mixed pool covering several towns, types, models, storeys, and transit data.
pub(super) fn mixed_catalog() -> Vec<Unit> {
    vec![
        unit_with(0, 330_000, |u| {
            u.town = "ANG MO KIO".to_string();
            u.flat_type = "3 ROOM".to_string();
            u.flat_model = "New Generation".to_string();
            u.storey_range = "10 TO 12".to_string();
            u.floor_area_sqm = 68.0;
            u.remaining_lease_years = 52.0;
            u.dist_mrt_km = Some(0.4);
        }),
        unit_with(1, 520_000, |u| {
            u.flat_model = "Premium Apartment".to_string();
            u.storey_range = "13 TO 15".to_string();
            u.floor_area_sqm = 93.0;
            u.remaining_lease_years = 88.0;
            u.dist_mrt_km = Some(1.3);
        }),
        unit_with(2, 610_000, |u| {
            u.town = "BISHAN".to_string();
            u.flat_type = "5 ROOM".to_string();
            u.flat_model = "Improved".to_string();
            u.storey_range = "04 TO 06".to_string();
            u.floor_area_sqm = 121.0;
            u.remaining_lease_years = 61.0;
            u.dist_mrt_km = None;
        }),
        unit_with(3, 455_000, |u| {
            u.storey_range = "01 TO 03".to_string();
            u.remaining_lease_years = 74.0;
            u.dist_mrt_km = Some(0.9);
        }),
        unit_with(4, 780_000, |u| {
            u.town = "BISHAN".to_string();
            u.flat_type = "EXECUTIVE".to_string();
            u.flat_model = "Maisonette".to_string();
            u.storey_range = "07 TO 09".to_string();
            u.floor_area_sqm = 146.0;
            u.remaining_lease_years = 66.0;
            u.dist_mrt_km = Some(0.7);
        }),
        unit_with(5, 498_000, |u| {
            u.storey_range = "19 TO 21".to_string();
            u.remaining_lease_years = 91.0;
            u.dist_mrt_km = Some(0.3);
        }),
    ]
}

pub(super) fn build_service(units: Vec<Unit>, page_size: usize) -> Arc<RecommendationService> {
    let store = Arc::new(CatalogStore::with_snapshot(CatalogSnapshot::new(
        "fixture", units, 0,
    )));
    Arc::new(RecommendationService::new(store, page_size))
}

pub(super) fn empty_service() -> Arc<RecommendationService> {
    Arc::new(RecommendationService::new(Arc::new(CatalogStore::new()), 10))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
