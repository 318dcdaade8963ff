use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::RecommendError;
use crate::catalog::{normalize_flat_type, normalize_label, SnapshotVersion, Unit, MAX_LEASE_YEARS};

/// The single dimension a request asks the scorer to weight most heavily.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[serde(alias = "Price")]
    Price,
    #[serde(alias = "Floor Area", alias = "size")]
    FloorArea,
    #[serde(alias = "Lease")]
    Lease,
    #[serde(alias = "Nearest MRT", alias = "transit")]
    Mrt,
    #[default]
    #[serde(alias = "None - treat equally", alias = "none", alias = "recommended")]
    Balanced,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::FloorArea => "Floor Area",
            Self::Lease => "Lease",
            Self::Mrt => "Nearest MRT",
            Self::Balanced => "Balanced",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price" => Some(Self::Price),
            "floor_area" | "floor-area" | "floor area" | "size" => Some(Self::FloorArea),
            "lease" => Some(Self::Lease),
            "mrt" | "nearest mrt" | "transit" => Some(Self::Mrt),
            "balanced" | "none" | "none - treat equally" | "recommended" => Some(Self::Balanced),
            _ => None,
        }
    }
}

/// Ordering applied to the eligible set before paging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "recommended")]
    Recommended,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "area-desc")]
    AreaDesc,
    #[serde(rename = "storey-desc")]
    StoreyDesc,
    #[serde(rename = "mrt-asc", alias = "transit-asc")]
    MrtAsc,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::AreaDesc => "area-desc",
            Self::StoreyDesc => "storey-desc",
            Self::MrtAsc => "mrt-asc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "area-desc" => Some(Self::AreaDesc),
            "storey-desc" => Some(Self::StoreyDesc),
            "mrt-asc" | "transit-asc" => Some(Self::MrtAsc),
            _ => None,
        }
    }
}

/// Qualitative band for one value dimension, relative to the eligible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Good,
    #[default]
    Average,
    Bad,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Bad => "Bad",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiers {
    pub lease_value: Tier,
    pub resale_risk: Tier,
    pub size_value: Tier,
}

/// Constraint payload as received from callers. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSet {
    pub max_price: Option<i64>,
    pub min_remaining_lease: Option<i64>,
    pub max_mrt_distance: Option<f64>,
    pub towns: Option<Vec<String>>,
    pub flat_types: Option<Vec<String>>,
    pub storey_ranges: Option<Vec<String>>,
    pub flat_models: Option<Vec<String>>,
}

impl ConstraintSet {
    /// Reject out-of-range values up front; nothing is clamped.
    pub fn validate(&self) -> Result<Constraints, RecommendError> {
        let max_price = match self.max_price {
            Some(value) if value < 0 => {
                return Err(RecommendError::invalid(
                    "max_price",
                    format!("must be non-negative (got {value})"),
                ))
            }
            other => other.map(|value| value as u64),
        };

        let min_remaining_lease = match self.min_remaining_lease {
            Some(value) if value < 0 => {
                return Err(RecommendError::invalid(
                    "min_remaining_lease",
                    format!("must be non-negative (got {value})"),
                ))
            }
            Some(value) if value as f64 > MAX_LEASE_YEARS => {
                return Err(RecommendError::invalid(
                    "min_remaining_lease",
                    format!("cannot exceed {MAX_LEASE_YEARS} years (got {value})"),
                ))
            }
            other => other.map(|value| value as f64),
        };

        let max_mrt_distance = match self.max_mrt_distance {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(RecommendError::invalid(
                    "max_mrt_distance",
                    format!("must be a non-negative distance in km (got {value})"),
                ))
            }
            other => other,
        };

        Ok(Constraints {
            max_price,
            min_remaining_lease,
            max_mrt_distance,
            towns: normalized_set("towns", &self.towns, normalize_label)?,
            flat_types: normalized_set("flat_types", &self.flat_types, normalize_flat_type)?,
            storey_ranges: normalized_set("storey_ranges", &self.storey_ranges, |raw| {
                raw.to_string()
            })?,
            flat_models: normalized_set("flat_models", &self.flat_models, normalize_label)?,
        })
    }
}

fn normalized_set(
    field: &'static str,
    values: &Option<Vec<String>>,
    normalize: impl Fn(&str) -> String,
) -> Result<BTreeSet<String>, RecommendError> {
    let mut set = BTreeSet::new();
    for raw in values.iter().flatten() {
        if raw.trim().is_empty() {
            return Err(RecommendError::invalid(field, "must not contain blank entries"));
        }
        set.insert(normalize(raw));
    }
    Ok(set)
}

/// Validated, normalized constraints. Empty sets and `None` impose no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub(crate) max_price: Option<u64>,
    pub(crate) min_remaining_lease: Option<f64>,
    pub(crate) max_mrt_distance: Option<f64>,
    pub(crate) towns: BTreeSet<String>,
    pub(crate) flat_types: BTreeSet<String>,
    pub(crate) storey_ranges: BTreeSet<String>,
    pub(crate) flat_models: BTreeSet<String>,
}

/// One recommendation request against the current catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub constraints: ConstraintSet,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "first_page")]
    pub page: i64,
    #[serde(default)]
    pub sort: SortKey,
    /// Version returned by an earlier page of the same search session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_version: Option<SnapshotVersion>,
}

fn first_page() -> i64 {
    1
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self::new(ConstraintSet::default(), Priority::default())
    }
}

impl RecommendRequest {
    pub fn new(constraints: ConstraintSet, priority: Priority) -> Self {
        Self {
            constraints,
            priority,
            page: 1,
            sort: SortKey::Recommended,
            snapshot_version: None,
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn pinned_to(mut self, version: SnapshotVersion) -> Self {
        self.snapshot_version = Some(version);
        self
    }
}

/// Tiers plus the composed explanation for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub tiers: Tiers,
    pub text: String,
}

/// A ranked unit in the plain-record shape consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationView {
    pub unit_id: u32,
    pub street_name: String,
    pub block: String,
    pub flat_type: String,
    pub flat_model: String,
    pub town: String,
    pub score: f64,
    pub resale_price: u32,
    pub floor_area_sqm: f64,
    pub storey_range: String,
    pub remaining_lease_years: f64,
    pub dist_mrt_km: Option<f64>,
    pub insight_summary: InsightSummary,
    pub rank: usize,
}

impl RecommendationView {
    pub(crate) fn from_unit(unit: &Unit, score: f64, rank: usize, insight: InsightSummary) -> Self {
        Self {
            unit_id: unit.id.0,
            street_name: unit.street_name.clone(),
            block: unit.block.clone(),
            flat_type: unit.flat_type.clone(),
            flat_model: unit.flat_model.clone(),
            town: unit.town.clone(),
            score,
            resale_price: unit.resale_price,
            floor_area_sqm: unit.floor_area_sqm,
            storey_range: unit.storey_range.clone(),
            remaining_lease_years: unit.remaining_lease_years,
            dist_mrt_km: unit.dist_mrt_km,
            insight_summary: insight,
            rank,
        }
    }
}

/// One page of results plus the count of every unit that passed the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPage {
    pub recommendations: Vec<RecommendationView>,
    pub total_found: usize,
    pub page: usize,
    pub page_size: usize,
    pub snapshot_version: SnapshotVersion,
}
