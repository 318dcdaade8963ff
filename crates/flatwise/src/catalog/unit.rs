use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Longest lease a resale flat can carry.
pub const MAX_LEASE_YEARS: f64 = 99.0;

/// Row identity assigned at load time; stable for the lifetime of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// A single resale flat with its static attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub block: String,
    pub street_name: String,
    pub town: String,
    pub flat_type: String,
    pub flat_model: String,
    pub storey_range: String,
    pub resale_price: u32,
    pub floor_area_sqm: f64,
    pub remaining_lease_years: f64,
    pub dist_mrt_km: Option<f64>,
}

impl Unit {
    /// Lowest floor of the storey band, e.g. `10` for `"10 TO 12"`. Unparseable bands sort as `0`.
    pub fn storey_floor(&self) -> u32 {
        let digits: String = self
            .storey_range
            .trim_start()
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }

    /// Ordering used whenever every ranking field ties.
    pub fn identity_cmp(&self, other: &Unit) -> Ordering {
        self.block
            .cmp(&other.block)
            .then_with(|| self.street_name.cmp(&other.street_name))
            .then_with(|| self.id.cmp(&other.id))
    }

    pub fn check_invariants(&self) -> Result<(), UnitRejection> {
        if self.resale_price == 0 {
            return Err(UnitRejection::NonPositivePrice);
        }
        if !(self.floor_area_sqm.is_finite() && self.floor_area_sqm > 0.0) {
            return Err(UnitRejection::NonPositiveArea(self.floor_area_sqm));
        }
        if !(self.remaining_lease_years.is_finite()
            && (0.0..=MAX_LEASE_YEARS).contains(&self.remaining_lease_years))
        {
            return Err(UnitRejection::LeaseOutOfRange(self.remaining_lease_years));
        }
        if let Some(distance) = self.dist_mrt_km {
            if !(distance.is_finite() && distance >= 0.0) {
                return Err(UnitRejection::InvalidDistance(distance));
            }
        }
        Ok(())
    }
}

/// Why a catalog row could not become a [`Unit`].
#[derive(Debug, Clone, PartialEq)]
pub enum UnitRejection {
    NonPositivePrice,
    PriceOutOfRange(f64),
    NonPositiveArea(f64),
    LeaseOutOfRange(f64),
    InvalidDistance(f64),
    MissingField(&'static str),
}

impl fmt::Display for UnitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRejection::NonPositivePrice => write!(f, "resale_price must be positive"),
            UnitRejection::PriceOutOfRange(value) => {
                write!(f, "resale_price {value} is not a representable whole amount")
            }
            UnitRejection::NonPositiveArea(value) => {
                write!(f, "floor_area_sqm must be positive (found {value})")
            }
            UnitRejection::LeaseOutOfRange(value) => write!(
                f,
                "remaining_lease_years must fall within 0..={MAX_LEASE_YEARS} (found {value})"
            ),
            UnitRejection::InvalidDistance(value) => {
                write!(f, "dist_mrt_km must be a non-negative distance (found {value})")
            }
            UnitRejection::MissingField(field) => write!(f, "{field} is blank"),
        }
    }
}
