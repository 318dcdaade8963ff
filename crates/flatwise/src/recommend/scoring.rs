//! Weighted-sum scoring of eligible units.
//!
//! Every dimension is min/max normalized against the current eligible set, so a score says how a
//! unit compares with the other matches of the same search rather than with the whole market.

use serde::Serialize;

use super::domain::Priority;
use crate::catalog::Unit;

pub const MAX_SCORE: f64 = 10.0;
const DOMINANT_WEIGHT: f64 = 0.5;

/// Share of the final score contributed by each dimension. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityWeights {
    pub price: f64,
    pub floor_area: f64,
    pub lease: f64,
    pub transit: f64,
}

impl PriorityWeights {
    pub fn for_priority(priority: Priority) -> Self {
        let residual = (1.0 - DOMINANT_WEIGHT) / 3.0;
        let mut weights = Self {
            price: residual,
            floor_area: residual,
            lease: residual,
            transit: residual,
        };

        match priority {
            Priority::Price => weights.price = DOMINANT_WEIGHT,
            Priority::FloorArea => weights.floor_area = DOMINANT_WEIGHT,
            Priority::Lease => weights.lease = DOMINANT_WEIGHT,
            Priority::Mrt => weights.transit = DOMINANT_WEIGHT,
            Priority::Balanced => {
                weights = Self {
                    price: 0.25,
                    floor_area: 0.25,
                    lease: 0.25,
                    transit: 0.25,
                }
            }
        }

        weights
    }
}

/// Per-dimension sub-scores (each 0–10) and the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub price: f64,
    pub floor_area: f64,
    pub lease: f64,
    pub transit: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |span, value| match span {
            None => Some(Span {
                min: value,
                max: value,
            }),
            Some(Span { min, max }) => Some(Span {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }

    fn sub_score(self, value: f64, lower_is_better: bool) -> f64 {
        let spread = self.max - self.min;
        if spread <= 0.0 {
            return MAX_SCORE;
        }

        let position = if lower_is_better {
            (self.max - value) / spread
        } else {
            (value - self.min) / spread
        };
        (position * MAX_SCORE).clamp(0.0, MAX_SCORE)
    }
}

/// Normalization ranges for one eligible set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPool {
    price: Option<Span>,
    floor_area: Option<Span>,
    lease: Option<Span>,
    transit: Option<Span>,
}

impl ScoringPool {
    pub fn from_units(units: &[&Unit]) -> Self {
        Self {
            price: Span::of(units.iter().map(|unit| f64::from(unit.resale_price))),
            floor_area: Span::of(units.iter().map(|unit| unit.floor_area_sqm)),
            lease: Span::of(units.iter().map(|unit| unit.remaining_lease_years)),
            // units without transit data do not widen the range
            transit: Span::of(units.iter().filter_map(|unit| unit.dist_mrt_km)),
        }
    }

    pub fn score(&self, unit: &Unit, weights: &PriorityWeights) -> ScoreBreakdown {
        let price = dimension(self.price, Some(f64::from(unit.resale_price)), true);
        let floor_area = dimension(self.floor_area, Some(unit.floor_area_sqm), false);
        let lease = dimension(self.lease, Some(unit.remaining_lease_years), false);
        let transit = dimension(self.transit, unit.dist_mrt_km, true);

        let weighted = price * weights.price
            + floor_area * weights.floor_area
            + lease * weights.lease
            + transit * weights.transit;

        ScoreBreakdown {
            price,
            floor_area,
            lease,
            transit,
            total: round_score(weighted.clamp(0.0, MAX_SCORE)),
        }
    }
}

fn dimension(span: Option<Span>, value: Option<f64>, lower_is_better: bool) -> f64 {
    match (span, value) {
        (_, None) => 0.0,
        (None, Some(_)) => MAX_SCORE,
        (Some(span), Some(value)) => span.sub_score(value, lower_is_better),
    }
}

fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one unit against its eligible set.
pub fn score(unit: &Unit, priority: Priority, eligible: &[&Unit]) -> f64 {
    ScoringPool::from_units(eligible)
        .score(unit, &PriorityWeights::for_priority(priority))
        .total
}
