//! Tercile-based tier classification.
//!
//! Thresholds come from the eligible set of the current search, so the same flat can land in a
//! different tier when the surrounding matches change.
//!
//! Resale risk has no market-derived ground truth; it is the fixed heuristic
//!
//! ```text
//! risk = 0.60 * lease_decay + 0.25 * model_rarity + 0.15 * legacy_model
//! lease_decay  = 1 - clamp(remaining_lease_years / 99, 0, 1)
//! model_rarity = 1 - (matches sharing this flat_model) / (eligible set size)
//! legacy_model = 1 for older-generation models, otherwise 0
//! ```
//!
//! A higher index is riskier.

use std::collections::HashMap;

use super::domain::{Tier, Tiers};
use crate::catalog::{normalize_label, Unit, MAX_LEASE_YEARS};

pub const LEASE_DECAY_WEIGHT: f64 = 0.60;
pub const MODEL_RARITY_WEIGHT: f64 = 0.25;
pub const LEGACY_MODEL_WEIGHT: f64 = 0.15;

/// Smallest eligible set for which terciles are meaningful.
pub const MIN_TIER_POPULATION: usize = 3;

const LEGACY_MODELS: &[&str] = &[
    "IMPROVED",
    "NEW GENERATION",
    "SIMPLIFIED",
    "STANDARD",
    "MODEL A",
    "MODEL A2",
    "TYPE S1",
    "TYPE S2",
    "TERRACE",
    "2-ROOM",
];

pub fn is_legacy_model(flat_model: &str) -> bool {
    let normalized = normalize_label(flat_model);
    LEGACY_MODELS.contains(&normalized.as_str())
}

/// Risk index in `[0, 1]` for a unit whose flat model makes up `model_share` of the eligible set.
pub fn resale_risk_index(unit: &Unit, model_share: f64) -> f64 {
    let lease_decay = 1.0 - (unit.remaining_lease_years / MAX_LEASE_YEARS).clamp(0.0, 1.0);
    let model_rarity = 1.0 - model_share.clamp(0.0, 1.0);
    let legacy = if is_legacy_model(&unit.flat_model) {
        1.0
    } else {
        0.0
    };

    LEASE_DECAY_WEIGHT * lease_decay + MODEL_RARITY_WEIGHT * model_rarity + LEGACY_MODEL_WEIGHT * legacy
}

fn price_per_lease_year(unit: &Unit) -> f64 {
    f64::from(unit.resale_price) / unit.remaining_lease_years.max(1.0)
}

fn price_per_sqm(unit: &Unit) -> f64 {
    f64::from(unit.resale_price) / unit.floor_area_sqm
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Band {
    Low,
    Middle,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Terciles {
    lower: f64,
    upper: f64,
}

impl Terciles {
    /// Nearest-rank cut points. `None` when the population is too small or has no spread.
    fn from_values(mut values: Vec<f64>) -> Option<Self> {
        let count = values.len();
        if count < MIN_TIER_POPULATION {
            return None;
        }

        values.sort_by(f64::total_cmp);
        if values[0] == values[count - 1] {
            return None;
        }

        Some(Self {
            lower: values[count / 3 - 1],
            upper: values[2 * count / 3 - 1],
        })
    }

    fn band(&self, value: f64) -> Band {
        if value <= self.lower {
            Band::Low
        } else if value > self.upper {
            Band::High
        } else {
            Band::Middle
        }
    }
}

/// Lower is better: cheap per lease year or per square metre, or low risk.
fn tier_for(terciles: Option<Terciles>, value: f64) -> Tier {
    match terciles.map(|cuts| cuts.band(value)) {
        Some(Band::Low) => Tier::Good,
        Some(Band::High) => Tier::Bad,
        Some(Band::Middle) | None => Tier::Average,
    }
}

/// Population statistics of one eligible set, reused for every unit on the page.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    population: usize,
    model_counts: HashMap<String, usize>,
    lease_value: Option<Terciles>,
    size_value: Option<Terciles>,
    resale_risk: Option<Terciles>,
}

impl TierClassifier {
    pub fn from_units(units: &[&Unit]) -> Self {
        let population = units.len();
        let mut model_counts: HashMap<String, usize> = HashMap::new();
        for unit in units {
            *model_counts.entry(normalize_label(&unit.flat_model)).or_default() += 1;
        }

        let mut classifier = Self {
            population,
            model_counts,
            lease_value: None,
            size_value: None,
            resale_risk: None,
        };

        if population < MIN_TIER_POPULATION {
            return classifier;
        }

        classifier.lease_value =
            Terciles::from_values(units.iter().map(|unit| price_per_lease_year(unit)).collect());
        classifier.size_value =
            Terciles::from_values(units.iter().map(|unit| price_per_sqm(unit)).collect());
        let risks = units.iter().map(|unit| classifier.risk_index(unit)).collect();
        classifier.resale_risk = Terciles::from_values(risks);

        classifier
    }

    pub fn model_share(&self, unit: &Unit) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        let count = self
            .model_counts
            .get(&normalize_label(&unit.flat_model))
            .copied()
            .unwrap_or(0);
        count as f64 / self.population as f64
    }

    pub fn risk_index(&self, unit: &Unit) -> f64 {
        resale_risk_index(unit, self.model_share(unit))
    }

    pub fn classify(&self, unit: &Unit) -> Tiers {
        if self.population < MIN_TIER_POPULATION {
            return Tiers::default();
        }

        Tiers {
            lease_value: tier_for(self.lease_value, price_per_lease_year(unit)),
            resale_risk: tier_for(self.resale_risk, self.risk_index(unit)),
            size_value: tier_for(self.size_value, price_per_sqm(unit)),
        }
    }
}

/// Classify one unit against its eligible set.
pub fn classify(unit: &Unit, eligible: &[&Unit]) -> Tiers {
    TierClassifier::from_units(eligible).classify(unit)
}
