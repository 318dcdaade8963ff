use super::domain::Constraints;
use crate::catalog::{normalize_flat_type, normalize_label, Unit};

impl Constraints {
    /// True when every active predicate holds for `unit`.
    pub fn admits(&self, unit: &Unit) -> bool {
        if let Some(max_price) = self.max_price {
            if u64::from(unit.resale_price) > max_price {
                return false;
            }
        }

        if let Some(min_lease) = self.min_remaining_lease {
            if unit.remaining_lease_years < min_lease {
                return false;
            }
        }

        if let Some(max_distance) = self.max_mrt_distance {
            // proximity cannot be verified without a distance
            match unit.dist_mrt_km {
                Some(distance) if distance <= max_distance => {}
                _ => return false,
            }
        }

        if !self.storey_ranges.is_empty() && !self.storey_ranges.contains(&unit.storey_range) {
            return false;
        }

        if !self.towns.is_empty() && !self.towns.contains(&normalize_label(&unit.town)) {
            return false;
        }

        if !self.flat_types.is_empty()
            && !self.flat_types.contains(&normalize_flat_type(&unit.flat_type))
        {
            return false;
        }

        if !self.flat_models.is_empty()
            && !self.flat_models.contains(&normalize_label(&unit.flat_model))
        {
            return false;
        }

        true
    }

    pub fn is_unrestricted(&self) -> bool {
        self == &Constraints::default()
    }
}

/// Eligible subset of `units`, in catalog order.
pub fn filter<'a>(units: &'a [Unit], constraints: &Constraints) -> Vec<&'a Unit> {
    if constraints.is_unrestricted() {
        return units.iter().collect();
    }

    units.iter().filter(|unit| constraints.admits(unit)).collect()
}
