use super::domain::{Tier, Tiers};

fn headline(score: f64) -> &'static str {
    if score >= 9.0 {
        "Excellent overall match for all your criteria"
    } else if score >= 8.0 {
        "Strong match with premium features"
    } else if score >= 7.0 {
        "Good value proposition with key preferences met"
    } else if score >= 6.0 {
        "Solid option meeting most requirements"
    } else {
        "Meets essential criteria"
    }
}

// Ordered from most to least consequential for a buyer.
fn caution(tiers: &Tiers) -> Option<&'static str> {
    [
        (
            tiers.resale_risk,
            "elevated resale risk from lease decay or a less common flat model",
        ),
        (tiers.lease_value, "a high price for the lease remaining"),
        (tiers.size_value, "a high price per square metre"),
    ]
    .into_iter()
    .find(|(tier, _)| *tier == Tier::Bad)
    .map(|(_, phrase)| phrase)
}

fn highlight(tiers: &Tiers) -> Option<&'static str> {
    [
        (tiers.lease_value, "strong value for the lease remaining"),
        (tiers.size_value, "strong value per square metre"),
        (tiers.resale_risk, "low resale risk among these matches"),
    ]
    .into_iter()
    .find(|(tier, _)| *tier == Tier::Good)
    .map(|(_, phrase)| phrase)
}

/// Explanation text for a unit. Identical inputs always yield identical text.
pub fn compose(score: f64, tiers: &Tiers) -> String {
    let headline = headline(score);
    match (caution(tiers), highlight(tiers)) {
        (Some(phrase), _) => format!("{headline}. Watch for {phrase}."),
        (None, Some(phrase)) => format!("{headline}. Stands out for {phrase}."),
        (None, None) => format!("{headline}."),
    }
}
