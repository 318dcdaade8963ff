use std::cmp::Ordering;

use super::domain::SortKey;
use crate::catalog::Unit;

/// An eligible unit paired with its match score, ready for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub unit: &'a Unit,
    pub score: f64,
}

/// A candidate placed in the full ordering; `rank` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    pub unit: &'a Unit,
    pub score: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage<'a> {
    pub entries: Vec<RankedEntry<'a>>,
    pub total_found: usize,
}

fn compare(sort: SortKey, left: &Candidate<'_>, right: &Candidate<'_>) -> Ordering {
    let (a, b) = (left.unit, right.unit);
    let primary = match sort {
        SortKey::Recommended => right
            .score
            .total_cmp(&left.score)
            .then_with(|| a.resale_price.cmp(&b.resale_price)),
        SortKey::PriceAsc => a.resale_price.cmp(&b.resale_price),
        SortKey::PriceDesc => b.resale_price.cmp(&a.resale_price),
        SortKey::AreaDesc => b.floor_area_sqm.total_cmp(&a.floor_area_sqm),
        SortKey::StoreyDesc => b.storey_floor().cmp(&a.storey_floor()),
        SortKey::MrtAsc => match (a.dist_mrt_km, b.dist_mrt_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };

    primary.then_with(|| a.identity_cmp(b))
}

pub fn sort_candidates(candidates: &mut [Candidate<'_>], sort: SortKey) {
    candidates.sort_by(|left, right| compare(sort, left, right));
}

/// Order every candidate, then cut out page `page` (1-based) of `page_size` entries.
/// Pages past the end are empty; `total_found` always counts the whole eligible set.
pub fn rank_and_page<'a>(
    mut candidates: Vec<Candidate<'a>>,
    sort: SortKey,
    page: usize,
    page_size: usize,
) -> RankedPage<'a> {
    let total_found = candidates.len();
    sort_candidates(&mut candidates, sort);

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let entries = candidates
        .into_iter()
        .enumerate()
        .skip(start)
        .take(page_size)
        .map(|(index, candidate)| RankedEntry {
            unit: candidate.unit,
            score: candidate.score,
            rank: index + 1,
        })
        .collect();

    RankedPage {
        entries,
        total_found,
    }
}
