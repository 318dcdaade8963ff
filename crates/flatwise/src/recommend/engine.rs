use tracing::debug;

use super::domain::{InsightSummary, RecommendRequest, RecommendationPage, RecommendationView};
use super::filter::filter;
use super::insight::compose;
use super::ranking::{rank_and_page, Candidate};
use super::scoring::{PriorityWeights, ScoringPool};
use super::tiers::TierClassifier;
use super::RecommendError;
use crate::catalog::CatalogSnapshot;

/// Run one request against a snapshot. Pure: the result depends only on the arguments.
pub fn recommend(
    snapshot: &CatalogSnapshot,
    request: &RecommendRequest,
    page_size: usize,
) -> Result<RecommendationPage, RecommendError> {
    let constraints = request.constraints.validate()?;
    let page = validate_page(request.page)?;
    if page_size == 0 {
        return Err(RecommendError::invalid("page_size", "must be at least 1"));
    }

    let eligible = filter(snapshot.units(), &constraints);
    let weights = PriorityWeights::for_priority(request.priority);
    let pool = ScoringPool::from_units(&eligible);

    let candidates = eligible
        .iter()
        .map(|&unit| Candidate {
            unit,
            score: pool.score(unit, &weights).total,
        })
        .collect();
    let ranked = rank_and_page(candidates, request.sort, page, page_size);

    // tiers need the whole eligible set but are only composed for the page being returned
    let classifier = TierClassifier::from_units(&eligible);
    let recommendations = ranked
        .entries
        .iter()
        .map(|entry| {
            let tiers = classifier.classify(entry.unit);
            let insight = InsightSummary {
                tiers,
                text: compose(entry.score, &tiers),
            };
            RecommendationView::from_unit(entry.unit, entry.score, entry.rank, insight)
        })
        .collect::<Vec<_>>();

    debug!(
        snapshot = %snapshot.version(),
        priority = request.priority.label(),
        sort = request.sort.label(),
        page,
        total_found = ranked.total_found,
        returned = recommendations.len(),
        "recommendation page computed"
    );

    Ok(RecommendationPage {
        recommendations,
        total_found: ranked.total_found,
        page,
        page_size,
        snapshot_version: snapshot.version(),
    })
}

fn validate_page(page: i64) -> Result<usize, RecommendError> {
    if page < 1 {
        return Err(RecommendError::invalid(
            "page",
            format!("must be 1 or greater (got {page})"),
        ));
    }
    usize::try_from(page)
        .map_err(|_| RecommendError::invalid("page", format!("{page} is out of range")))
}
