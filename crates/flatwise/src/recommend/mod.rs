//! Recommendation engine: constraint filtering, weighted scoring, tier classification,
//! insight text, and ranked pagination over a catalog snapshot.
//!
//! Every request is evaluated from scratch against one immutable snapshot; nothing is cached
//! between calls. Callers that page through results pass back the `snapshot_version` from the
//! first page so a catalog refresh mid-session is detected instead of silently reordering pages.

pub mod domain;
pub mod engine;
pub mod filter;
pub mod insight;
pub mod ranking;
pub mod router;
pub mod scoring;
pub mod service;
pub mod tiers;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;

use crate::catalog::SnapshotVersion;

pub use domain::{
    ConstraintSet, Constraints, InsightSummary, Priority, RecommendRequest, RecommendationPage,
    RecommendationView, SortKey, Tier, Tiers,
};
pub use engine::recommend;
pub use filter::filter;
pub use insight::compose;
pub use ranking::{rank_and_page, Candidate, RankedEntry, RankedPage};
pub use router::recommendation_router;
pub use scoring::{score, PriorityWeights, ScoreBreakdown, ScoringPool};
pub use service::{RecommendationService, DEFAULT_PAGE_SIZE};
pub use tiers::{classify, resale_risk_index, TierClassifier};

/// Errors surfaced to callers. Empty results and pages past the end are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendError {
    #[error("invalid constraint `{field}`: {reason}")]
    InvalidConstraint { field: &'static str, reason: String },
    #[error("catalog snapshot unavailable; the unit catalog has not been loaded")]
    CatalogUnavailable,
    #[error("catalog changed during paging (session pinned to {requested}, current is {current}); restart the search")]
    SnapshotMismatch {
        requested: SnapshotVersion,
        current: SnapshotVersion,
    },
}

impl RecommendError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CatalogUnavailable | Self::SnapshotMismatch { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidConstraint { .. } => StatusCode::BAD_REQUEST,
            Self::CatalogUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::SnapshotMismatch { .. } => StatusCode::CONFLICT,
        }
    }
}
