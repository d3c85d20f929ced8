//! Recommendation requests, responses and the [`Recommender`] seam.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CrowdLevel, Factor, Location, MAX_LEVEL, MIN_LEVEL, Mood, Role, ScoredCandidate, TimeSlot,
    Weather,
};

/// Number of items returned when a request does not say.
pub const DEFAULT_TOP_K: usize = 3;

/// Everything needed to produce one set of recommendations.
///
/// # Examples
/// ```
/// use wherehere_core::{RecommendationRequest, Role};
///
/// let request: RecommendationRequest = serde_json::from_str(
///     r#"{"role": "healer", "user_level": 7, "location": {"lat": 37.5, "lon": 127.0}}"#,
/// )
/// .expect("valid request");
/// assert_eq!(request.role, Role::Healer);
/// assert_eq!(request.top_k, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Requesting user, used only for logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Declared behavioural role.
    pub role: Role,
    /// Progression level; values outside `1..=50` are clamped.
    #[serde(default = "default_level")]
    pub user_level: i64,
    /// Query point.
    pub location: Location,
    /// Current mood.
    #[serde(default)]
    pub mood: Option<Mood>,
    /// Current weather.
    #[serde(default)]
    pub weather: Option<Weather>,
    /// Current time slot.
    #[serde(default)]
    pub time_of_day: Option<TimeSlot>,
    /// Maximum number of items to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Seed for reproducible exploration noise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

const fn default_level() -> i64 {
    1
}

const fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl RecommendationRequest {
    /// Construct a request with default level, context and `top_k`.
    #[must_use]
    pub const fn new(role: Role, location: Location) -> Self {
        Self {
            user_id: None,
            role,
            user_level: 1,
            location,
            mood: None,
            weather: None,
            time_of_day: None,
            top_k: DEFAULT_TOP_K,
            seed: None,
        }
    }

    /// Level clamped into `1..=50`.
    #[must_use]
    pub fn level(&self) -> u8 {
        let clamped = self
            .user_level
            .clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL));
        u8::try_from(clamped).unwrap_or(MAX_LEVEL)
    }
}

/// Outcome category of a recommendation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    /// Candidates were found and ranked.
    Ranked,
    /// The candidate source returned nothing inside the radius.
    NoCandidatesInRadius,
}

/// One ranked place as presented to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPlace {
    /// Source identifier.
    pub place_id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Primary category.
    pub category: Option<String>,
    /// Distance from the query point in metres.
    pub distance_meters: f64,
    /// Final score.
    pub score: f64,
    /// Per-factor contributions keyed by factor name.
    pub score_breakdown: BTreeMap<Factor, f64>,
    /// Why the place was chosen.
    pub reason: String,
    /// Average spend per person in KRW.
    pub estimated_cost: Option<u32>,
    /// Atmosphere tags.
    pub vibe_tags: Vec<String>,
    /// Average visitor rating.
    pub rating: Option<f32>,
    /// Whether the place is a hidden gem.
    pub is_hidden_gem: bool,
    /// Typical crowding.
    pub crowd_level: Option<CrowdLevel>,
}

impl From<ScoredCandidate> for RecommendedPlace {
    fn from(scored: ScoredCandidate) -> Self {
        let ScoredCandidate {
            candidate,
            final_score,
            breakdown,
            reason,
            ..
        } = scored;
        Self {
            place_id: candidate.id,
            name: candidate.name,
            address: candidate.address,
            category: candidate.primary_category,
            distance_meters: candidate.distance_meters,
            score: final_score,
            score_breakdown: breakdown,
            reason,
            estimated_cost: candidate.average_price,
            vibe_tags: candidate.vibe_tags.into_iter().collect(),
            rating: candidate.average_rating,
            is_hidden_gem: candidate.is_hidden_gem,
            crowd_level: candidate.crowd_level,
        }
    }
}

/// Ranked places plus bookkeeping about the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Role the ranking was computed for.
    pub role: Role,
    /// Places in rank order.
    pub items: Vec<RecommendedPlace>,
    /// Search radius in metres.
    pub radius_used: u32,
    /// Candidates returned by the source before ranking.
    pub total_candidates: usize,
    /// Outcome category.
    pub status: RecommendationStatus,
}

impl RecommendationResult {
    /// Result for a search that found nothing.
    #[must_use]
    pub const fn empty(role: Role, radius_used: u32) -> Self {
        Self {
            role,
            items: Vec::new(),
            radius_used,
            total_candidates: 0,
            status: RecommendationStatus::NoCandidatesInRadius,
        }
    }
}

/// Errors raised while producing recommendations.
#[derive(Debug, Error)]
pub enum RecommendError<E>
where
    E: std::error::Error + 'static,
{
    /// The candidate source failed.
    #[error("candidate source failed: {0}")]
    Source(#[source] E),
}

/// Produce recommendations for a request.
pub trait Recommender {
    /// Failure raised by the underlying candidate source.
    type SourceError: std::error::Error + Send + Sync + 'static;

    /// Rank places around the request location.
    ///
    /// # Errors
    /// Returns [`RecommendError::Source`] when the candidate source fails.
    fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendError<Self::SourceError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candidate;
    use rstest::rstest;

    fn request_json(level: i64) -> String {
        format!(
            r#"{{"role": "explorer", "user_level": {level}, "location": {{"lat": 37.5, "lon": 127.0}}}}"#
        )
    }

    #[rstest]
    #[case(-3, 1)]
    #[case(0, 1)]
    #[case(7, 7)]
    #[case(80, 50)]
    fn level_is_clamped(#[case] raw: i64, #[case] expected: u8) {
        let request: RecommendationRequest =
            serde_json::from_str(&request_json(raw)).expect("valid request");
        assert_eq!(request.level(), expected);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let json = r#"{"role": "wizard", "location": {"lat": 37.5, "lon": 127.0}}"#;
        assert!(serde_json::from_str::<RecommendationRequest>(json).is_err());
    }

    #[rstest]
    fn out_of_range_location_is_rejected() {
        let json = r#"{"role": "healer", "location": {"lat": 91.0, "lon": 127.0}}"#;
        assert!(serde_json::from_str::<RecommendationRequest>(json).is_err());
    }

    #[rstest]
    fn scored_candidate_maps_to_response_item() {
        let scored = ScoredCandidate {
            candidate: Candidate::new("p-1", "Seoul Forest", 200.0)
                .with_category("공원")
                .with_vibe("quiet")
                .with_price(5_000),
            final_score: 63.5,
            breakdown: BTreeMap::from([(Factor::Category, 100.0)]),
            reason: String::from("reason"),
            defects: Vec::new(),
        };
        let item = RecommendedPlace::from(scored);
        assert_eq!(item.place_id, "p-1");
        assert_eq!(item.category.as_deref(), Some("공원"));
        assert_eq!(item.estimated_cost, Some(5_000));
        assert_eq!(item.vibe_tags, ["quiet"]);
    }

    #[rstest]
    fn empty_result_reports_status() {
        let result = RecommendationResult::empty(Role::Healer, 800);
        let json = serde_json::to_value(&result).expect("serialise");
        assert_eq!(json["status"], "no_candidates_in_radius");
        assert_eq!(json["total_candidates"], 0);
    }
}
