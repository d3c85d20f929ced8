//! Role-aware recommendation pipeline.

use std::sync::{Mutex, PoisonError};

use log::debug;
use serde::{Deserialize, Serialize};
use wherehere_core::{
    CandidateSource, RandomSource, RecommendError, RecommendationRequest, RecommendationResult,
    RecommendationStatus, RecommendedPlace, Recommender, SeededRandom,
};
use wherehere_scorer::{
    RadiusCalculator, RankSelector, ScoringConfig, ScoringContext, ScoringEngine, ScoringError,
};

/// Configuration for [`RoleRecommender`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Maximum number of places requested from the candidate source.
    pub candidate_limit: usize,
    /// Scoring weights and constants.
    pub scoring: ScoringConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 100,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Recommender that ranks places around a user by role fit.
///
/// `S` supplies candidates and `R` supplies exploration noise for requests
/// that carry no seed. The random source sits behind a mutex so that a
/// shared recommender can serve concurrent requests.
///
/// # Examples
/// ```
/// use wherehere_core::{
///     FixedRandom, MemoryCandidateSource, RecommendationRequest, RecommendationStatus,
///     Recommender, Role, test_support::{gangnam_places, gangnam_station},
/// };
/// use wherehere_recommender::RoleRecommender;
///
/// let recommender = RoleRecommender::new(
///     MemoryCandidateSource::with_places(gangnam_places()),
///     FixedRandom::new(0.0),
/// );
/// let request = RecommendationRequest::new(Role::Healer, gangnam_station());
/// let result = recommender.recommend(&request).expect("in-memory source");
/// assert_eq!(result.status, RecommendationStatus::Ranked);
/// assert_eq!(result.items.len(), 3);
/// ```
#[derive(Debug)]
pub struct RoleRecommender<S, R>
where
    S: CandidateSource,
    R: RandomSource,
{
    source: S,
    random: Mutex<R>,
    engine: ScoringEngine,
    config: RecommenderConfig,
}

impl<S, R> RoleRecommender<S, R>
where
    S: CandidateSource,
    R: RandomSource,
{
    /// Create a recommender with the default configuration.
    #[must_use]
    pub fn new(source: S, random: R) -> Self {
        Self {
            source,
            random: Mutex::new(random),
            engine: ScoringEngine::default(),
            config: RecommenderConfig::default(),
        }
    }

    /// Create a recommender with a custom configuration.
    ///
    /// # Errors
    /// Returns [`ScoringError`] when the scoring configuration is unusable.
    pub fn with_config(
        source: S,
        random: R,
        config: RecommenderConfig,
    ) -> Result<Self, ScoringError> {
        Ok(Self {
            source,
            random: Mutex::new(random),
            engine: ScoringEngine::new(config.scoring)?,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Candidate source backing the recommender.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S, R> Recommender for RoleRecommender<S, R>
where
    S: CandidateSource,
    R: RandomSource,
{
    type SourceError = S::Error;

    fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendError<Self::SourceError>> {
        let level = request.level();
        let radius = RadiusCalculator::compute_radius(request.role, level);
        let candidates = self
            .source
            .find_within_radius(request.location, radius, self.config.candidate_limit)
            .map_err(RecommendError::Source)?;

        let user = request.user_id.as_deref().unwrap_or("anonymous");
        if candidates.is_empty() {
            debug!(
                "no candidates within {radius} m for {user} ({}, level {level})",
                request.role
            );
            return Ok(RecommendationResult::empty(request.role, radius));
        }

        let context = ScoringContext {
            role: request.role,
            level,
            mood: request.mood.clone(),
            weather: request.weather,
            time_of_day: request.time_of_day,
        };
        let scored = match request.seed {
            Some(seed) => {
                self.engine
                    .score_all(&candidates, &context, &mut SeededRandom::new(seed))
            }
            None => {
                let mut shared = self.random.lock().unwrap_or_else(PoisonError::into_inner);
                self.engine.score_all(&candidates, &context, &mut *shared)
            }
        };

        let total_candidates = candidates.len();
        let items: Vec<RecommendedPlace> = RankSelector::select(scored, request.top_k)
            .into_iter()
            .map(RecommendedPlace::from)
            .collect();
        debug!(
            "ranked {total_candidates} candidates within {radius} m for {user}; returning {}",
            items.len()
        );

        Ok(RecommendationResult {
            role: request.role,
            items,
            radius_used: radius,
            total_candidates,
            status: RecommendationStatus::Ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use thiserror::Error;
    use wherehere_core::test_support::{gangnam_places, gangnam_station};
    use wherehere_core::{
        Candidate, EmptyCandidateSource, FixedRandom, Location, MemoryCandidateSource, Mood, Role,
    };

    #[derive(Debug, Error)]
    #[error("index offline")]
    struct OfflineError;

    struct OfflineSource;

    impl CandidateSource for OfflineSource {
        type Error = OfflineError;

        fn find_within_radius(
            &self,
            _center: Location,
            _radius_meters: u32,
            _limit: usize,
        ) -> Result<Vec<Candidate>, Self::Error> {
            Err(OfflineError)
        }
    }

    #[fixture]
    fn recommender() -> RoleRecommender<MemoryCandidateSource, FixedRandom> {
        RoleRecommender::new(
            MemoryCandidateSource::with_places(gangnam_places()),
            FixedRandom::new(0.0),
        )
    }

    fn tired_healer() -> RecommendationRequest {
        let mut request = RecommendationRequest::new(Role::Healer, gangnam_station());
        request.mood = Some(Mood::new("지침", 0.8));
        request
    }

    #[rstest]
    fn empty_neighbourhood_is_a_typed_result() {
        let recommender = RoleRecommender::new(EmptyCandidateSource, FixedRandom::new(0.0));
        let request = RecommendationRequest::new(Role::Explorer, gangnam_station());
        let result = recommender.recommend(&request).expect("empty source");
        assert_eq!(result.status, RecommendationStatus::NoCandidatesInRadius);
        assert_eq!(result.total_candidates, 0);
        assert!(result.items.is_empty());
        assert_eq!(result.radius_used, 3_520);
    }

    #[rstest]
    fn ranks_places_inside_the_radius(
        recommender: RoleRecommender<MemoryCandidateSource, FixedRandom>,
    ) {
        let result = recommender.recommend(&tired_healer()).expect("ranked");
        assert_eq!(result.status, RecommendationStatus::Ranked);
        assert_eq!(result.radius_used, 939);
        assert_eq!(result.total_candidates, 3);
        let ids: Vec<_> = result.items.iter().map(|item| item.place_id.as_str()).collect();
        assert_eq!(ids, ["quiet-cafe", "hidden-gallery", "crowded-pub"]);
        assert!(result.items.is_sorted_by(|a, b| a.score >= b.score));
    }

    #[rstest]
    fn top_k_limits_the_items(recommender: RoleRecommender<MemoryCandidateSource, FixedRandom>) {
        let mut request = tired_healer();
        request.top_k = 1;
        let result = recommender.recommend(&request).expect("ranked");
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total_candidates, 3);
    }

    #[rstest]
    fn seeded_requests_are_reproducible(
        recommender: RoleRecommender<MemoryCandidateSource, FixedRandom>,
    ) {
        let mut request = tired_healer();
        request.seed = Some(42);
        let first = recommender.recommend(&request).expect("ranked");
        let second = recommender.recommend(&request).expect("ranked");
        assert_eq!(first, second);
    }

    #[rstest]
    fn source_errors_propagate() {
        let recommender = RoleRecommender::new(OfflineSource, FixedRandom::new(0.0));
        let request = RecommendationRequest::new(Role::Healer, gangnam_station());
        let err = recommender.recommend(&request).expect_err("source is offline");
        assert!(matches!(err, RecommendError::Source(OfflineError)));
    }

    #[rstest]
    fn candidate_limit_caps_the_source_query() {
        let config = RecommenderConfig {
            candidate_limit: 2,
            ..RecommenderConfig::default()
        };
        let recommender = RoleRecommender::with_config(
            MemoryCandidateSource::with_places(gangnam_places()),
            FixedRandom::new(0.0),
            config,
        )
        .expect("valid config");
        let result = recommender.recommend(&tired_healer()).expect("ranked");
        assert_eq!(result.total_candidates, 2);
    }

    #[rstest]
    fn invalid_scoring_config_is_rejected() {
        let mut config = RecommenderConfig::default();
        config.scoring.weights.category = f64::NAN;
        let outcome =
            RoleRecommender::with_config(EmptyCandidateSource, FixedRandom::new(0.0), config);
        assert!(outcome.is_err());
    }

    #[rstest]
    fn config_deserialises_with_defaults() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{"candidate_limit": 25}"#).expect("valid config");
        assert_eq!(config.candidate_limit, 25);
        assert_eq!(config.scoring, ScoringConfig::default());
    }
}
