//! Facade crate for the WhereHere recommendation engine.
//!
//! This crate re-exports the core domain types, the scoring and progression
//! systems, and exposes the recommender and SQLite store behind feature
//! flags.

#![forbid(unsafe_code)]

pub use wherehere_core::{
    Candidate, CandidateDefect, CandidateSource, CrowdLevel, EmptyCandidateSource, Factor,
    FixedRandom, InvalidCoordinateError, Location, MAX_LEVEL, MIN_LEVEL, MemoryCandidateSource,
    MemoryProgressionStore, Mood, PriceTier, ProgressionStore, RandomSource, RecommendError,
    RecommendationRequest, RecommendationResult, RecommendationStatus, RecommendedPlace,
    Recommender, Role, RoleCatalog, RoleProfile, ScoreBreakdown, ScoredCandidate, SeededRandom,
    TimeSlot, UnknownRoleError, UserProgression, Weather,
};

#[cfg(feature = "store-sqlite")]
pub use wherehere_core::{SqliteCandidateSource, SqliteCandidateSourceError};

pub use wherehere_scorer::{
    RadiusCalculator, RankSelector, ScoreWeights, ScoringConfig, ScoringContext, ScoringEngine,
    ScoringError,
};

pub use wherehere_progression::{
    Action, ActivityEvent, LevelTier, ProgressionError, ProgressionOutcome, ProgressionService,
    TierName, xp_for_action,
};

#[cfg(feature = "recommender")]
pub use wherehere_recommender::{RecommenderConfig, RoleRecommender};
