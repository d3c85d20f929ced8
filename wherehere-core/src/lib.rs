//! Core domain types for the WhereHere engine.
//!
//! The crate defines the vocabulary shared by every other workspace member:
//! - **Roles and their profiles.** [`Role`] is a closed enum and
//!   [`RoleCatalog`] maps each variant to a compiled-in [`RoleProfile`].
//! - **Places.** A [`Candidate`] is what a [`CandidateSource`] returns for a
//!   radius query; scoring turns it into a [`ScoredCandidate`].
//! - **Requests and responses** for the [`Recommender`] seam.
//! - **Progression state** ([`UserProgression`]) and the
//!   [`ProgressionStore`] that owns it.
//! - **Injectable randomness** through [`RandomSource`].
//!
//! Constructors validate early: a [`Location`] cannot hold out-of-range
//! coordinates and role names outside the five variants are rejected.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod catalog;
mod location;
mod mood;
mod progression;
mod random;
mod request;
mod role;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(all(docsrs, not(test)), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{
    Candidate, CandidateDefect, CrowdLevel, Factor, PriceTier, ScoreBreakdown, ScoredCandidate,
};
pub use catalog::{RoleCatalog, RoleProfile, SlotWeights, WeatherWeights};
pub use location::{InvalidCoordinateError, Location};
pub use mood::Mood;
pub use progression::{
    MAX_LEVEL, MIN_LEVEL, MemoryProgressionStore, ProgressionStore, UserProgression,
};
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use request::{
    DEFAULT_TOP_K, RecommendError, RecommendationRequest, RecommendationResult,
    RecommendationStatus, RecommendedPlace, Recommender,
};
pub use role::{Role, TimeSlot, UnknownRoleError, Weather};
pub use source::{CandidateSource, EmptyCandidateSource, MemoryCandidateSource};
#[cfg(feature = "store-sqlite")]
pub use source::{SqliteCandidateSource, SqliteCandidateSourceError};
