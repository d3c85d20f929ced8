//! Candidate retrieval.
//!
//! The [`CandidateSource`] trait is the only way the engine sees places. Two
//! implementations ship with the crate: [`MemoryCandidateSource`] for
//! fixtures and offline use, and (behind `store-sqlite`)
//! [`SqliteCandidateSource`], which answers radius queries from a SQLite
//! table indexed by an R\*-tree. Pick one when composing the engine.

use std::convert::Infallible;

use crate::{Candidate, Location};

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryCandidateSource;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCandidateSource, SqliteCandidateSourceError};

/// Metres per degree of latitude.
pub(crate) const METRES_PER_DEGREE: f64 = 111_000.0;

/// Look up places around a point.
///
/// Implementations return candidates whose `distance_meters` is populated
/// relative to `center`, sorted by ascending distance, and at most `limit`
/// of them. Containment includes places exactly on the radius.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use wherehere_core::{Candidate, CandidateSource, Location};
///
/// struct Nothing;
///
/// impl CandidateSource for Nothing {
///     type Error = Infallible;
///
///     fn find_within_radius(
///         &self,
///         _center: Location,
///         _radius_meters: u32,
///         _limit: usize,
///     ) -> Result<Vec<Candidate>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// let here = Location::new(37.5, 127.0).expect("valid");
/// assert!(Nothing.find_within_radius(here, 500, 10).unwrap_or_default().is_empty());
/// ```
pub trait CandidateSource: Send + Sync {
    /// Failure raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return up to `limit` places within `radius_meters` of `center`.
    ///
    /// # Errors
    /// Propagates failures of the backing store unchanged.
    fn find_within_radius(
        &self,
        center: Location,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, Self::Error>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    type Error = S::Error;

    fn find_within_radius(
        &self,
        center: Location,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, Self::Error> {
        (**self).find_within_radius(center, radius_meters, limit)
    }
}

/// Source that never returns anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCandidateSource;

impl CandidateSource for EmptyCandidateSource {
    type Error = Infallible;

    fn find_within_radius(
        &self,
        _center: Location,
        _radius_meters: u32,
        _limit: usize,
    ) -> Result<Vec<Candidate>, Self::Error> {
        Ok(Vec::new())
    }
}

/// Order candidates by ascending distance, keeping the first `limit`.
///
/// Equal distances keep their incoming order.
pub(crate) fn nearest_first(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    candidates.truncate(limit);
    candidates
}
