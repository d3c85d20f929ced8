//! In-memory candidate source used for fixtures and offline runs.

use std::convert::Infallible;

use log::warn;

use super::{CandidateSource, nearest_first};
use crate::{Candidate, Location};

/// Linear-scan [`CandidateSource`] over places held in memory.
///
/// Places must carry a [`Location`]; distances are computed with the
/// haversine formula relative to the query point. The store is intended for
/// small datasets.
///
/// # Examples
/// ```
/// use wherehere_core::{Candidate, CandidateSource, Location, MemoryCandidateSource};
///
/// let mut park = Candidate::new("p-1", "Seoul Forest", 0.0).with_category("공원");
/// park.location = Some(Location::new(37.5444, 127.0374).expect("valid"));
/// let source = MemoryCandidateSource::with_places([park]);
///
/// let center = Location::new(37.5444, 127.0374).expect("valid");
/// let found = source.find_within_radius(center, 100, 10).expect("infallible");
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCandidateSource {
    places: Vec<Candidate>,
}

impl MemoryCandidateSource {
    /// Build a source from places, dropping any without a location.
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        let located_places = places
            .into_iter()
            .filter(|place| {
                let located = place.location.is_some();
                if !located {
                    warn!("skipping place {} without a location", place.id);
                }
                located
            })
            .collect();
        Self {
            places: located_places,
        }
    }

    /// Number of places held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Report whether the source holds no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl CandidateSource for MemoryCandidateSource {
    type Error = Infallible;

    fn find_within_radius(
        &self,
        center: Location,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, Self::Error> {
        let radius = f64::from(radius_meters);
        let within = self
            .places
            .iter()
            .filter_map(|place| {
                let distance = center.distance_to(place.location.as_ref()?);
                (distance <= radius).then(|| Candidate {
                    distance_meters: distance,
                    ..place.clone()
                })
            })
            .collect();
        Ok(nearest_first(within, limit))
    }
}
