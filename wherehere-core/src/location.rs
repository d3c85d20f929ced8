//! Validated WGS84 locations.
//!
//! A [`Location`] can only be built from in-range coordinates, so nothing
//! downstream ever computes a radius or distance from a bad position.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a latitude or longitude falls outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinate: latitude {lat} must lie in [-90, 90] and longitude {lon} in [-180, 180]")]
pub struct InvalidCoordinateError {
    /// Rejected latitude.
    pub lat: f64,
    /// Rejected longitude.
    pub lon: f64,
}

/// A point on the earth's surface in degrees.
///
/// # Examples
/// ```
/// use wherehere_core::Location;
///
/// let seoul = Location::new(37.4979, 127.0276).expect("valid coordinates");
/// assert_eq!(seoul.lat(), 37.4979);
/// assert!(Location::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct Location {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawLocation {
    lat: f64,
    lon: f64,
}

impl Location {
    /// Validate and construct a [`Location`].
    ///
    /// # Errors
    /// Returns [`InvalidCoordinateError`] when either value is out of range
    /// or not finite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinateError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(Self { lat, lon })
        } else {
            Err(InvalidCoordinateError { lat, lon })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Return the location as a `geo` point (`x = longitude`).
    #[must_use]
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// # Examples
    /// ```
    /// use wherehere_core::Location;
    ///
    /// let a = Location::new(37.4979, 127.0276).expect("valid");
    /// let b = Location::new(37.4985, 127.0301).expect("valid");
    /// let metres = a.distance_to(&b);
    /// assert!(metres > 200.0 && metres < 250.0);
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        Haversine.distance(self.to_point(), other.to_point())
    }
}

impl TryFrom<RawLocation> for Location {
    type Error = InvalidCoordinateError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl From<Location> for RawLocation {
    fn from(location: Location) -> Self {
        Self {
            lat: location.lat,
            lon: location.lon,
        }
    }
}
