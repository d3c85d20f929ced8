//! SQLite-backed candidate source with an in-memory R\*-tree.
//!
//! Places are read once from the `places` table when the source is opened
//! and bulk-loaded into an `rstar` tree keyed by longitude/latitude. Radius
//! queries first cut a bounding box out of the tree and then keep the places
//! whose haversine distance lies inside the radius.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rstar::{AABB, RTree, RTreeObject};
use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use super::{CandidateSource, METRES_PER_DEGREE, nearest_first};
use crate::{Candidate, CrowdLevel, InvalidCoordinateError, Location, PriceTier};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS places (
    place_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    primary_category TEXT,
    secondary_categories TEXT NOT NULL DEFAULT '[]',
    price_tier TEXT,
    average_price INTEGER,
    vibe_tags TEXT NOT NULL DEFAULT '[]',
    average_rating REAL,
    is_hidden_gem INTEGER NOT NULL DEFAULT 0,
    crowd_level TEXT,
    is_active INTEGER NOT NULL DEFAULT 1
)";

const SELECT_SQL: &str = "SELECT place_id, name, address, lat, lon, primary_category, \
     secondary_categories, price_tier, average_price, vibe_tags, average_rating, \
     is_hidden_gem, crowd_level FROM places WHERE is_active = 1 ORDER BY place_id";

const INSERT_SQL: &str = "INSERT OR REPLACE INTO places (place_id, name, address, lat, lon, \
     primary_category, secondary_categories, price_tier, average_price, vibe_tags, \
     average_rating, is_hidden_gem, crowd_level) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

/// Error raised while opening or writing a SQLite place store.
#[derive(Debug, Error)]
pub enum SqliteCandidateSourceError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A JSON list column could not be decoded.
    #[error("failed to parse {column} for place {id}: {source}")]
    InvalidList {
        /// Identifier of the affected place.
        id: String,
        /// Column holding the malformed payload.
        column: &'static str,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored coordinate was out of range.
    #[error("place {id} has an invalid position: {source}")]
    InvalidPosition {
        /// Identifier of the affected place.
        id: String,
        /// Validation failure.
        #[source]
        source: InvalidCoordinateError,
    },
    /// A place passed to [`SqliteCandidateSource::persist`] had no location.
    #[error("place {id} cannot be stored without a location")]
    MissingLocation {
        /// Identifier of the affected place.
        id: String,
    },
    /// Generic SQLite error when reading or writing rows.
    #[error("database error: {source}")]
    Database {
        /// Source error raised by the SQLite driver.
        #[from]
        source: rusqlite::Error,
    },
}

#[derive(Debug, Clone)]
struct IndexedPlace {
    position: [f64; 2],
    candidate: Candidate,
}

impl RTreeObject for IndexedPlace {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Read-only candidate source backed by a SQLite `places` table.
#[derive(Debug)]
pub struct SqliteCandidateSource {
    index: RTree<IndexedPlace>,
}

impl SqliteCandidateSource {
    /// Open the database read-only and index every active place.
    ///
    /// # Errors
    /// Returns [`SqliteCandidateSourceError`] when the database cannot be
    /// opened or a row holds malformed data.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteCandidateSourceError> {
        let path = database_path.as_ref().to_path_buf();
        let connection = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCandidateSourceError::OpenDatabase {
                path: path.clone(),
                source,
            })?;
        let places = load_places(&connection)?;
        debug!("indexed {} places from {}", places.len(), path.display());
        Ok(Self {
            index: RTree::bulk_load(places),
        })
    }

    /// Write places into the `places` table, creating it when missing.
    ///
    /// # Errors
    /// Returns [`SqliteCandidateSourceError`] when the database cannot be
    /// opened or written, or a place has no location.
    pub fn persist<P: AsRef<Path>>(
        database_path: P,
        places: &[Candidate],
    ) -> Result<(), SqliteCandidateSourceError> {
        let path = database_path.as_ref().to_path_buf();
        let mut connection =
            Connection::open(&path).map_err(|source| SqliteCandidateSourceError::OpenDatabase {
                path: path.clone(),
                source,
            })?;
        connection.execute(SCHEMA_SQL, [])?;
        let transaction = connection.transaction()?;
        {
            let mut statement = transaction.prepare(INSERT_SQL)?;
            for place in places {
                let location =
                    place
                        .location
                        .ok_or_else(|| SqliteCandidateSourceError::MissingLocation {
                            id: place.id.clone(),
                        })?;
                statement.execute(params![
                    place.id,
                    place.name,
                    place.address,
                    location.lat(),
                    location.lon(),
                    place.primary_category,
                    encode_list(&place.secondary_categories),
                    place.price_tier.map(price_tier_name),
                    place.average_price,
                    encode_list(&place.vibe_tags),
                    place.average_rating,
                    place.is_hidden_gem,
                    place.crowd_level.map(crowd_level_name),
                ])?;
            }
        }
        transaction.commit()?;
        Ok(())
    }

    /// Number of indexed places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.size()
    }

    /// Report whether no places are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }
}

impl CandidateSource for SqliteCandidateSource {
    type Error = SqliteCandidateSourceError;

    fn find_within_radius(
        &self,
        center: Location,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<Candidate>, Self::Error> {
        let radius = f64::from(radius_meters);
        let within = search_envelopes(center, radius)
            .iter()
            .flat_map(|envelope| self.index.locate_in_envelope_intersecting(envelope))
            .filter_map(|entry| {
                let location = entry.candidate.location?;
                let distance = center.distance_to(&location);
                (distance <= radius).then(|| Candidate {
                    distance_meters: distance,
                    ..entry.candidate.clone()
                })
            })
            .collect();
        Ok(nearest_first(within, limit))
    }
}

/// Bounding boxes covering `radius` metres around `center`.
///
/// A box that crosses the antimeridian is split into one box on each side so
/// that longitudes stay inside `[-180, 180]`.
#[expect(
    clippy::float_arithmetic,
    reason = "bounding boxes convert metres into degrees"
)]
fn search_envelopes(center: Location, radius: f64) -> Vec<AABB<[f64; 2]>> {
    let lat_delta = radius / METRES_PER_DEGREE;
    let south = center.lat() - lat_delta;
    let north = center.lat() + lat_delta;
    let cos_lat = center.lat().to_radians().cos();
    // Near the poles every longitude is in range.
    let lon_delta = if cos_lat > 1e-6 {
        radius / (METRES_PER_DEGREE * cos_lat)
    } else {
        180.0
    };
    let west = center.lon() - lon_delta;
    let east = center.lon() + lon_delta;
    let band = |from: f64, to: f64| AABB::from_corners([from, south], [to, north]);

    if lon_delta >= 180.0 {
        vec![band(-180.0, 180.0)]
    } else if west < -180.0 {
        vec![band(west + 360.0, 180.0), band(-180.0, east)]
    } else if east > 180.0 {
        vec![band(west, 180.0), band(-180.0, east - 360.0)]
    } else {
        vec![band(west, east)]
    }
}

fn load_places(connection: &Connection) -> Result<Vec<IndexedPlace>, SqliteCandidateSourceError> {
    let mut statement = connection.prepare(SELECT_SQL)?;
    let mut rows = statement.query([])?;
    let mut places = Vec::new();

    while let Some(row) = rows.next()? {
        let id: String = row.get(0)?;
        let lat: f64 = row.get(3)?;
        let lon: f64 = row.get(4)?;
        let location = Location::new(lat, lon).map_err(|source| {
            SqliteCandidateSourceError::InvalidPosition {
                id: id.clone(),
                source,
            }
        })?;
        let secondary_json: String = row.get(6)?;
        let vibe_json: String = row.get(9)?;
        let price_tier: Option<String> = row.get(7)?;
        let crowd_level: Option<String> = row.get(12)?;

        let candidate = Candidate {
            name: row.get(1)?,
            address: row.get(2)?,
            primary_category: row.get(5)?,
            secondary_categories: decode_list(&id, "secondary_categories", &secondary_json)?,
            price_tier: price_tier.as_deref().and_then(|tier| parse_price_tier(&id, tier)),
            average_price: row.get(8)?,
            vibe_tags: decode_list::<BTreeSet<String>>(&id, "vibe_tags", &vibe_json)?,
            average_rating: row.get(10)?,
            is_hidden_gem: row.get(11)?,
            crowd_level: crowd_level
                .as_deref()
                .and_then(|level| parse_crowd_level(&id, level)),
            distance_meters: 0.0,
            location: Some(location),
            id,
        };
        places.push(IndexedPlace {
            position: [lon, lat],
            candidate,
        });
    }

    Ok(places)
}

fn decode_list<T: serde::de::DeserializeOwned>(
    id: &str,
    column: &'static str,
    json: &str,
) -> Result<T, SqliteCandidateSourceError> {
    serde_json::from_str(json).map_err(|source| SqliteCandidateSourceError::InvalidList {
        id: id.to_owned(),
        column,
        source,
    })
}

fn encode_list<T: serde::Serialize>(values: &T) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}

fn parse_price_tier(id: &str, raw: &str) -> Option<PriceTier> {
    match raw {
        "free" => Some(PriceTier::Free),
        "low" => Some(PriceTier::Low),
        "medium" => Some(PriceTier::Medium),
        "high" => Some(PriceTier::High),
        other => {
            warn!("place {id} has unknown price tier '{other}'");
            None
        }
    }
}

const fn price_tier_name(tier: PriceTier) -> &'static str {
    match tier {
        PriceTier::Free => "free",
        PriceTier::Low => "low",
        PriceTier::Medium => "medium",
        PriceTier::High => "high",
    }
}

fn parse_crowd_level(id: &str, raw: &str) -> Option<CrowdLevel> {
    match raw {
        "low" => Some(CrowdLevel::Low),
        "medium" => Some(CrowdLevel::Medium),
        "high" => Some(CrowdLevel::High),
        other => {
            warn!("place {id} has unknown crowd level '{other}'");
            None
        }
    }
}

const fn crowd_level_name(level: CrowdLevel) -> &'static str {
    match level {
        CrowdLevel::Low => "low",
        CrowdLevel::Medium => "medium",
        CrowdLevel::High => "high",
    }
}
