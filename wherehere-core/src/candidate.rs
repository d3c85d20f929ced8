//! Places under consideration and their scored form.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Location;

/// Coarse price band reported by the candidate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// No entry fee.
    Free,
    /// Inexpensive.
    Low,
    /// Mid-range.
    Medium,
    /// Expensive.
    High,
}

impl PriceTier {
    /// Representative price in won for a place that only reports its tier.
    #[must_use]
    pub const fn typical_price(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Low => 8_000,
            Self::Medium => 17_000,
            Self::High => 40_000,
        }
    }
}

/// Typical crowding at a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    /// Rarely busy.
    Low,
    /// Sometimes busy.
    Medium,
    /// Usually busy.
    High,
}

/// A place returned by a [`CandidateSource`](crate::CandidateSource).
///
/// Every field except the identifier and distance is optional on the wire;
/// scoring substitutes documented defaults for anything missing.
///
/// # Examples
/// ```
/// use wherehere_core::Candidate;
///
/// let park = Candidate::new("p-1", "Seoul Forest", 200.0).with_category("공원");
/// assert_eq!(park.primary_category.as_deref(), Some("공원"));
/// assert!(park.is_free());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Main category, e.g. `공원`.
    #[serde(default)]
    pub primary_category: Option<String>,
    /// Additional categories.
    #[serde(default)]
    pub secondary_categories: Vec<String>,
    /// Price band.
    #[serde(default)]
    pub price_tier: Option<PriceTier>,
    /// Average spend per person in KRW.
    #[serde(default)]
    pub average_price: Option<u32>,
    /// Atmosphere tags such as `quiet` or `lively`.
    #[serde(default)]
    pub vibe_tags: BTreeSet<String>,
    /// Average visitor rating.
    #[serde(default)]
    pub average_rating: Option<f32>,
    /// Whether the place is a lesser-known, high-quality spot.
    #[serde(default)]
    pub is_hidden_gem: bool,
    /// Typical crowding.
    #[serde(default)]
    pub crowd_level: Option<CrowdLevel>,
    /// Distance from the query point in metres.
    #[serde(default)]
    pub distance_meters: f64,
    /// Position of the place, when known.
    #[serde(default)]
    pub location: Option<Location>,
}

impl Candidate {
    /// Construct a bare candidate with only the required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, distance_meters: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            primary_category: None,
            secondary_categories: Vec::new(),
            price_tier: None,
            average_price: None,
            vibe_tags: BTreeSet::new(),
            average_rating: None,
            is_hidden_gem: false,
            crowd_level: None,
            distance_meters,
            location: None,
        }
    }

    /// Set the primary category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.primary_category = Some(category.into());
        self
    }

    /// Add a secondary category while returning `self` for chaining.
    #[must_use]
    pub fn with_secondary(mut self, category: impl Into<String>) -> Self {
        self.secondary_categories.push(category.into());
        self
    }

    /// Set the average price while returning `self` for chaining.
    #[must_use]
    pub const fn with_price(mut self, price: u32) -> Self {
        self.average_price = Some(price);
        self
    }

    /// Add a vibe tag while returning `self` for chaining.
    #[must_use]
    pub fn with_vibe(mut self, tag: impl Into<String>) -> Self {
        self.vibe_tags.insert(tag.into());
        self
    }

    /// Mark the candidate as a hidden gem.
    #[must_use]
    pub const fn hidden_gem(mut self) -> Self {
        self.is_hidden_gem = true;
        self
    }

    /// Average price, or the typical price of the tier when only the tier is
    /// known.
    #[must_use]
    pub fn effective_price(&self) -> Option<u32> {
        self.average_price
            .or_else(|| self.price_tier.map(PriceTier::typical_price))
    }

    /// Report whether the place costs nothing to visit.
    ///
    /// A place with neither a price nor a tier counts as free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        matches!(self.price_tier, Some(PriceTier::Free))
            || self.effective_price().is_none_or(|price| price == 0)
    }
}

/// A named contribution to a candidate's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// How well the category suits the role.
    Category,
    /// Closeness to the user.
    Distance,
    /// Match between mood and atmosphere.
    Vibe,
    /// Affordability for the role.
    Cost,
    /// Flat weather nudge.
    WeatherBonus,
    /// Flat time-of-day nudge.
    TimeBonus,
    /// Flat hidden-gem bonus for experienced users.
    LevelBonus,
    /// Exploration noise.
    Random,
}

impl Factor {
    /// Return the factor identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Distance => "distance",
            Self::Vibe => "vibe",
            Self::Cost => "cost",
            Self::WeatherBonus => "weather_bonus",
            Self::TimeBonus => "time_bonus",
            Self::LevelBonus => "level_bonus",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor values in score-equivalent units.
pub type ScoreBreakdown = BTreeMap<Factor, f64>;

/// Missing or unusable data recovered while scoring a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateDefect {
    /// No primary category; the default category weight was used.
    MissingCategory,
    /// No price; the place was treated as free.
    MissingPrice,
    /// Distance was negative or not finite; the distance factor scored zero.
    InvalidDistance,
}

impl fmt::Display for CandidateDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingCategory => "missing primary category",
            Self::MissingPrice => "missing price",
            Self::InvalidDistance => "invalid distance",
        })
    }
}

/// A candidate together with its score, explanation and recovered defects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The scored place.
    pub candidate: Candidate,
    /// Sum of weighted factors and flat bonuses.
    pub final_score: f64,
    /// Named contributions for explainability.
    pub breakdown: ScoreBreakdown,
    /// Short sentence explaining the strongest factor.
    pub reason: String,
    /// Data problems recovered with defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<CandidateDefect>,
}
