//! Behavioural roles and the contextual conditions they are tuned for.
//!
//! Roles are a closed set so lookups into the role table are checked at
//! compile time. Time slots and weather conditions are likewise closed so
//! every role profile carries a weight for each of them.
//!
//! # Examples
//! ```
//! use wherehere_core::{Role, TimeSlot};
//!
//! assert_eq!(Role::Healer.as_str(), "healer");
//! assert_eq!("explorer".parse::<Role>(), Ok(Role::Explorer));
//! assert_eq!(TimeSlot::from_hour(6), TimeSlot::Dawn);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fixed behavioural persona that parametrises recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Seeks novelty, back alleys and hidden spots.
    Explorer,
    /// Seeks rest and quiet places close to home.
    Healer,
    /// Collects aesthetic experiences: galleries, views, architecture.
    Archivist,
    /// Seeks shared time with other people.
    Relation,
    /// Pursues goals: training, records, challenges.
    Achiever,
}

/// Raised when a role name is not one of the five known roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{name}'")]
pub struct UnknownRoleError {
    /// The rejected role name.
    pub name: String,
}

impl Role {
    /// Every role, in catalogue order.
    pub const ALL: [Self; 5] = [
        Self::Explorer,
        Self::Healer,
        Self::Archivist,
        Self::Relation,
        Self::Achiever,
    ];

    /// Return the role identifier as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use wherehere_core::Role;
    ///
    /// assert_eq!(Role::Achiever.as_str(), "achiever");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explorer => "explorer",
            Self::Healer => "healer",
            Self::Archivist => "archivist",
            Self::Relation => "relation",
            Self::Achiever => "achiever",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explorer" => Ok(Self::Explorer),
            "healer" => Ok(Self::Healer),
            "archivist" => Ok(Self::Archivist),
            "relation" => Ok(Self::Relation),
            "achiever" => Ok(Self::Achiever),
            _ => Err(UnknownRoleError { name: s.to_owned() }),
        }
    }
}

/// Part of the day a recommendation is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    /// 05:00 to 07:00.
    Dawn,
    /// 07:00 to 11:00.
    Morning,
    /// 11:00 to 17:00.
    Afternoon,
    /// 17:00 to 21:00.
    Evening,
    /// 21:00 to midnight.
    Night,
    /// Midnight to 05:00.
    Midnight,
}

impl TimeSlot {
    /// Map a wall-clock hour (`0..=23`) onto its slot.
    ///
    /// Hours past 23 fall into [`TimeSlot::Night`].
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            0..=4 => Self::Midnight,
            5..=6 => Self::Dawn,
            7..=10 => Self::Morning,
            11..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Return the slot identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Midnight => "midnight",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dawn" => Ok(Self::Dawn),
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            "midnight" => Ok(Self::Midnight),
            _ => Err(format!("unknown time of day '{s}'")),
        }
    }
}

/// Weather condition at the user's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Overcast.
    Cloudy,
    /// Rain.
    Rainy,
    /// Snow.
    Snowy,
    /// Strong wind.
    Windy,
}

impl Weather {
    /// Return the condition identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Windy => "windy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunny" => Ok(Self::Sunny),
            "cloudy" => Ok(Self::Cloudy),
            "rainy" => Ok(Self::Rainy),
            "snowy" => Ok(Self::Snowy),
            "windy" => Ok(Self::Windy),
            _ => Err(format!("unknown weather '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn display_matches_as_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[rstest]
    #[case("explorer", Role::Explorer)]
    #[case("Healer", Role::Healer)]
    #[case(" archivist ", Role::Archivist)]
    #[case("RELATION", Role::Relation)]
    #[case("achiever", Role::Achiever)]
    fn parses_known_roles(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_role() {
        let err = "wanderer".parse::<Role>().unwrap_err();
        assert_eq!(err.name, "wanderer");
        assert!(err.to_string().contains("unknown role"));
    }

    #[rstest]
    #[case(0, TimeSlot::Midnight)]
    #[case(4, TimeSlot::Midnight)]
    #[case(5, TimeSlot::Dawn)]
    #[case(7, TimeSlot::Morning)]
    #[case(11, TimeSlot::Afternoon)]
    #[case(17, TimeSlot::Evening)]
    #[case(21, TimeSlot::Night)]
    #[case(23, TimeSlot::Night)]
    fn maps_hours_to_slots(#[case] hour: u32, #[case] expected: TimeSlot) {
        assert_eq!(TimeSlot::from_hour(hour), expected);
    }

    #[rstest]
    fn weather_round_trips_through_strings() {
        let parsed: Weather = "Rainy".parse().unwrap();
        assert_eq!(parsed, Weather::Rainy);
        assert!("hail".parse::<Weather>().is_err());
    }

    #[rstest]
    fn role_deserialises_from_lowercase_json() {
        let role: Role = serde_json::from_str("\"relation\"").unwrap();
        assert_eq!(role, Role::Relation);
    }
}
