//! Compiled-in role profiles.
//!
//! Each [`Role`] maps onto exactly one [`RoleProfile`]. Profiles are
//! constants: they are never reloaded or mutated at runtime, which keeps
//! scoring reproducible.
//!
//! # Examples
//! ```
//! use wherehere_core::{Role, RoleCatalog, Weather};
//!
//! let healer = RoleCatalog::profile(Role::Healer);
//! assert_eq!(healer.radius_base, 800);
//! assert_eq!(healer.category_weight("공원"), Some(1.0));
//! assert_eq!(healer.weather_weights.weight(Weather::Cloudy), 1.0);
//! ```

use crate::{Role, TimeSlot, UnknownRoleError, Weather};

/// Weight per [`TimeSlot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotWeights {
    /// Weight for [`TimeSlot::Dawn`].
    pub dawn: f64,
    /// Weight for [`TimeSlot::Morning`].
    pub morning: f64,
    /// Weight for [`TimeSlot::Afternoon`].
    pub afternoon: f64,
    /// Weight for [`TimeSlot::Evening`].
    pub evening: f64,
    /// Weight for [`TimeSlot::Night`].
    pub night: f64,
    /// Weight for [`TimeSlot::Midnight`].
    pub midnight: f64,
}

impl SlotWeights {
    /// Look up the weight for `slot`.
    #[must_use]
    pub const fn weight(&self, slot: TimeSlot) -> f64 {
        match slot {
            TimeSlot::Dawn => self.dawn,
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
            TimeSlot::Night => self.night,
            TimeSlot::Midnight => self.midnight,
        }
    }

    const fn values(&self) -> [f64; 6] {
        [
            self.dawn,
            self.morning,
            self.afternoon,
            self.evening,
            self.night,
            self.midnight,
        ]
    }
}

/// Weight per [`Weather`] condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherWeights {
    /// Weight for [`Weather::Sunny`].
    pub sunny: f64,
    /// Weight for [`Weather::Cloudy`].
    pub cloudy: f64,
    /// Weight for [`Weather::Rainy`].
    pub rainy: f64,
    /// Weight for [`Weather::Snowy`].
    pub snowy: f64,
    /// Weight for [`Weather::Windy`].
    pub windy: f64,
}

impl WeatherWeights {
    /// Look up the weight for `weather`.
    #[must_use]
    pub const fn weight(&self, weather: Weather) -> f64 {
        match weather {
            Weather::Sunny => self.sunny,
            Weather::Cloudy => self.cloudy,
            Weather::Rainy => self.rainy,
            Weather::Snowy => self.snowy,
            Weather::Windy => self.windy,
        }
    }

    const fn values(&self) -> [f64; 5] {
        [self.sunny, self.cloudy, self.rainy, self.snowy, self.windy]
    }
}

/// Immutable preferences describing how a role experiences places.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleProfile {
    /// Role this profile belongs to.
    pub role: Role,
    /// Korean display name.
    pub korean_name: &'static str,
    /// English display name.
    pub english_name: &'static str,
    /// One-line persona description.
    pub description: &'static str,
    /// Smallest search radius in metres.
    pub radius_min: u32,
    /// Largest search radius in metres.
    pub radius_max: u32,
    /// Search radius at level 1 before expansion, in metres.
    pub radius_base: u32,
    /// Preferred categories and their weights in `[0.0, 1.0]`.
    pub category_weights: &'static [(&'static str, f64)],
    /// How strongly prices above the threshold are penalised.
    pub cost_sensitivity: f64,
    /// Price (KRW) up to which a place counts as affordable.
    pub cost_threshold: u32,
    /// Appetite for unfamiliar places.
    pub novelty_preference: f64,
    /// Tolerance for crowded places.
    pub crowd_tolerance: f64,
    /// Willingness to go at unusual times.
    pub time_flexibility: f64,
    /// Preference for social interaction.
    pub social_intensity: f64,
    /// Time-of-day weights.
    pub time_of_day_weights: SlotWeights,
    /// Weather weights.
    pub weather_weights: WeatherWeights,
}

impl RoleProfile {
    /// Return the weight for a category name, if the role rates it.
    ///
    /// # Examples
    /// ```
    /// use wherehere_core::{Role, RoleCatalog};
    ///
    /// let explorer = RoleCatalog::profile(Role::Explorer);
    /// assert_eq!(explorer.category_weight("골목길"), Some(1.0));
    /// assert!(explorer.category_weight("공원").is_none());
    /// ```
    #[must_use]
    pub fn category_weight(&self, category: &str) -> Option<f64> {
        self.category_weights
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, weight)| *weight)
    }

    /// Iterate over every weight the profile carries.
    ///
    /// Used to assert that all weights stay within `[0.0, 1.0]`.
    pub fn all_weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.category_weights
            .iter()
            .map(|(_, weight)| *weight)
            .chain([
                self.cost_sensitivity,
                self.novelty_preference,
                self.crowd_tolerance,
                self.time_flexibility,
                self.social_intensity,
            ])
            .chain(self.time_of_day_weights.values())
            .chain(self.weather_weights.values())
    }
}

/// Registry of the five role profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleCatalog;

impl RoleCatalog {
    /// Return the profile for `role`.
    #[must_use]
    pub fn profile(role: Role) -> &'static RoleProfile {
        match role {
            Role::Explorer => &EXPLORER,
            Role::Healer => &HEALER,
            Role::Archivist => &ARCHIVIST,
            Role::Relation => &RELATION,
            Role::Achiever => &ACHIEVER,
        }
    }

    /// Resolve a role by name and return its profile.
    ///
    /// # Errors
    /// Returns [`UnknownRoleError`] when `name` is not one of the five roles.
    pub fn lookup(name: &str) -> Result<&'static RoleProfile, UnknownRoleError> {
        let role: Role = name.parse()?;
        Ok(Self::profile(role))
    }

    /// Iterate over all profiles in catalogue order.
    pub fn profiles() -> impl Iterator<Item = &'static RoleProfile> {
        Role::ALL.into_iter().map(Self::profile)
    }
}

static EXPLORER: RoleProfile = RoleProfile {
    role: Role::Explorer,
    korean_name: "탐험가",
    english_name: "Explorer",
    description: "An adventurer who steps off the daily path to find something new",
    radius_min: 1_000,
    radius_max: 10_000,
    radius_base: 3_000,
    category_weights: &[
        ("골목길", 1.0),
        ("이색장소", 1.0),
        ("히든스팟", 1.0),
        ("로컬맛집", 0.9),
        ("빈티지샵", 0.8),
        ("독립서점", 0.8),
        ("예술공간", 0.7),
        ("전통시장", 0.7),
        ("루프탑", 0.6),
        ("도보여행", 0.9),
        ("자전거투어", 0.8),
        ("사진명소", 0.8),
        ("프랜차이즈", 0.1),
        ("백화점", 0.2),
        ("대형마트", 0.1),
    ],
    cost_sensitivity: 0.2,
    cost_threshold: 50_000,
    novelty_preference: 0.9,
    crowd_tolerance: 0.4,
    time_flexibility: 0.8,
    social_intensity: 0.5,
    time_of_day_weights: SlotWeights {
        dawn: 0.8,
        morning: 0.7,
        afternoon: 0.9,
        evening: 1.0,
        night: 0.6,
        midnight: 0.3,
    },
    weather_weights: WeatherWeights {
        sunny: 1.0,
        cloudy: 0.9,
        rainy: 0.4,
        snowy: 0.7,
        windy: 0.6,
    },
};

static HEALER: RoleProfile = RoleProfile {
    role: Role::Healer,
    korean_name: "치유자",
    english_name: "Healer",
    description: "A keeper of calm who seeks rest and recovery",
    radius_min: 300,
    radius_max: 2_000,
    radius_base: 800,
    category_weights: &[
        ("공원", 1.0),
        ("북카페", 1.0),
        ("숲", 1.0),
        ("사찰/교회", 0.9),
        ("도서관", 0.9),
        ("식물원", 0.9),
        ("호수/강변", 0.8),
        ("조용한카페", 0.9),
        ("티하우스", 0.8),
        ("명상센터", 0.8),
        ("요가스튜디오", 0.7),
        ("스파", 0.6),
        ("한적한산책로", 1.0),
        ("클럽", 0.0),
        ("번화가", 0.1),
        ("놀이공원", 0.1),
        ("쇼핑몰", 0.2),
    ],
    cost_sensitivity: 0.8,
    cost_threshold: 10_000,
    novelty_preference: 0.3,
    crowd_tolerance: 0.2,
    time_flexibility: 0.6,
    social_intensity: 0.2,
    time_of_day_weights: SlotWeights {
        dawn: 1.0,
        morning: 0.9,
        afternoon: 0.7,
        evening: 0.6,
        night: 0.4,
        midnight: 0.2,
    },
    weather_weights: WeatherWeights {
        sunny: 0.8,
        cloudy: 1.0,
        rainy: 0.9,
        snowy: 1.0,
        windy: 0.5,
    },
};

static ARCHIVIST: RoleProfile = RoleProfile {
    role: Role::Archivist,
    korean_name: "수집가",
    english_name: "Archivist",
    description: "A curator of the senses who collects and records beauty",
    radius_min: 500,
    radius_max: 5_000,
    radius_base: 2_000,
    category_weights: &[
        ("전시관", 1.0),
        ("뷰맛집", 1.0),
        ("건축물", 1.0),
        ("갤러리", 1.0),
        ("박물관", 0.9),
        ("디자인숍", 0.9),
        ("브런치카페", 0.8),
        ("루프탑바", 0.8),
        ("고건축", 0.9),
        ("현대건축", 0.9),
        ("향수샵", 0.7),
        ("와인바", 0.7),
        ("파인다이닝", 0.8),
        ("공예공방", 0.8),
        ("사진스튜디오", 0.7),
        ("패스트푸드", 0.1),
        ("PC방", 0.0),
    ],
    cost_sensitivity: 0.5,
    cost_threshold: 30_000,
    novelty_preference: 0.7,
    crowd_tolerance: 0.5,
    time_flexibility: 0.7,
    social_intensity: 0.4,
    time_of_day_weights: SlotWeights {
        dawn: 0.6,
        morning: 0.8,
        afternoon: 1.0,
        evening: 1.0,
        night: 0.7,
        midnight: 0.3,
    },
    weather_weights: WeatherWeights {
        sunny: 1.0,
        cloudy: 0.8,
        rainy: 0.6,
        snowy: 0.9,
        windy: 0.5,
    },
};

static RELATION: RoleProfile = RoleProfile {
    role: Role::Relation,
    korean_name: "연결자",
    english_name: "Relation",
    description: "A weaver of relationships who seeks warm company",
    radius_min: 500,
    radius_max: 5_000,
    radius_base: 2_000,
    category_weights: &[
        ("맛집", 1.0),
        ("카페", 1.0),
        ("액티비티", 1.0),
        ("브런치", 0.9),
        ("디저트카페", 0.9),
        ("이자카야", 0.8),
        ("와인바", 0.8),
        ("보드게임카페", 0.9),
        ("방탈출", 0.8),
        ("볼링/당구", 0.7),
        ("조용한레스토랑", 0.9),
        ("루프탑", 0.8),
        ("테라스", 0.9),
        ("노래방", 0.7),
        ("스크린골프", 0.6),
        ("쿠킹클래스", 0.8),
        ("혼밥맛집", 0.2),
        ("독서실", 0.0),
    ],
    cost_sensitivity: 0.6,
    cost_threshold: 25_000,
    novelty_preference: 0.5,
    crowd_tolerance: 0.7,
    time_flexibility: 0.9,
    social_intensity: 0.9,
    time_of_day_weights: SlotWeights {
        dawn: 0.2,
        morning: 0.6,
        afternoon: 0.8,
        evening: 1.0,
        night: 0.9,
        midnight: 0.4,
    },
    weather_weights: WeatherWeights {
        sunny: 0.9,
        cloudy: 0.8,
        rainy: 0.7,
        snowy: 0.6,
        windy: 0.7,
    },
};

static ACHIEVER: RoleProfile = RoleProfile {
    role: Role::Achiever,
    korean_name: "달성자",
    english_name: "Achiever",
    description: "A champion who keeps moving towards the next goal",
    radius_min: 1_000,
    radius_max: 15_000,
    radius_base: 5_000,
    category_weights: &[
        ("헬스장", 1.0),
        ("러닝코스", 1.0),
        ("챌린지스팟", 1.0),
        ("크로스핏", 0.9),
        ("클라이밍", 0.9),
        ("수영장", 0.8),
        ("사이클링코스", 0.9),
        ("등산로", 0.8),
        ("스터디카페", 0.8),
        ("코워킹", 0.7),
        ("북카페", 0.6),
        ("샐러드바", 0.7),
        ("프로틴카페", 0.8),
        ("스무디바", 0.7),
        ("러닝트랙", 1.0),
        ("자전거도로", 0.9),
        ("술집", 0.2),
        ("패스트푸드", 0.1),
    ],
    cost_sensitivity: 0.3,
    cost_threshold: 80_000,
    novelty_preference: 0.6,
    crowd_tolerance: 0.6,
    time_flexibility: 0.4,
    social_intensity: 0.5,
    time_of_day_weights: SlotWeights {
        dawn: 1.0,
        morning: 0.9,
        afternoon: 0.6,
        evening: 0.8,
        night: 0.7,
        midnight: 0.3,
    },
    weather_weights: WeatherWeights {
        sunny: 1.0,
        cloudy: 0.9,
        rainy: 0.5,
        snowy: 0.4,
        windy: 0.6,
    },
};
