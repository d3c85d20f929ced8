//! Multi-factor scoring of candidates.

use log::warn;
use rayon::prelude::*;
use wherehere_core::{
    Candidate, Factor, MAX_LEVEL, MIN_LEVEL, Mood, RandomSource, Role, RoleCatalog,
    ScoreBreakdown, ScoredCandidate, TimeSlot, Weather,
};

use crate::factors::{category_fit, context_bonus, cost_fit, distance_fit, level_bonus, vibe_match};
use crate::reason::{render, top_factor};
use crate::{ScoringConfig, ScoringError};

/// Points a normalised sub-score is worth at full weight.
const SCALE: f64 = 100.0;

/// Points the exploration unit is worth before weighting.
const RANDOM_SCALE: f64 = 10.0;

/// Request-level inputs shared by every candidate in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext {
    /// Role being served.
    pub role: Role,
    /// Progression level, clamped into `1..=50`.
    pub level: u8,
    /// Current mood.
    pub mood: Option<Mood>,
    /// Current weather.
    pub weather: Option<Weather>,
    /// Current time slot.
    pub time_of_day: Option<TimeSlot>,
}

impl ScoringContext {
    /// Context with no mood, weather or time of day.
    #[must_use]
    pub fn new(role: Role, level: u8) -> Self {
        Self {
            role,
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            mood: None,
            weather: None,
            time_of_day: None,
        }
    }
}

/// Scores candidates for a role.
///
/// # Examples
/// ```
/// use wherehere_core::{Candidate, Role};
/// use wherehere_scorer::{ScoringContext, ScoringEngine};
///
/// let engine = ScoringEngine::default();
/// let park = Candidate::new("p-1", "Seoul Forest", 200.0).with_category("공원");
/// let scored = engine.score(&park, &ScoringContext::new(Role::Healer, 3), 0.0);
/// assert!(scored.final_score > 63.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Build an engine after validating `config`.
    ///
    /// # Errors
    /// Returns [`ScoringError`] when the configuration is unusable.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one candidate.
    ///
    /// `exploration` is a unit value from a [`RandomSource`]; values outside
    /// `0.0..=1.0` are clamped. Missing or unusable data is scored with
    /// defaults, recorded in [`ScoredCandidate::defects`] and logged.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the final score is a weighted sum"
    )]
    pub fn score(
        &self,
        candidate: &Candidate,
        context: &ScoringContext,
        exploration: f64,
    ) -> ScoredCandidate {
        let profile = RoleCatalog::profile(context.role);
        let weights = self.config.weights;

        let (category, category_defect) = category_fit(profile, candidate, &self.config);
        let (distance, distance_defect) =
            distance_fit(context.role, candidate.distance_meters, &self.config);
        let vibe = vibe_match(
            context.mood.as_ref(),
            &candidate.vibe_tags,
            self.config.neutral_vibe,
        );
        let (cost, cost_defect) = cost_fit(profile, candidate);

        let weather_bonus = context.weather.map_or(0.0, |weather| {
            context_bonus(profile.weather_weights.weight(weather))
        });
        let time_bonus = context
            .time_of_day
            .map_or(0.0, |slot| context_bonus(profile.time_of_day_weights.weight(slot)));
        let gem_bonus = level_bonus(
            context.role,
            context.level,
            candidate.is_hidden_gem,
            &self.config,
        );
        let unit = if exploration.is_finite() {
            exploration.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let random = unit * RANDOM_SCALE * weights.randomness;

        let contributions = [
            category * weights.category * SCALE,
            distance * weights.distance * SCALE,
            vibe * weights.vibe * SCALE,
            cost * weights.cost * SCALE,
            gem_bonus,
        ];
        let final_score =
            contributions.iter().sum::<f64>() + weather_bonus + time_bonus + random;

        let breakdown = ScoreBreakdown::from([
            (Factor::Category, round2(category * SCALE)),
            (Factor::Distance, round2(distance * SCALE)),
            (Factor::Vibe, round2(vibe * SCALE)),
            (Factor::Cost, round2(cost * SCALE)),
            (Factor::WeatherBonus, round2(weather_bonus)),
            (Factor::TimeBonus, round2(time_bonus)),
            (Factor::LevelBonus, round2(gem_bonus)),
            (Factor::Random, round2(random)),
        ]);

        let defects: Vec<_> = [category_defect, distance_defect, cost_defect]
            .into_iter()
            .flatten()
            .collect();
        for defect in &defects {
            warn!(
                "malformed candidate {}: {defect}; scored with defaults",
                candidate.id
            );
        }

        ScoredCandidate {
            candidate: candidate.clone(),
            final_score,
            breakdown,
            reason: render(top_factor(contributions), profile, candidate),
            defects,
        }
    }

    /// Score a batch in input order.
    ///
    /// Exploration values are drawn from `random` sequentially, one per
    /// candidate, before scoring fans out across threads. The output matches
    /// a sequential run for the same random sequence.
    #[must_use]
    pub fn score_all<R>(
        &self,
        candidates: &[Candidate],
        context: &ScoringContext,
        random: &mut R,
    ) -> Vec<ScoredCandidate>
    where
        R: RandomSource + ?Sized,
    {
        let draws: Vec<f64> = candidates.iter().map(|_| random.next_unit()).collect();
        candidates
            .par_iter()
            .zip(draws.par_iter())
            .map(|(candidate, exploration)| self.score(candidate, context, *exploration))
            .collect()
    }
}

#[expect(clippy::float_arithmetic, reason = "rounding to two decimals")]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
