//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::ScoringError;

/// Relative importance of each normalised sub-score.
///
/// Defaults: category 0.40, distance 0.25, vibe 0.20, cost 0.10 and
/// randomness 0.05.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the category fit.
    pub category: f64,
    /// Weight of the distance decay.
    pub distance: f64,
    /// Weight of the mood/vibe match.
    pub vibe: f64,
    /// Weight of the cost fit.
    pub cost: f64,
    /// Weight of the exploration noise.
    pub randomness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: 0.40,
            distance: 0.25,
            vibe: 0.20,
            cost: 0.10,
            randomness: 0.05,
        }
    }
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringError::InvalidWeights`] when a value is negative or
    /// not finite, or all values are zero.
    pub fn validate(self) -> Result<Self, ScoringError> {
        let values = self.values();
        let usable = values.iter().all(|w| w.is_finite() && *w >= 0.0)
            && values.iter().any(|w| *w > 0.0);
        if usable {
            Ok(self)
        } else {
            Err(ScoringError::InvalidWeights)
        }
    }

    const fn values(self) -> [f64; 5] {
        [
            self.category,
            self.distance,
            self.vibe,
            self.cost,
            self.randomness,
        ]
    }
}

/// Tunable constants of the scoring engine.
///
/// The defaults reproduce the production ranking; tests and experiments may
/// override any field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Sub-score weights.
    pub weights: ScoreWeights,
    /// Category fit used when the category is missing or unrated.
    pub default_category_weight: f64,
    /// Share of a secondary category's weight added to the category fit.
    pub secondary_category_share: f64,
    /// Distance decay per metre for achievers.
    pub achiever_distance_decay: f64,
    /// Distance decay per metre for every other role.
    pub distance_decay: f64,
    /// Vibe score when there is nothing to match.
    pub neutral_vibe: f64,
    /// Minimum level for the hidden-gem bonus.
    pub hidden_gem_min_level: u8,
    /// Flat points for a hidden gem.
    pub hidden_gem_bonus: f64,
    /// Extra flat points for explorers on hidden gems.
    pub explorer_hidden_gem_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            default_category_weight: 0.3,
            secondary_category_share: 0.2,
            achiever_distance_decay: 0.0001,
            distance_decay: 0.0003,
            neutral_vibe: 0.5,
            hidden_gem_min_level: 6,
            hidden_gem_bonus: 15.0,
            explorer_hidden_gem_bonus: 10.0,
        }
    }
}

impl ScoringConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringError`] when the weights or decay constants are
    /// unusable.
    pub fn validate(self) -> Result<Self, ScoringError> {
        self.weights.validate()?;
        let decays = [self.achiever_distance_decay, self.distance_decay];
        if decays.iter().any(|k| !k.is_finite() || *k < 0.0) {
            return Err(ScoringError::InvalidDecay);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(ScoreWeights { category: -0.1, ..ScoreWeights::default() })]
    #[case(ScoreWeights { vibe: f64::NAN, ..ScoreWeights::default() })]
    #[case(ScoreWeights { category: 0.0, distance: 0.0, vibe: 0.0, cost: 0.0, randomness: 0.0 })]
    fn rejects_unusable_weights(#[case] weights: ScoreWeights) {
        assert_eq!(weights.validate(), Err(ScoringError::InvalidWeights));
    }

    #[rstest]
    fn rejects_negative_decay() {
        let config = ScoringConfig {
            distance_decay: -1.0,
            ..ScoringConfig::default()
        };
        assert_eq!(config.validate(), Err(ScoringError::InvalidDecay));
    }

    #[rstest]
    fn partial_json_keeps_other_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"weights": {"category": 0.5}}"#).expect("valid json");
        assert!((config.weights.category - 0.5).abs() < f64::EPSILON);
        assert!((config.weights.distance - 0.25).abs() < f64::EPSILON);
        assert!((config.neutral_vibe - 0.5).abs() < f64::EPSILON);
    }
}
