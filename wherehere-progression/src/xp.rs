//! Experience points awarded for user actions.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wherehere_core::{MAX_LEVEL, MIN_LEVEL};

/// Streak lengths and the multiplier they unlock, ascending.
const STREAK_MULTIPLIERS: [(u32, f64); 5] =
    [(3, 1.2), (7, 1.5), (14, 1.8), (30, 2.0), (100, 2.5)];

/// Maximum extra multiplier granted by a perfect diversity score.
const DIVERSITY_FACTOR: f64 = 0.3;

/// XP reduction per level, bounded by [`LEVEL_FLOOR`].
const LEVEL_STEP: f64 = 0.005;

/// Smallest level adjustment.
const LEVEL_FLOOR: f64 = 0.8;

/// A user action that earns XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Finished a quest.
    QuestComplete,
    /// Visited a place for the first time.
    FirstVisit,
    /// Uploaded a photo.
    PhotoUpload,
    /// Wrote a review.
    ReviewWrite,
    /// Invited a friend.
    FriendInvite,
    /// Created a quest for others.
    QuestCreate,
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{name}'")]
pub struct UnknownActionError {
    /// Name that failed to parse.
    pub name: String,
}

impl Action {
    /// Every action in declaration order.
    pub const ALL: [Self; 6] = [
        Self::QuestComplete,
        Self::FirstVisit,
        Self::PhotoUpload,
        Self::ReviewWrite,
        Self::FriendInvite,
        Self::QuestCreate,
    ];

    /// Return the action identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuestComplete => "quest_complete",
            Self::FirstVisit => "first_visit",
            Self::PhotoUpload => "photo_upload",
            Self::ReviewWrite => "review_write",
            Self::FriendInvite => "friend_invite",
            Self::QuestCreate => "quest_create",
        }
    }

    /// XP earned before any multiplier.
    #[must_use]
    pub const fn base_xp(self) -> u32 {
        match self {
            Self::QuestComplete => 100,
            Self::FirstVisit => 50,
            Self::PhotoUpload => 20,
            Self::ReviewWrite => 30,
            Self::FriendInvite => 200,
            Self::QuestCreate => 150,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownActionError { name: s.to_owned() })
    }
}

/// Multiplier earned by a streak of `days`.
///
/// # Examples
/// ```
/// use wherehere_progression::streak_multiplier;
///
/// assert_eq!(streak_multiplier(2), 1.0);
/// assert_eq!(streak_multiplier(7), 1.5);
/// assert_eq!(streak_multiplier(29), 1.8);
/// ```
#[must_use]
pub fn streak_multiplier(days: u32) -> f64 {
    STREAK_MULTIPLIERS
        .iter()
        .rev()
        .find(|(threshold, _)| days >= *threshold)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

/// Multipliers that produced an award, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpBreakdown {
    /// XP before multipliers.
    pub base: u32,
    /// Streak multiplier.
    pub consistency: f64,
    /// Diversity multiplier, rounded to two decimals.
    pub diversity: f64,
    /// Level adjustment, rounded to two decimals.
    pub level: f64,
    /// Caller-supplied multiplier such as an event bonus.
    pub extra: f64,
}

/// XP awarded for one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpAward {
    /// Points earned.
    pub xp: u64,
    /// How the points were derived.
    pub breakdown: XpBreakdown,
}

/// Compute XP for an action name.
///
/// `XP = round(base × streak × (1 + 0.3 × diversity) × max(0.8, 1 − 0.005 ×
/// level) × extra)`. Unknown action names earn nothing. Level is clamped into
/// `1..=50` and diversity into `[0, 1]`; a negative or non-finite `extra`
/// counts as zero.
///
/// # Examples
/// ```
/// use wherehere_progression::xp_for_action;
///
/// let award = xp_for_action("quest_complete", 7, 0.8, 5, 1.0);
/// assert_eq!(award.xp, 181);
/// ```
#[must_use]
pub fn xp_for_action(
    action: &str,
    current_streak: u32,
    diversity: f64,
    level: u8,
    extra: f64,
) -> XpAward {
    let base = action.parse::<Action>().map_or_else(
        |err| {
            debug!("{err}; awarding no XP");
            0
        },
        Action::base_xp,
    );
    award(base, current_streak, diversity, level, extra)
}

#[expect(
    clippy::float_arithmetic,
    reason = "XP multipliers are fractional"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the product is rounded and non-negative"
)]
fn award(base: u32, current_streak: u32, diversity: f64, level: u8, extra: f64) -> XpAward {
    let consistency = streak_multiplier(current_streak);
    let bounded_diversity = if diversity.is_finite() {
        diversity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let diversity_bonus = 1.0 + bounded_diversity * DIVERSITY_FACTOR;
    let bounded_level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    let level_adjustment = (1.0 - f64::from(bounded_level) * LEVEL_STEP).max(LEVEL_FLOOR);
    let bounded_extra = if extra.is_finite() { extra.max(0.0) } else { 0.0 };
    let total =
        f64::from(base) * consistency * diversity_bonus * level_adjustment * bounded_extra;
    XpAward {
        xp: total.round() as u64,
        breakdown: XpBreakdown {
            base,
            consistency,
            diversity: round2(diversity_bonus),
            level: round2(level_adjustment),
            extra: bounded_extra,
        },
    }
}

#[expect(clippy::float_arithmetic, reason = "rounding to two decimals")]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn documented_award() {
        let award = xp_for_action("quest_complete", 7, 0.8, 5, 1.0);
        assert_eq!(award.xp, 181);
        assert_eq!(award.breakdown.base, 100);
        assert_eq!(award.breakdown.consistency, 1.5);
        assert_eq!(award.breakdown.diversity, 1.24);
    }

    #[rstest]
    #[case("quest_complete", 100)]
    #[case("first_visit", 50)]
    #[case("photo_upload", 20)]
    #[case("review_write", 30)]
    #[case("friend_invite", 200)]
    #[case("quest_create", 150)]
    #[case("sleeping", 0)]
    fn base_xp_per_action(#[case] action: &str, #[case] expected: u32) {
        assert_eq!(xp_for_action(action, 0, 0.0, 1, 1.0).breakdown.base, expected);
    }

    #[rstest]
    fn level_one_award_is_adjusted() {
        assert_eq!(xp_for_action("friend_invite", 0, 0.0, 1, 1.0).xp, 199);
        assert_eq!(xp_for_action("quest_create", 0, 0.0, 1, 1.0).xp, 149);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(80, 50)]
    #[case(u8::MAX, 50)]
    fn out_of_range_levels_are_clamped(#[case] raw: u8, #[case] clamped: u8) {
        let award = xp_for_action("friend_invite", 0, 0.0, raw, 1.0);
        assert_eq!(award, xp_for_action("friend_invite", 0, 0.0, clamped, 1.0));
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(3, 1.2)]
    #[case(13, 1.5)]
    #[case(14, 1.8)]
    #[case(30, 2.0)]
    #[case(365, 2.5)]
    fn streak_thresholds(#[case] days: u32, #[case] expected: f64) {
        assert_eq!(streak_multiplier(days), expected);
    }

    #[rstest]
    fn level_adjustment_has_a_floor() {
        let award = xp_for_action("quest_complete", 0, 0.0, 50, 1.0);
        assert_eq!(award.breakdown.level, 0.8);
        assert_eq!(award.xp, 80);
    }

    #[rstest]
    fn extra_multiplier_scales_the_award() {
        assert_eq!(xp_for_action("photo_upload", 0, 0.0, 1, 2.0).xp, 40);
        assert_eq!(xp_for_action("first_visit", 0, 0.0, 1, -1.0).xp, 0);
    }

    #[rstest]
    fn action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("dance".parse::<Action>().is_err());
    }
}
