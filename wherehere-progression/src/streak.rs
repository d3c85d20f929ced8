//! Daily activity streaks and milestone rewards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak lengths that pay a one-off XP reward.
const MILESTONES: [(u32, u64); 4] = [(7, 500), (30, 2_000), (100, 10_000), (365, 50_000)];

/// Change to apply to a streak after activity on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    /// Days to add, or the new length when the streak broke.
    pub delta: u32,
    /// Whether the previous streak survives.
    pub continued: bool,
}

/// Compare the last active day with `today`.
///
/// - First activity: `(1, true)`.
/// - Same day, or a day before the last recorded one: `(0, true)`.
/// - The next day: `(1, true)`.
/// - Any later day: `(1, false)`, the streak restarts at one.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wherehere_progression::update_streak;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
/// let tuesday = monday.succ_opt().expect("valid date");
/// let update = update_streak(Some(monday), tuesday);
/// assert_eq!((update.delta, update.continued), (1, true));
/// ```
#[must_use]
pub fn update_streak(last_active: Option<NaiveDate>, today: NaiveDate) -> StreakUpdate {
    let Some(last) = last_active else {
        return StreakUpdate {
            delta: 1,
            continued: true,
        };
    };
    match (today - last).num_days() {
        days if days <= 0 => StreakUpdate {
            delta: 0,
            continued: true,
        },
        1 => StreakUpdate {
            delta: 1,
            continued: true,
        },
        _ => StreakUpdate {
            delta: 1,
            continued: false,
        },
    }
}

/// Current and longest streak after applying an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive active days.
    pub current: u32,
    /// Longest streak ever reached.
    pub longest: u32,
}

impl StreakState {
    /// Fold `update` into the streak.
    ///
    /// A broken streak restarts at `update.delta`; otherwise the delta is
    /// added. The longest streak never decreases.
    #[must_use]
    pub fn apply(self, update: StreakUpdate) -> Self {
        let current = if update.continued {
            self.current.saturating_add(update.delta)
        } else {
            update.delta
        };
        Self {
            current,
            longest: self.longest.max(current),
        }
    }
}

/// XP paid when a streak reaches exactly `streak` days.
///
/// # Examples
/// ```
/// use wherehere_progression::milestone_reward;
///
/// assert_eq!(milestone_reward(7), Some(500));
/// assert_eq!(milestone_reward(8), None);
/// ```
#[must_use]
pub fn milestone_reward(streak: u32) -> Option<u64> {
    MILESTONES
        .iter()
        .find(|(days, _)| *days == streak)
        .map(|(_, reward)| *reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
    }

    fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
        today
            .checked_sub_days(chrono::Days::new(days))
            .expect("valid date")
    }

    #[rstest]
    fn first_activity_starts_a_streak(today: NaiveDate) {
        assert_eq!(
            update_streak(None, today),
            StreakUpdate {
                delta: 1,
                continued: true
            }
        );
    }

    #[rstest]
    #[case(0, 0, true)]
    #[case(1, 1, true)]
    #[case(2, 1, false)]
    #[case(30, 1, false)]
    fn updates_by_gap(
        today: NaiveDate,
        #[case] gap: u64,
        #[case] delta: u32,
        #[case] continued: bool,
    ) {
        let update = update_streak(Some(days_before(today, gap)), today);
        assert_eq!(update, StreakUpdate { delta, continued });
    }

    #[rstest]
    fn earlier_day_leaves_streak_alone(today: NaiveDate) {
        let tomorrow = today.succ_opt().expect("valid date");
        assert_eq!(
            update_streak(Some(tomorrow), today),
            StreakUpdate {
                delta: 0,
                continued: true
            }
        );
    }

    #[rstest]
    fn apply_tracks_longest() {
        let state = StreakState {
            current: 6,
            longest: 6,
        };
        let grown = state.apply(StreakUpdate {
            delta: 1,
            continued: true,
        });
        assert_eq!(grown, StreakState { current: 7, longest: 7 });
        let broken = grown.apply(StreakUpdate {
            delta: 1,
            continued: false,
        });
        assert_eq!(broken, StreakState { current: 1, longest: 7 });
    }

    #[rstest]
    #[case(7, Some(500))]
    #[case(30, Some(2_000))]
    #[case(100, Some(10_000))]
    #[case(365, Some(50_000))]
    #[case(14, None)]
    fn milestones(#[case] streak: u32, #[case] expected: Option<u64>) {
        assert_eq!(milestone_reward(streak), expected);
    }
}
