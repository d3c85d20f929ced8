//! Applies user activity to stored progression, one user at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wherehere_core::{ProgressionStore, UserProgression};

use crate::{
    LevelTier, QuestBonus, QuestCompletion, StreakState, TierName, XpBreakdown, XpProgress,
    level_from_xp, milestone_reward, update_streak, xp_for_action, xp_progress,
};

/// One user action to record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Action name such as `quest_complete`.
    pub action: String,
    /// Calendar day of the action.
    pub today: NaiveDate,
    /// Diversity score to reward, in `[0, 1]`.
    #[serde(default)]
    pub diversity: f64,
    /// Evidence for a completed quest.
    #[serde(default)]
    pub quest: Option<QuestCompletion>,
    /// Event multiplier; `1.0` for none.
    #[serde(default = "default_multiplier")]
    pub extra_multiplier: f64,
}

const fn default_multiplier() -> f64 {
    1.0
}

impl ActivityEvent {
    /// Event with no diversity, quest evidence or extra multiplier.
    pub fn new(action: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            action: action.into(),
            today,
            diversity: 0.0,
            quest: None,
            extra_multiplier: 1.0,
        }
    }
}

/// What recording an activity changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionOutcome {
    /// Action that was recorded.
    pub action: String,
    /// XP earned by the action itself.
    pub xp_awarded: u64,
    /// How the action XP was derived.
    pub xp_breakdown: XpBreakdown,
    /// One-off reward for reaching a streak milestone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_bonus: Option<u64>,
    /// Quest evidence bonuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quest_bonus: Option<QuestBonus>,
    /// Every point gained by this activity.
    pub xp_gained: u64,
    /// Lifetime XP after the activity.
    pub total_xp: u64,
    /// Level after the activity.
    pub level: u8,
    /// Set when the activity crossed into a higher level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_level: Option<u8>,
    /// Tier of the resulting level.
    pub tier: TierName,
    /// Progress through the resulting level.
    pub progress: XpProgress,
    /// Streak after the activity.
    pub streak: u32,
    /// Longest streak after the activity.
    pub longest_streak: u32,
    /// Whether the previous streak survived.
    pub streak_continued: bool,
    /// Diversity score used for the award.
    pub diversity: f64,
}

/// Errors raised while recording activity.
#[derive(Debug, Error)]
pub enum ProgressionError<E>
where
    E: std::error::Error + 'static,
{
    /// Loading or saving progression failed.
    #[error("progression store failed: {0}")]
    Store(#[source] E),
}

/// Records activity against a [`ProgressionStore`].
///
/// Each call loads the user's state, updates the streak, awards XP using the
/// updated streak, adds milestone and quest bonuses, recomputes the level and
/// saves. Calls for the same user are serialised; different users proceed in
/// parallel.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wherehere_core::MemoryProgressionStore;
/// use wherehere_progression::{ActivityEvent, ProgressionService};
///
/// let service = ProgressionService::new(MemoryProgressionStore::default());
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
/// let outcome = service
///     .record("u-1", &ActivityEvent::new("quest_complete", today))
///     .expect("infallible store");
/// assert_eq!(outcome.xp_awarded, 100);
/// assert_eq!(outcome.streak, 1);
/// ```
#[derive(Debug)]
pub struct ProgressionService<S> {
    store: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: ProgressionStore> ProgressionService<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Record one activity for `user_id`.
    ///
    /// # Errors
    /// Returns [`ProgressionError::Store`] when loading or saving fails; the
    /// stored state is unchanged when loading fails.
    pub fn record(
        &self,
        user_id: &str,
        event: &ActivityEvent,
    ) -> Result<ProgressionOutcome, ProgressionError<S::Error>> {
        let user_lock = self.user_lock(user_id);
        let recorded = {
            let _guard = user_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.load_apply_save(user_id, event)
        };
        self.release_lock(user_id, user_lock);
        let outcome = recorded?;

        if let Some(level) = outcome.new_level {
            info!("user {user_id} reached level {level}");
        }
        debug!(
            "user {user_id}: {} earned {} XP (total {})",
            outcome.action, outcome.xp_gained, outcome.total_xp
        );
        Ok(outcome)
    }

    fn load_apply_save(
        &self,
        user_id: &str,
        event: &ActivityEvent,
    ) -> Result<ProgressionOutcome, ProgressionError<S::Error>> {
        let before = self.store.load(user_id).map_err(ProgressionError::Store)?;
        let (after, outcome) = apply_event(&before, event);
        self.store
            .save(user_id, &after)
            .map_err(ProgressionError::Store)?;
        Ok(outcome)
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(user_id.to_owned()).or_default())
    }

    /// Drop a per-user lock handle and forget the user once nobody else
    /// holds or waits on their lock.
    ///
    /// Handles are only cloned under the outer lock, so the strong count is
    /// stable while it is held.
    fn release_lock(&self, user_id: &str, user_lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(user_lock);
        if locks
            .get(user_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(user_id);
        }
    }

    /// Number of users with a live lock entry.
    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Derive the new state and the outcome of one event.
fn apply_event(
    before: &UserProgression,
    event: &ActivityEvent,
) -> (UserProgression, ProgressionOutcome) {
    let update = update_streak(before.last_active_date, event.today);
    let streak = StreakState {
        current: before.current_streak,
        longest: before.longest_streak,
    }
    .apply(update);

    let award = xp_for_action(
        &event.action,
        streak.current,
        event.diversity,
        before.level,
        event.extra_multiplier,
    );
    let milestone_bonus = if update.delta > 0 {
        milestone_reward(streak.current)
    } else {
        None
    };
    let quest_bonus = event.quest.map(|quest| quest.bonus());
    let xp_gained = award.xp
        + milestone_bonus.unwrap_or_default()
        + quest_bonus.map_or(0, |bonus| bonus.total());

    let total_xp = before.total_xp.saturating_add(xp_gained);
    let level = level_from_xp(total_xp).max(before.level);
    let new_level = (level > before.level).then_some(level);
    let last_active_date = before
        .last_active_date
        .map_or(event.today, |last| last.max(event.today));

    let after = UserProgression {
        total_xp,
        level,
        current_streak: streak.current,
        longest_streak: streak.longest,
        last_active_date: Some(last_active_date),
    };
    let outcome = ProgressionOutcome {
        action: event.action.clone(),
        xp_awarded: award.xp,
        xp_breakdown: award.breakdown,
        milestone_bonus,
        quest_bonus,
        xp_gained,
        total_xp,
        level,
        new_level,
        tier: LevelTier::for_level(level).name,
        progress: xp_progress(total_xp, level),
        streak: streak.current,
        longest_streak: streak.longest,
        streak_continued: update.continued,
        diversity: event.diversity,
    };
    (after, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wherehere_core::MemoryProgressionStore;

    #[fixture]
    fn service() -> ProgressionService<MemoryProgressionStore> {
        ProgressionService::new(MemoryProgressionStore::default())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    fn record(
        service: &ProgressionService<MemoryProgressionStore>,
        event: &ActivityEvent,
    ) -> ProgressionOutcome {
        service.record("u-1", event).expect("infallible store")
    }

    #[rstest]
    fn first_activity_starts_streak_and_saves(service: ProgressionService<MemoryProgressionStore>) {
        let outcome = record(&service, &ActivityEvent::new("first_visit", day(1)));
        assert_eq!(outcome.xp_gained, 50);
        assert_eq!(outcome.streak, 1);
        let stored = service.store().load("u-1").expect("infallible");
        assert_eq!(stored.total_xp, 50);
        assert_eq!(stored.last_active_date, Some(day(1)));
    }

    #[rstest]
    fn seventh_day_pays_milestone_once(service: ProgressionService<MemoryProgressionStore>) {
        service
            .store()
            .save(
                "u-1",
                &UserProgression {
                    current_streak: 6,
                    longest_streak: 6,
                    last_active_date: Some(day(6)),
                    ..UserProgression::default()
                },
            )
            .expect("infallible");

        let first = record(&service, &ActivityEvent::new("photo_upload", day(7)));
        assert_eq!(first.streak, 7);
        assert_eq!(first.milestone_bonus, Some(500));
        assert_eq!(first.xp_awarded, 30);

        let again = record(&service, &ActivityEvent::new("photo_upload", day(7)));
        assert_eq!(again.streak, 7);
        assert_eq!(again.milestone_bonus, None);
    }

    #[rstest]
    fn quest_evidence_adds_flat_bonus(service: ProgressionService<MemoryProgressionStore>) {
        let mut event = ActivityEvent::new("quest_complete", day(1));
        event.quest = Some(QuestCompletion {
            photo_uploaded: true,
            review_written: true,
            duration_minutes: Some(40),
        });
        let outcome = record(&service, &event);
        assert_eq!(outcome.xp_gained, 200);
        assert_eq!(outcome.new_level, Some(2));
        assert_eq!(outcome.tier, TierName::Beginner);
    }

    #[rstest]
    fn gap_resets_streak(service: ProgressionService<MemoryProgressionStore>) {
        record(&service, &ActivityEvent::new("first_visit", day(1)));
        record(&service, &ActivityEvent::new("first_visit", day(2)));
        let outcome = record(&service, &ActivityEvent::new("first_visit", day(5)));
        assert_eq!(outcome.streak, 1);
        assert_eq!(outcome.longest_streak, 2);
        assert!(!outcome.streak_continued);
    }

    #[rstest]
    fn unknown_action_keeps_the_streak_but_earns_nothing(
        service: ProgressionService<MemoryProgressionStore>,
    ) {
        let outcome = record(&service, &ActivityEvent::new("dance", day(1)));
        assert_eq!(outcome.xp_gained, 0);
        assert_eq!(outcome.streak, 1);
    }

    #[derive(Debug, Error)]
    #[error("offline")]
    struct Offline;

    struct FailingStore;

    impl ProgressionStore for FailingStore {
        type Error = Offline;

        fn load(&self, _user_id: &str) -> Result<UserProgression, Self::Error> {
            Err(Offline)
        }

        fn save(&self, _user_id: &str, _progression: &UserProgression) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[rstest]
    fn store_failures_propagate() {
        let service = ProgressionService::new(FailingStore);
        let err = service
            .record("u-1", &ActivityEvent::new("first_visit", day(1)))
            .expect_err("load fails");
        assert!(matches!(err, ProgressionError::Store(Offline)));
    }

    #[rstest]
    fn concurrent_updates_for_one_user_are_serialised() {
        let service = ProgressionService::new(MemoryProgressionStore::default());
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    service
                        .record("u-1", &ActivityEvent::new("photo_upload", day(1)))
                        .expect("infallible store");
                });
            }
        });
        let stored = service.store().load("u-1").expect("infallible");
        assert_eq!(stored.total_xp, 8 * 20);
        assert_eq!(service.tracked_users(), 0);
    }

    #[rstest]
    fn user_locks_are_released_after_recording(
        service: ProgressionService<MemoryProgressionStore>,
    ) {
        for n in 0..64 {
            service
                .record(&format!("user-{n}"), &ActivityEvent::new("first_visit", day(1)))
                .expect("infallible store");
        }
        assert_eq!(service.tracked_users(), 0);
        assert_eq!(service.store().snapshot().len(), 64);
    }

    #[rstest]
    fn failed_records_release_the_user_lock() {
        let service = ProgressionService::new(FailingStore);
        let outcome = service.record("u-1", &ActivityEvent::new("first_visit", day(1)));
        assert!(outcome.is_err());
        assert_eq!(service.tracked_users(), 0);
    }
}
