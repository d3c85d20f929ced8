//! Persistent progression state and the store it lives in.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 50;

/// Lowest level; every user starts here.
pub const MIN_LEVEL: u8 = 1;

/// XP, level and streak state of one user.
///
/// The store owns this record. The progression engine only derives new
/// values from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgression {
    /// Lifetime experience points.
    #[serde(default)]
    pub total_xp: u64,
    /// Current level in `1..=50`.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Consecutive active days ending at `last_active_date`.
    #[serde(default)]
    pub current_streak: u32,
    /// Longest streak ever reached.
    #[serde(default)]
    pub longest_streak: u32,
    /// Last calendar day with recorded activity.
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

const fn default_level() -> u8 {
    MIN_LEVEL
}

impl Default for UserProgression {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: MIN_LEVEL,
            current_streak: 0,
            longest_streak: 0,
            last_active_date: None,
        }
    }
}

/// Keyed storage for [`UserProgression`] records.
///
/// Unknown users load as [`UserProgression::default`].
pub trait ProgressionStore: Send + Sync {
    /// Failure raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the state of `user_id`.
    ///
    /// # Errors
    /// Propagates failures of the backing store.
    fn load(&self, user_id: &str) -> Result<UserProgression, Self::Error>;

    /// Replace the state of `user_id`.
    ///
    /// # Errors
    /// Propagates failures of the backing store.
    fn save(&self, user_id: &str, progression: &UserProgression) -> Result<(), Self::Error>;
}

impl<S: ProgressionStore + ?Sized> ProgressionStore for &S {
    type Error = S::Error;

    fn load(&self, user_id: &str) -> Result<UserProgression, Self::Error> {
        (**self).load(user_id)
    }

    fn save(&self, user_id: &str, progression: &UserProgression) -> Result<(), Self::Error> {
        (**self).save(user_id, progression)
    }
}

/// In-memory [`ProgressionStore`].
///
/// # Examples
/// ```
/// use wherehere_core::{MemoryProgressionStore, ProgressionStore, UserProgression};
///
/// let store = MemoryProgressionStore::default();
/// assert_eq!(store.load("new-user").expect("infallible"), UserProgression::default());
/// ```
#[derive(Debug, Default)]
pub struct MemoryProgressionStore {
    users: RwLock<HashMap<String, UserProgression>>,
}

impl MemoryProgressionStore {
    /// Seed the store with existing records.
    #[must_use]
    pub fn from_snapshot(users: HashMap<String, UserProgression>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Copy out every stored record.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, UserProgression> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressionStore for MemoryProgressionStore {
    type Error = Infallible;

    fn load(&self, user_id: &str) -> Result<UserProgression, Self::Error> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(user_id).cloned().unwrap_or_default())
    }

    fn save(&self, user_id: &str, progression: &UserProgression) -> Result<(), Self::Error> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_owned(), progression.clone());
        Ok(())
    }
}
