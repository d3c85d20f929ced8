//! Flat bonuses for how thoroughly a quest was completed.

use serde::{Deserialize, Serialize};

const PHOTO_BONUS: u64 = 20;
const REVIEW_BONUS: u64 = 30;
const STAY_BONUS: u64 = 50;

/// Minutes on site that earn the stay bonus.
pub const STAY_BONUS_MINUTES: u32 = 30;

/// Evidence submitted with a completed quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestCompletion {
    /// A photo was uploaded.
    pub photo_uploaded: bool,
    /// A review was written.
    pub review_written: bool,
    /// Time spent on site.
    pub duration_minutes: Option<u32>,
}

/// Bonus XP per kind of evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestBonus {
    /// Points for the photo.
    pub photo: u64,
    /// Points for the review.
    pub review: u64,
    /// Points for staying long enough.
    pub duration: u64,
}

impl QuestBonus {
    /// Sum of all bonuses.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.photo + self.review + self.duration
    }
}

impl QuestCompletion {
    /// Bonus earned by this completion.
    ///
    /// # Examples
    /// ```
    /// use wherehere_progression::QuestCompletion;
    ///
    /// let completion = QuestCompletion {
    ///     photo_uploaded: true,
    ///     review_written: false,
    ///     duration_minutes: Some(45),
    /// };
    /// assert_eq!(completion.bonus().total(), 70);
    /// ```
    #[must_use]
    pub fn bonus(&self) -> QuestBonus {
        let stayed = self
            .duration_minutes
            .is_some_and(|minutes| minutes >= STAY_BONUS_MINUTES);
        QuestBonus {
            photo: if self.photo_uploaded { PHOTO_BONUS } else { 0 },
            review: if self.review_written { REVIEW_BONUS } else { 0 },
            duration: if stayed { STAY_BONUS } else { 0 },
        }
    }
}
