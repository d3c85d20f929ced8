//! Progression for WhereHere users.
//!
//! Actions earn XP scaled by streak, diversity and level
//! ([`xp_for_action`]). XP maps onto fifty levels grouped into tiers
//! ([`level_from_xp`], [`LevelTier`]). Daily activity builds a streak
//! ([`update_streak`]) that pays milestone rewards, and
//! [`DiversityScorer`] rewards varied roles, places and categories.
//!
//! [`ProgressionService`] ties these together against a
//! [`ProgressionStore`](wherehere_core::ProgressionStore), serialising
//! updates per user.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod diversity;
mod level;
mod quest;
mod service;
mod streak;
mod tier;
mod xp;

pub use diversity::{ActivityHistory, DiversityScorer};
pub use level::{XpProgress, check_level_up, level_from_xp, xp_progress, xp_required_for};
pub use quest::{QuestBonus, QuestCompletion, STAY_BONUS_MINUTES};
pub use service::{ActivityEvent, ProgressionError, ProgressionOutcome, ProgressionService};
pub use streak::{StreakState, StreakUpdate, milestone_reward, update_streak};
pub use tier::{LevelTier, TierName, UnlockedFeature};
pub use xp::{Action, UnknownActionError, XpAward, XpBreakdown, streak_multiplier, xp_for_action};
