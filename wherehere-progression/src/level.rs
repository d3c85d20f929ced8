//! Levels derived from accumulated XP.

use serde::{Deserialize, Serialize};
use wherehere_core::{MAX_LEVEL, MIN_LEVEL};

/// Cumulative XP needed to reach `level`.
///
/// `floor(100 × (L − 1) + 50 × (L − 1)^1.5)`; level 1 and below need nothing.
///
/// # Examples
/// ```
/// use wherehere_progression::xp_required_for;
///
/// assert_eq!(xp_required_for(1), 0);
/// assert_eq!(xp_required_for(2), 150);
/// assert_eq!(xp_required_for(5), 800);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the level curve has a fractional exponent"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the curve is non-negative and floored"
)]
pub fn xp_required_for(level: u8) -> u64 {
    if level <= MIN_LEVEL {
        return 0;
    }
    let steps = f64::from(level - 1);
    (100.0 * steps + 50.0 * steps.powf(1.5)).floor() as u64
}

/// Level reached with `total_xp`, capped at 50.
#[must_use]
pub fn level_from_xp(total_xp: u64) -> u8 {
    (MIN_LEVEL..MAX_LEVEL)
        .find(|level| total_xp < xp_required_for(level + 1))
        .unwrap_or(MAX_LEVEL)
}

/// Position within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpProgress {
    /// XP earned since reaching the level.
    pub xp_in_level: u64,
    /// XP between this level and the next.
    pub xp_needed: u64,
    /// Share of the level completed, in `[0, 1]`.
    pub fraction: f64,
}

/// Progress of `total_xp` through `level`.
///
/// The fraction is clamped into `[0, 1]` even when `level` does not match
/// `total_xp`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "progress is a ratio of XP counts"
)]
pub fn xp_progress(total_xp: u64, level: u8) -> XpProgress {
    let current = xp_required_for(level);
    let next = xp_required_for(level.saturating_add(1));
    let xp_in_level = total_xp.saturating_sub(current);
    let xp_needed = next.saturating_sub(current);
    let fraction = if xp_needed == 0 {
        1.0
    } else {
        (xp_in_level as f64 / xp_needed as f64).clamp(0.0, 1.0)
    };
    XpProgress {
        xp_in_level,
        xp_needed,
        fraction,
    }
}

/// The new level when moving from `old_xp` to `new_xp` crosses a boundary.
#[must_use]
pub fn check_level_up(old_xp: u64, new_xp: u64) -> Option<u8> {
    let old_level = level_from_xp(old_xp);
    let new_level = level_from_xp(new_xp);
    (new_level > old_level).then_some(new_level)
}
