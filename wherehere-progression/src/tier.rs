//! Level tiers and the features they unlock.

use std::fmt;

use serde::Serialize;

use UnlockedFeature::{
    CreatorMode, CustomQuest, HiddenQuest, InviteFriend, LegendaryStatus, MasterBadge,
    PremiumNarrative,
};

/// Feature made available by reaching a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockedFeature {
    /// Quests hidden from new users.
    HiddenQuest,
    /// Inviting friends.
    InviteFriend,
    /// Authoring quests for others.
    CreatorMode,
    /// Richer quest narratives.
    PremiumNarrative,
    /// Fully custom quests.
    CustomQuest,
    /// Master badge.
    MasterBadge,
    /// Legendary profile status.
    LegendaryStatus,
}

/// A band of levels with shared perks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTier {
    /// Tier name.
    pub name: TierName,
    /// First level of the tier.
    pub min_level: u8,
    /// Last level of the tier.
    pub max_level: u8,
    /// Short description of the stage.
    pub description: &'static str,
    /// Features available in this tier.
    pub unlocked_features: &'static [UnlockedFeature],
    /// Badge colour as a hex string.
    pub badge_color: &'static str,
}

/// Name of a [`LevelTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TierName {
    /// Levels 1 to 5.
    Beginner,
    /// Levels 6 to 10.
    Intermediate,
    /// Levels 11 to 20.
    Advanced,
    /// Levels 21 to 35.
    Expert,
    /// Levels 36 to 50.
    Master,
}

impl TierName {
    /// Return the display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
            Self::Master => "Master",
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TIERS: [LevelTier; 5] = [
    LevelTier {
        name: TierName::Beginner,
        min_level: 1,
        max_level: 5,
        description: "Getting used to the app",
        unlocked_features: &[],
        badge_color: "#95A5A6",
    },
    LevelTier {
        name: TierName::Intermediate,
        min_level: 6,
        max_level: 10,
        description: "Building a habit",
        unlocked_features: &[HiddenQuest, InviteFriend],
        badge_color: "#3498DB",
    },
    LevelTier {
        name: TierName::Advanced,
        min_level: 11,
        max_level: 20,
        description: "Growing as a creator",
        unlocked_features: &[HiddenQuest, InviteFriend, CreatorMode, PremiumNarrative],
        badge_color: "#9B59B6",
    },
    LevelTier {
        name: TierName::Expert,
        min_level: 21,
        max_level: 35,
        description: "Widening influence",
        unlocked_features: &[
            HiddenQuest,
            InviteFriend,
            CreatorMode,
            PremiumNarrative,
            CustomQuest,
        ],
        badge_color: "#E67E22",
    },
    LevelTier {
        name: TierName::Master,
        min_level: 36,
        max_level: 50,
        description: "Gathering a following",
        unlocked_features: &[
            HiddenQuest,
            InviteFriend,
            CreatorMode,
            PremiumNarrative,
            CustomQuest,
            MasterBadge,
            LegendaryStatus,
        ],
        badge_color: "#F39C12",
    },
];

impl LevelTier {
    /// Tier containing `level`; levels above 50 fall into Master.
    ///
    /// # Examples
    /// ```
    /// use wherehere_progression::{LevelTier, TierName};
    ///
    /// assert_eq!(LevelTier::for_level(6).name, TierName::Intermediate);
    /// ```
    #[must_use]
    pub fn for_level(level: u8) -> &'static Self {
        let [beginner, .., master] = &TIERS;
        if level < beginner.min_level {
            return beginner;
        }
        TIERS
            .iter()
            .find(|tier| (tier.min_level..=tier.max_level).contains(&level))
            .unwrap_or(master)
    }

    /// All tiers in ascending order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &TIERS
    }

    /// Report whether the tier grants `feature`.
    #[must_use]
    pub fn unlocks(&self, feature: UnlockedFeature) -> bool {
        self.unlocked_features.contains(&feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, TierName::Beginner)]
    #[case(5, TierName::Beginner)]
    #[case(6, TierName::Intermediate)]
    #[case(20, TierName::Advanced)]
    #[case(21, TierName::Expert)]
    #[case(50, TierName::Master)]
    #[case(99, TierName::Master)]
    fn tiers_cover_every_level(#[case] level: u8, #[case] expected: TierName) {
        assert_eq!(LevelTier::for_level(level).name, expected);
    }

    #[rstest]
    fn tiers_are_contiguous() {
        for pair in LevelTier::all().windows(2) {
            assert_eq!(pair[0].max_level + 1, pair[1].min_level);
        }
    }

    #[rstest]
    fn features_accumulate() {
        assert!(!LevelTier::for_level(3).unlocks(UnlockedFeature::HiddenQuest));
        assert!(LevelTier::for_level(7).unlocks(UnlockedFeature::HiddenQuest));
        assert!(LevelTier::for_level(40).unlocks(UnlockedFeature::LegendaryStatus));
    }

    #[rstest]
    fn tier_serialises_with_display_name() {
        let json = serde_json::to_value(LevelTier::for_level(12)).expect("serialise");
        assert_eq!(json["name"], "Advanced");
        assert_eq!(json["unlocked_features"][2], "creator_mode");
    }
}
