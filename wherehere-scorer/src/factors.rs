//! Individual scoring factors.
//!
//! Sub-scores are normalised to `[0.0, 1.0]`. Bonuses are flat points added
//! to the final score as-is.
#![expect(
    clippy::float_arithmetic,
    reason = "scoring factors are floating-point formulas"
)]

use std::collections::BTreeSet;

use wherehere_core::{Candidate, CandidateDefect, Mood, Role, RoleProfile};

use crate::ScoringConfig;

/// Weight at which the weather and time bonuses are neutral.
const CONTEXT_PIVOT: f64 = 0.7;

/// Points per unit of weight above or below [`CONTEXT_PIVOT`].
const CONTEXT_SCALE: f64 = 10.0;

/// Sub-score paired with the defect recovered while computing it.
pub(crate) type Recovered = (f64, Option<CandidateDefect>);

/// Atmosphere keywords associated with a mood.
///
/// Unknown moods map to an empty slice.
///
/// # Examples
/// ```
/// use wherehere_scorer::mood_keywords;
///
/// assert_eq!(mood_keywords("지침"), ["quiet", "cozy", "calm"]);
/// assert!(mood_keywords("평온한").is_empty());
/// ```
#[must_use]
pub fn mood_keywords(mood: &str) -> &'static [&'static str] {
    match mood {
        "지침" => &["quiet", "cozy", "calm"],
        "활기찬" => &["energetic", "vibrant", "lively"],
        "우울한" => &["cozy", "warm", "intimate"],
        "외로운" => &["social", "friendly", "warm"],
        "흥분된" => &["exciting", "energetic", "vibrant"],
        _ => &[],
    }
}

pub(crate) fn category_fit(
    profile: &RoleProfile,
    candidate: &Candidate,
    config: &ScoringConfig,
) -> Recovered {
    let Some(primary) = candidate.primary_category.as_deref() else {
        return (
            config.default_category_weight.min(1.0),
            Some(CandidateDefect::MissingCategory),
        );
    };
    let base = profile
        .category_weight(primary)
        .unwrap_or(config.default_category_weight);
    let secondary: f64 = candidate
        .secondary_categories
        .iter()
        .filter_map(|category| profile.category_weight(category))
        .map(|weight| weight * config.secondary_category_share)
        .sum();
    ((base + secondary).clamp(0.0, 1.0), None)
}

pub(crate) fn distance_fit(role: Role, distance_meters: f64, config: &ScoringConfig) -> Recovered {
    if !distance_meters.is_finite() || distance_meters < 0.0 {
        return (0.0, Some(CandidateDefect::InvalidDistance));
    }
    let decay = if role == Role::Achiever {
        config.achiever_distance_decay
    } else {
        config.distance_decay
    };
    ((-decay * distance_meters).exp(), None)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "keyword counts are tiny"
)]
pub(crate) fn vibe_match(mood: Option<&Mood>, tags: &BTreeSet<String>, neutral: f64) -> f64 {
    let Some(current) = mood else {
        return neutral;
    };
    if tags.is_empty() {
        return neutral;
    }
    let keywords = mood_keywords(&current.text);
    let matches = keywords
        .iter()
        .filter(|keyword| tags.contains(**keyword))
        .count();
    matches as f64 / keywords.len().max(1) as f64
}

pub(crate) fn cost_fit(profile: &RoleProfile, candidate: &Candidate) -> Recovered {
    let effective_price = candidate.effective_price();
    let defect = effective_price
        .is_none()
        .then_some(CandidateDefect::MissingPrice);
    if candidate.is_free() {
        return (1.0, defect);
    }
    let price = f64::from(effective_price.unwrap_or_default());
    let threshold = f64::from(profile.cost_threshold);
    if price <= threshold {
        return (1.0, defect);
    }
    let overshoot = if threshold > 0.0 {
        (price - threshold) / threshold
    } else {
        1.0
    };
    ((1.0 - overshoot * profile.cost_sensitivity).max(0.0), defect)
}

/// Flat bonus for a weather or time-of-day weight.
pub(crate) fn context_bonus(weight: f64) -> f64 {
    (weight - CONTEXT_PIVOT) * CONTEXT_SCALE
}

pub(crate) fn level_bonus(role: Role, level: u8, hidden_gem: bool, config: &ScoringConfig) -> f64 {
    if !hidden_gem {
        return 0.0;
    }
    let veteran = if level >= config.hidden_gem_min_level {
        config.hidden_gem_bonus
    } else {
        0.0
    };
    let explorer = if role == Role::Explorer {
        config.explorer_hidden_gem_bonus
    } else {
        0.0
    };
    veteran + explorer
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wherehere_core::{PriceTier, RoleCatalog};

    #[fixture]
    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[rstest]
    fn rated_category_uses_table_weight(config: ScoringConfig) {
        let park = Candidate::new("p", "park", 0.0).with_category("공원");
        let (fit, defect) = category_fit(RoleCatalog::profile(Role::Healer), &park, &config);
        assert!(close(fit, 1.0));
        assert!(defect.is_none());
    }

    #[rstest]
    fn secondary_categories_add_a_share(config: ScoringConfig) {
        let place = Candidate::new("p", "alley", 0.0)
            .with_category("편의점")
            .with_secondary("골목길");
        let (fit, _) = category_fit(RoleCatalog::profile(Role::Explorer), &place, &config);
        assert!(close(fit, 0.3 + 0.2));
    }

    #[rstest]
    fn missing_category_is_recovered(config: ScoringConfig) {
        let place = Candidate::new("p", "unknown", 0.0);
        let (fit, defect) = category_fit(RoleCatalog::profile(Role::Healer), &place, &config);
        assert!(close(fit, 0.3));
        assert_eq!(defect, Some(CandidateDefect::MissingCategory));
    }

    #[rstest]
    #[case(Role::Healer, 200.0, (-0.06_f64).exp())]
    #[case(Role::Achiever, 200.0, (-0.02_f64).exp())]
    #[case(Role::Explorer, 0.0, 1.0)]
    fn distance_decays_by_role(
        config: ScoringConfig,
        #[case] role: Role,
        #[case] distance: f64,
        #[case] expected: f64,
    ) {
        let (fit, defect) = distance_fit(role, distance, &config);
        assert!(close(fit, expected));
        assert!(defect.is_none());
    }

    #[rstest]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_distance_scores_zero(config: ScoringConfig, #[case] distance: f64) {
        let (fit, defect) = distance_fit(Role::Healer, distance, &config);
        assert!(close(fit, 0.0));
        assert_eq!(defect, Some(CandidateDefect::InvalidDistance));
    }

    #[rstest]
    fn vibe_counts_matching_keywords() {
        let tags = BTreeSet::from([String::from("quiet"), String::from("calm")]);
        let tired = Mood::new("지침", 0.8);
        assert!(close(vibe_match(Some(&tired), &tags, 0.5), 2.0 / 3.0));
    }

    #[rstest]
    fn vibe_is_neutral_without_mood_or_tags() {
        let tags = BTreeSet::from([String::from("quiet")]);
        assert!(close(vibe_match(None, &tags, 0.5), 0.5));
        let lonely = Mood::new("외로운", 0.5);
        assert!(close(vibe_match(Some(&lonely), &BTreeSet::new(), 0.5), 0.5));
    }

    #[rstest]
    fn unknown_mood_matches_nothing() {
        let tags = BTreeSet::from([String::from("quiet")]);
        let calm = Mood::new("평온한", 0.5);
        assert!(close(vibe_match(Some(&calm), &tags, 0.5), 0.0));
    }

    #[rstest]
    fn cost_within_threshold_is_full() {
        let healer = RoleCatalog::profile(Role::Healer);
        let place = Candidate::new("c", "cafe", 0.0).with_price(healer.cost_threshold);
        assert_eq!(cost_fit(healer, &place), (1.0, None));
    }

    #[rstest]
    fn cost_above_threshold_is_penalised() {
        let healer = RoleCatalog::profile(Role::Healer);
        let price = healer.cost_threshold * 2;
        let place = Candidate::new("c", "cafe", 0.0).with_price(price);
        let (fit, _) = cost_fit(healer, &place);
        assert!(close(fit, (1.0 - healer.cost_sensitivity).max(0.0)));
    }

    #[rstest]
    fn missing_price_counts_as_free_with_a_defect() {
        let healer = RoleCatalog::profile(Role::Healer);
        let place = Candidate::new("c", "cafe", 0.0);
        assert_eq!(
            cost_fit(healer, &place),
            (1.0, Some(CandidateDefect::MissingPrice))
        );
    }

    #[rstest]
    fn tier_without_price_uses_the_typical_price() {
        let healer = RoleCatalog::profile(Role::Healer);
        let mut tiered = Candidate::new("c", "steakhouse", 0.0);
        tiered.price_tier = Some(PriceTier::High);
        let priced =
            Candidate::new("c", "steakhouse", 0.0).with_price(PriceTier::High.typical_price());
        let (fit, defect) = cost_fit(healer, &tiered);
        assert_eq!(defect, None);
        assert!(fit < 1.0);
        assert_eq!(cost_fit(healer, &priced), (fit, None));
    }

    #[rstest]
    fn free_tier_is_not_a_defect() {
        let healer = RoleCatalog::profile(Role::Healer);
        let mut place = Candidate::new("c", "temple", 0.0);
        place.price_tier = Some(PriceTier::Free);
        assert_eq!(cost_fit(healer, &place), (1.0, None));
    }

    #[rstest]
    #[case(0.7, 0.0)]
    #[case(1.0, 3.0)]
    #[case(0.4, -3.0)]
    fn context_bonus_is_flat(#[case] weight: f64, #[case] expected: f64) {
        assert!(close(context_bonus(weight), expected));
    }

    #[rstest]
    #[case(Role::Healer, 6, true, 15.0)]
    #[case(Role::Healer, 5, true, 0.0)]
    #[case(Role::Explorer, 6, true, 25.0)]
    #[case(Role::Explorer, 2, true, 10.0)]
    #[case(Role::Explorer, 20, false, 0.0)]
    fn level_bonus_rewards_hidden_gems(
        config: ScoringConfig,
        #[case] role: Role,
        #[case] level: u8,
        #[case] hidden: bool,
        #[case] expected: f64,
    ) {
        assert!(close(level_bonus(role, level, hidden, &config), expected));
    }
}
