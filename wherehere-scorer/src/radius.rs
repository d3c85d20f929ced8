//! Search radius derived from role and level.

use wherehere_core::{MAX_LEVEL, MIN_LEVEL, Role, RoleCatalog};

/// Computes how far to search for a role at a given level.
///
/// The base radius grows logarithmically with level and is clamped into the
/// role's `[radius_min, radius_max]` band.
///
/// # Examples
/// ```
/// use wherehere_core::Role;
/// use wherehere_scorer::RadiusCalculator;
///
/// // Healer base 800 m at level 1: 800 × (1 + ln 2 / 4) ≈ 939.
/// assert_eq!(RadiusCalculator::compute_radius(Role::Healer, 1), 939);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiusCalculator;

impl RadiusCalculator {
    /// Radius in metres for `role` at `level`.
    ///
    /// Levels outside `1..=50` are clamped first.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "radius expansion is a logarithmic curve"
    )]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the rounded radius is clamped into the role's u32 band"
    )]
    pub fn compute_radius(role: Role, level: u8) -> u32 {
        let profile = RoleCatalog::profile(role);
        let bounded_level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        let expansion = 1.0 + (f64::from(bounded_level) + 1.0).ln() / 4.0;
        let radius = (f64::from(profile.radius_base) * expansion).round();
        let clamped = radius.clamp(
            f64::from(profile.radius_min),
            f64::from(profile.radius_max),
        );
        clamped as u32
    }
}
