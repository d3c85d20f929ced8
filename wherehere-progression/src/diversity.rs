//! How varied a user's recent activity has been.
#![expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "diversity scores are ratios of small counts"
)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wherehere_core::{Location, Role};

/// Degrees of latitude in roughly one kilometre.
const DEGREES_PER_KM: f64 = 0.009;

/// Distinct categories needed for a full category score.
const CATEGORY_SATURATION: f64 = 20.0;

/// Weights of the role, location and category components.
const OVERALL_WEIGHTS: (f64, f64, f64) = (0.3, 0.4, 0.3);

/// Recent activity to score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityHistory {
    /// Roles used recently, repeats allowed.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Places visited recently.
    #[serde(default)]
    pub visits: Vec<Location>,
    /// Categories of the places visited.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Scores variety of roles, places and categories, each in `[0, 1]`.
///
/// Empty inputs score zero.
///
/// # Examples
/// ```
/// use wherehere_core::Role;
/// use wherehere_progression::DiversityScorer;
///
/// let scorer = DiversityScorer::default();
/// let roles = [Role::Explorer, Role::Healer, Role::Explorer, Role::Archivist];
/// assert!((scorer.role_diversity(&roles) - 0.6).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiversityScorer {
    grid_km: f64,
}

impl Default for DiversityScorer {
    fn default() -> Self {
        Self { grid_km: 1.0 }
    }
}

impl DiversityScorer {
    /// Scorer with a custom location grid size.
    ///
    /// Non-positive or non-finite sizes fall back to one kilometre.
    #[must_use]
    pub fn with_grid_km(grid_km: f64) -> Self {
        if grid_km.is_finite() && grid_km > 0.0 {
            Self { grid_km }
        } else {
            Self::default()
        }
    }

    /// Unique roles over the five available.
    #[must_use]
    pub fn role_diversity(&self, roles: &[Role]) -> f64 {
        let unique: HashSet<_> = roles.iter().collect();
        (unique.len() as f64 / Role::ALL.len() as f64).min(1.0)
    }

    /// Unique grid cells over the number of visits.
    #[must_use]
    pub fn location_diversity(&self, visits: &[Location]) -> f64 {
        if visits.is_empty() {
            return 0.0;
        }
        let unique: HashSet<_> = visits.iter().map(|visit| self.grid_cell(visit)).collect();
        (unique.len() as f64 / visits.len() as f64).min(1.0)
    }

    /// Logarithmic count of unique categories, saturating at twenty.
    #[must_use]
    pub fn category_diversity<S: AsRef<str>>(&self, categories: &[S]) -> f64 {
        let unique: HashSet<&str> = categories.iter().map(AsRef::as_ref).collect();
        if unique.is_empty() {
            return 0.0;
        }
        ((unique.len() as f64 + 1.0).ln() / CATEGORY_SATURATION.ln()).min(1.0)
    }

    /// Weighted blend: 0.3 role, 0.4 location and 0.3 category.
    #[must_use]
    pub fn overall(&self, history: &ActivityHistory) -> f64 {
        let (role_weight, location_weight, category_weight) = OVERALL_WEIGHTS;
        self.role_diversity(&history.roles) * role_weight
            + self.location_diversity(&history.visits) * location_weight
            + self.category_diversity(&history.categories) * category_weight
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "grid indices are truncated toward zero"
    )]
    fn grid_cell(&self, location: &Location) -> (i64, i64) {
        let cell = DEGREES_PER_KM * self.grid_km;
        (
            (location.lat() / cell) as i64,
            (location.lon() / cell) as i64,
        )
    }
}
