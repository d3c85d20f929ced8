//! Top-K selection.

use wherehere_core::ScoredCandidate;

/// Orders scored candidates and keeps the best `k`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSelector;

impl RankSelector {
    /// Sort by descending `final_score` and keep the first `k`.
    ///
    /// The sort is stable, so equal scores keep their input order. Elements
    /// are moved, never modified.
    ///
    /// # Examples
    /// ```
    /// use wherehere_core::{Candidate, ScoredCandidate, ScoreBreakdown};
    /// use wherehere_scorer::RankSelector;
    ///
    /// let scored = |id: &str, score: f64| ScoredCandidate {
    ///     candidate: Candidate::new(id, id, 0.0),
    ///     final_score: score,
    ///     breakdown: ScoreBreakdown::new(),
    ///     reason: String::new(),
    ///     defects: Vec::new(),
    /// };
    /// let top = RankSelector::select(vec![scored("a", 1.0), scored("b", 3.0)], 1);
    /// assert_eq!(top[0].candidate.id, "b");
    /// ```
    #[must_use]
    pub fn select(mut scored: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        scored.truncate(k);
        scored
    }
}
