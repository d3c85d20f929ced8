//! One-line explanations keyed to the strongest factor.

use wherehere_core::{Candidate, Factor, RoleProfile};

/// Contributions eligible to explain a recommendation, in tie-break order.
pub(crate) const EXPLAINING_FACTORS: [Factor; 5] = [
    Factor::Category,
    Factor::Distance,
    Factor::Vibe,
    Factor::Cost,
    Factor::LevelBonus,
];

/// Pick the factor with the largest contribution.
///
/// `contributions` must follow [`EXPLAINING_FACTORS`]; on ties the earlier
/// factor wins.
pub(crate) fn top_factor(contributions: [f64; 5]) -> Factor {
    EXPLAINING_FACTORS
        .into_iter()
        .zip(contributions)
        .fold((Factor::Category, f64::NEG_INFINITY), |best, current| {
            if current.1 > best.1 { current } else { best }
        })
        .0
}

/// Render the sentence for `factor`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "distances are shown in whole metres"
)]
pub(crate) fn render(factor: Factor, profile: &RoleProfile, candidate: &Candidate) -> String {
    match (factor, candidate.primary_category.as_deref()) {
        (Factor::Category, Some(category)) => format!(
            "{}에게 딱 맞는 {category} 카테고리입니다",
            profile.korean_name
        ),
        (Factor::Distance, _) => format!(
            "가까운 거리({}m)에 있어 편리합니다",
            candidate.distance_meters.max(0.0).trunc() as u64
        ),
        (Factor::Vibe, _) => String::from("지금 기분에 잘 어울리는 분위기입니다"),
        (Factor::Cost, _) => format!("{}의 예산에 적합한 가격대입니다", profile.korean_name),
        (Factor::LevelBonus, _) => {
            String::from("당신의 레벨에서만 발견할 수 있는 히든 스팟입니다")
        }
        _ => String::from("추천 장소입니다"),
    }
}
