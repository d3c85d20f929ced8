//! Behavioural tests for candidate scoring using rstest-bdd.
#![expect(clippy::expect_used, reason = "behaviour tests fail loudly on missing state")]

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wherehere_core::{Candidate, Factor, FixedRandom, Mood, Role, ScoredCandidate};
use wherehere_scorer::{RankSelector, ScoringContext, ScoringEngine};

/// Shared state for scoring scenarios.
struct ScoringWorld {
    engine: ScoringEngine,
    context: RefCell<Option<ScoringContext>>,
    candidates: RefCell<Vec<Candidate>>,
    scored: RefCell<Vec<ScoredCandidate>>,
}

impl ScoringWorld {
    fn context(&self) -> ScoringContext {
        self.context
            .borrow()
            .clone()
            .expect("a scoring context should be configured")
    }

    fn first(&self) -> ScoredCandidate {
        self.scored
            .borrow()
            .first()
            .cloned()
            .expect("at least one scored candidate")
    }
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld {
        engine: ScoringEngine::default(),
        context: RefCell::new(None),
        candidates: RefCell::new(Vec::new()),
        scored: RefCell::new(Vec::new()),
    }
}

#[given("a healer at level 3")]
fn given_healer(world: &ScoringWorld) {
    world
        .context
        .replace(Some(ScoringContext::new(Role::Healer, 3)));
}

#[given("a healer at level 3 who feels tired")]
fn given_tired_healer(world: &ScoringWorld) {
    let mut context = ScoringContext::new(Role::Healer, 3);
    context.mood = Some(Mood::new("지침", 0.8));
    world.context.replace(Some(context));
}

#[given("an explorer at level 12")]
fn given_explorer(world: &ScoringWorld) {
    world
        .context
        .replace(Some(ScoringContext::new(Role::Explorer, 12)));
}

#[given("a park 200 metres away")]
fn given_park(world: &ScoringWorld) {
    world
        .candidates
        .replace(vec![Candidate::new("park", "Seoul Forest", 200.0).with_category("공원")]);
}

#[given("a quiet cafe and a lively pub at the same distance")]
fn given_cafe_and_pub(world: &ScoringWorld) {
    world.candidates.replace(vec![
        Candidate::new("pub", "Noisy Pub", 300.0)
            .with_category("카페")
            .with_vibe("lively")
            .with_price(8_000),
        Candidate::new("cafe", "Quiet Cafe", 300.0)
            .with_category("카페")
            .with_vibe("quiet")
            .with_vibe("cozy")
            .with_price(8_000),
    ]);
}

#[given("an ordinary alley and a hidden gem alley at the same distance")]
fn given_alleys(world: &ScoringWorld) {
    world.candidates.replace(vec![
        Candidate::new("ordinary", "Main Alley", 1_500.0).with_category("기타"),
        Candidate::new("gem", "Hidden Alley", 1_500.0)
            .with_category("기타")
            .hidden_gem(),
    ]);
}

#[given("a place with no category, price or valid distance")]
fn given_broken(world: &ScoringWorld) {
    world
        .candidates
        .replace(vec![Candidate::new("broken", "?", -1.0)]);
}

#[when("the candidate is scored without exploration noise")]
fn when_scored(world: &ScoringWorld) {
    let context = world.context();
    let scored = world.engine.score_all(
        &world.candidates.borrow(),
        &context,
        &mut FixedRandom::new(0.0),
    );
    world.scored.replace(scored);
}

#[when("the candidates are scored and ranked")]
fn when_ranked(world: &ScoringWorld) {
    let context = world.context();
    let scored = world.engine.score_all(
        &world.candidates.borrow(),
        &context,
        &mut FixedRandom::new(0.0),
    );
    world.scored.replace(RankSelector::select(scored, 3));
}

#[then("the category contributes 100 points before weighting")]
fn then_category(world: &ScoringWorld) {
    assert_eq!(world.first().breakdown[&Factor::Category], 100.0);
}

#[then("the distance contributes 94.18 points before weighting")]
fn then_distance(world: &ScoringWorld) {
    assert_eq!(world.first().breakdown[&Factor::Distance], 94.18);
}

#[then("the final score is at least 63.5")]
fn then_final(world: &ScoringWorld) {
    assert!(world.first().final_score >= 63.5);
}

#[then("the reason names the park category")]
fn then_reason(world: &ScoringWorld) {
    assert!(world.first().reason.contains("공원"));
}

#[then("the quiet cafe ranks first")]
fn then_cafe_first(world: &ScoringWorld) {
    assert_eq!(world.first().candidate.id, "cafe");
}

#[then("the hidden gem alley ranks first")]
fn then_gem_first(world: &ScoringWorld) {
    assert_eq!(world.first().candidate.id, "gem");
}

#[then("the hidden gem reason is given")]
fn then_gem_reason(world: &ScoringWorld) {
    assert!(world.first().reason.contains("히든 스팟"));
}

#[then("the score is finite")]
fn then_finite(world: &ScoringWorld) {
    assert!(world.first().final_score.is_finite());
}

#[then("three defects are recorded")]
fn then_defects(world: &ScoringWorld) {
    assert_eq!(world.first().defects.len(), 3);
}

#[scenario(path = "tests/features/scoring.feature", index = 0)]
fn healer_park(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 1)]
fn tired_mood(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 2)]
fn hidden_gem(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 3)]
fn incomplete_place(world: ScoringWorld) {
    let _ = world;
}
