//! Behaviour-driven step definitions driving the progress CLI scenarios.

use super::helpers::Workspace;
use super::*;
use camino::Utf8PathBuf;
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

struct ProgressWorld {
    workspace: RefCell<Option<Workspace>>,
    outputs: RefCell<Vec<Value>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ProgressWorld {
    fn state_path(&self) -> Utf8PathBuf {
        self.workspace
            .borrow()
            .as_ref()
            .expect("state directory prepared")
            .path("state.json")
    }

    fn record(&self, action: &str, today: &str) {
        let state = self.state_path();
        let argv = [
            "wherehere",
            "progress",
            "--state",
            state.as_str(),
            "--user",
            "u-1",
            "--action",
            action,
            "--today",
            today,
        ];
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let mut buffer = Vec::new();
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Progress(args) => progress::run_progress_with(args, &mut buffer),
            Command::Recommend(_) => panic!("expected progress command"),
        });
        if outcome.is_ok() {
            let output = serde_json::from_slice(&buffer).expect("output should be JSON");
            self.outputs.borrow_mut().push(output);
        }
        self.result.replace(Some(outcome));
    }

    fn last_output(&self) -> Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        self.outputs
            .borrow()
            .last()
            .cloned()
            .expect("output recorded")
    }
}

#[fixture]
fn world() -> ProgressWorld {
    ProgressWorld {
        workspace: RefCell::new(None),
        outputs: RefCell::new(Vec::new()),
        result: RefCell::new(None),
    }
}

#[given("an empty state directory")]
fn empty_state_directory(#[from(world)] world: &ProgressWorld) {
    world.workspace.replace(Some(Workspace::new()));
}

#[when("I record a first visit on 2024-06-03")]
fn record_first_visit(#[from(world)] world: &ProgressWorld) {
    world.record("first_visit", "2024-06-03");
}

#[when("I record photo uploads on two consecutive days")]
fn record_consecutive_uploads(#[from(world)] world: &ProgressWorld) {
    world.record("photo_upload", "2024-06-03");
    world.record("photo_upload", "2024-06-04");
}

#[when("I record an unknown action")]
fn record_unknown_action(#[from(world)] world: &ProgressWorld) {
    world.record("dance", "2024-06-03");
}

#[then("the command succeeds and awards 50 XP")]
fn awards_fifty(#[from(world)] world: &ProgressWorld) {
    assert_eq!(world.last_output()["xp_awarded"], 50);
}

#[then("the state file stores 50 XP for the user")]
fn state_stores_xp(#[from(world)] world: &ProgressWorld) {
    let raw = std::fs::read(world.state_path().as_std_path()).expect("read state");
    let state: Value = serde_json::from_slice(&raw).expect("state JSON");
    assert_eq!(state["u-1"]["total_xp"], 50);
}

#[then("the command succeeds and reports a streak of 2")]
fn reports_streak(#[from(world)] world: &ProgressWorld) {
    let output = world.last_output();
    assert_eq!(output["streak"], 2);
    assert_eq!(output["streak_continued"], true);
}

#[then("the command fails because the action is unknown")]
fn fails_unknown_action(#[from(world)] world: &ProgressWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::UnknownAction(source) => assert_eq!(source.name, "dance"),
        other => panic!("expected UnknownAction, found {other:?}"),
    }
}

macro_rules! register_progress_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/progress_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ProgressWorld) {
            let _ = world;
        }
    };
}

register_progress_scenario!(progress_first_visit, "recording a first visit");
register_progress_scenario!(progress_streak, "continuing a streak on the next day");
register_progress_scenario!(progress_unknown_action, "rejecting unknown actions");
