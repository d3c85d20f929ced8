//! Progress command implementation for the WhereHere CLI.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wherehere_core::{MemoryProgressionStore, UserProgression};
use wherehere_progression::{
    Action, ActivityEvent, ProgressionOutcome, ProgressionService, QuestCompletion,
};

use crate::fs::{file_is_file, write_utf8_file};
use crate::json::{load_json, write_json};
use crate::{
    ARG_PROGRESS_ACTION, ARG_PROGRESS_DIVERSITY, ARG_PROGRESS_STATE, ARG_PROGRESS_TODAY,
    ARG_PROGRESS_USER, CliError, ENV_PROGRESS_ACTION, ENV_PROGRESS_STATE, ENV_PROGRESS_USER,
};

/// Stored progression keyed by user id.
type StateFile = BTreeMap<String, UserProgression>;

/// CLI arguments for the `progress` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Record one action for a user. Progression is read from and \
                 written back to a JSON state file, which is created when it \
                 does not exist yet. The XP award, level change and streak are \
                 printed as JSON.",
    about = "Record a user action"
)]
#[ortho_config(prefix = "WHEREHERE")]
pub(crate) struct ProgressArgs {
    /// Path to the JSON progression state file.
    #[arg(long = ARG_PROGRESS_STATE, value_name = "path")]
    #[serde(default)]
    pub(crate) state: Option<Utf8PathBuf>,
    /// User whose progression is updated.
    #[arg(long = ARG_PROGRESS_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Action name such as `quest_complete`.
    #[arg(long = ARG_PROGRESS_ACTION, value_name = "name")]
    #[serde(default)]
    pub(crate) action: Option<String>,
    /// Day of the action (YYYY-MM-DD); defaults to the local date.
    #[arg(long = ARG_PROGRESS_TODAY, value_name = "date")]
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
    /// Diversity score in `[0, 1]` used for the award.
    #[arg(long = ARG_PROGRESS_DIVERSITY, value_name = "score")]
    #[serde(default)]
    pub(crate) diversity: Option<f64>,
    /// A photo was uploaded for the quest.
    #[arg(long)]
    #[serde(default)]
    pub(crate) photo_uploaded: bool,
    /// A review was written for the quest.
    #[arg(long)]
    #[serde(default)]
    pub(crate) review_written: bool,
    /// Minutes spent on site during the quest.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) duration_minutes: Option<u32>,
}

impl ProgressArgs {
    pub(crate) fn into_config(self) -> Result<ProgressConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ProgressConfig::try_from(merged)
    }
}

/// Resolved `progress` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProgressConfig {
    /// State file path.
    pub(crate) state: Utf8PathBuf,
    /// User id.
    pub(crate) user: String,
    /// Event to record.
    pub(crate) event: ActivityEvent,
}

impl TryFrom<ProgressArgs> for ProgressConfig {
    type Error = CliError;

    fn try_from(args: ProgressArgs) -> Result<Self, Self::Error> {
        let state = args.state.ok_or(CliError::MissingArgument {
            field: ARG_PROGRESS_STATE,
            env: ENV_PROGRESS_STATE,
        })?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_PROGRESS_USER,
            env: ENV_PROGRESS_USER,
        })?;
        let action_name = args.action.ok_or(CliError::MissingArgument {
            field: ARG_PROGRESS_ACTION,
            env: ENV_PROGRESS_ACTION,
        })?;
        let action: Action = action_name.parse()?;

        let today = args.today.unwrap_or_else(|| Local::now().date_naive());
        let mut event = ActivityEvent::new(action.as_str(), today);
        event.diversity = args.diversity.unwrap_or_default();
        if args.photo_uploaded || args.review_written || args.duration_minutes.is_some() {
            event.quest = Some(QuestCompletion {
                photo_uploaded: args.photo_uploaded,
                review_written: args.review_written,
                duration_minutes: args.duration_minutes,
            });
        }
        Ok(Self { state, user, event })
    }
}

pub(crate) fn run_progress(args: ProgressArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_progress_with(args, &mut stdout)
}

pub(crate) fn run_progress_with(
    args: ProgressArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let outcome = execute_progress(&config)?;
    write_json(writer, &outcome, "progression outcome")
}

pub(crate) fn execute_progress(config: &ProgressConfig) -> Result<ProgressionOutcome, CliError> {
    let users = load_state(&config.state)?;
    let service = ProgressionService::new(MemoryProgressionStore::from_snapshot(
        users.into_iter().collect::<HashMap<_, _>>(),
    ));
    let outcome = service
        .record(&config.user, &config.event)
        .map_err(|err| CliError::Progress {
            source: Box::new(err),
        })?;
    let updated: StateFile = service.store().snapshot().into_iter().collect();
    save_state(&config.state, &updated)?;
    Ok(outcome)
}

/// Read the state file, treating a missing file as empty.
fn load_state(path: &Utf8Path) -> Result<StateFile, CliError> {
    match file_is_file(path) {
        Ok(true) => load_json(path, ARG_PROGRESS_STATE),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field: ARG_PROGRESS_STATE,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!("state file {path} not found; starting fresh");
            Ok(StateFile::new())
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field: ARG_PROGRESS_STATE,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn save_state(path: &Utf8Path, state: &StateFile) -> Result<(), CliError> {
    let mut payload =
        serde_json::to_vec_pretty(state).map_err(|source| CliError::Serialise {
            what: "progression state",
            source,
        })?;
    payload.push(b'\n');
    write_utf8_file(path, &payload).map_err(|source| CliError::WriteState {
        path: path.to_path_buf(),
        source,
    })
}
