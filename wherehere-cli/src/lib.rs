//! Command-line interface for the WhereHere engine.
//!
//! Two subcommands are provided:
//! - `recommend` ranks places for a JSON request against a JSON fixture of
//!   places or a SQLite places database.
//! - `progress` records one user action against a JSON state file and
//!   reports the XP, level and streak changes.
//!
//! Both print pretty JSON on stdout. Options can also come from
//! configuration files and `WHEREHERE_*` environment variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod json;
mod progress;
mod recommend;

pub use error::CliError;

use progress::{ProgressArgs, run_progress};
use recommend::{RecommendArgs, run_recommend};

const ARG_RECOMMEND_REQUEST: &str = "request";
const ARG_RECOMMEND_PLACES: &str = "places";
const ARG_RECOMMEND_POIS_DB: &str = "pois-db";
const ARG_RECOMMEND_TOP_K: &str = "top-k";
const ARG_RECOMMEND_SEED: &str = "seed";
const ENV_RECOMMEND_REQUEST: &str = "WHEREHERE_CMDS_RECOMMEND_REQUEST_PATH";
const ENV_RECOMMEND_PLACES: &str = "WHEREHERE_CMDS_RECOMMEND_PLACES";

const ARG_PROGRESS_STATE: &str = "state";
const ARG_PROGRESS_USER: &str = "user";
const ARG_PROGRESS_ACTION: &str = "action";
const ARG_PROGRESS_TODAY: &str = "today";
const ARG_PROGRESS_DIVERSITY: &str = "diversity";
const ENV_PROGRESS_STATE: &str = "WHEREHERE_CMDS_PROGRESS_STATE";
const ENV_PROGRESS_USER: &str = "WHEREHERE_CMDS_PROGRESS_USER";
const ENV_PROGRESS_ACTION: &str = "WHEREHERE_CMDS_PROGRESS_ACTION";

/// Run the WhereHere CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs cannot be read or
/// the command itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Progress(args) => run_progress(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wherehere",
    about = "Role-aware place recommendations and progression tracking",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank places around a location for a role.
    Recommend(RecommendArgs),
    /// Record a user action and update XP, level and streak.
    Progress(ProgressArgs),
}

#[cfg(test)]
mod tests;
