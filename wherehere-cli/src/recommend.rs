//! Recommend command implementation for the WhereHere CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wherehere_core::{
    Candidate, CandidateSource, MemoryCandidateSource, RecommendationRequest,
    RecommendationResult, Recommender, SeededRandom,
};
use wherehere_recommender::RoleRecommender;

use crate::fs::require_existing;
use crate::json::{load_json, write_json};
use crate::{
    ARG_RECOMMEND_PLACES, ARG_RECOMMEND_POIS_DB, ARG_RECOMMEND_REQUEST, ARG_RECOMMEND_SEED,
    ARG_RECOMMEND_TOP_K, CliError, ENV_RECOMMEND_PLACES, ENV_RECOMMEND_REQUEST,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank places around the request location for the request's \
                 role. Places come either from a JSON array of places or from \
                 a SQLite places database. The request itself is provided as \
                 a JSON-encoded RecommendationRequest.",
    about = "Recommend places for a role"
)]
#[ortho_config(prefix = "WHEREHERE")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a RecommendationRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON array of places.
    #[arg(long = ARG_RECOMMEND_PLACES, value_name = "path")]
    #[serde(default)]
    pub(crate) places: Option<Utf8PathBuf>,
    /// Path to a SQLite places database.
    #[arg(long = ARG_RECOMMEND_POIS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) pois_db: Option<Utf8PathBuf>,
    /// Override the number of places returned.
    #[arg(long = ARG_RECOMMEND_TOP_K, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Override the exploration seed.
    #[arg(long = ARG_RECOMMEND_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Where candidate places are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlaceSource {
    /// JSON array of places held in memory.
    Fixture(Utf8PathBuf),
    /// SQLite places database.
    Database(Utf8PathBuf),
}

impl PlaceSource {
    fn path(&self) -> &Utf8Path {
        match self {
            Self::Fixture(path) | Self::Database(path) => path,
        }
    }

    const fn field(&self) -> &'static str {
        match self {
            Self::Fixture(_) => ARG_RECOMMEND_PLACES,
            Self::Database(_) => ARG_RECOMMEND_POIS_DB,
        }
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Candidate places.
    pub(crate) places: PlaceSource,
    /// Overrides the request's `top_k`.
    pub(crate) top_k: Option<usize>,
    /// Overrides the request's seed.
    pub(crate) seed: Option<u64>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_RECOMMEND_REQUEST)?;
        require_existing(self.places.path(), self.places.field())?;
        Ok(())
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        let places = match (args.places, args.pois_db) {
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_RECOMMEND_PLACES,
                    second: ARG_RECOMMEND_POIS_DB,
                });
            }
            (Some(path), None) => PlaceSource::Fixture(path),
            (None, Some(path)) => PlaceSource::Database(path),
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_RECOMMEND_PLACES,
                    env: ENV_RECOMMEND_PLACES,
                });
            }
        };
        Ok(Self {
            request_path,
            places,
            top_k: args.top_k,
            seed: args.seed,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let result = execute_recommend(&config)?;
    write_json(writer, &result, "recommendation result")
}

pub(crate) fn execute_recommend(
    config: &RecommendConfig,
) -> Result<RecommendationResult, CliError> {
    let mut request: RecommendationRequest =
        load_json(&config.request_path, ARG_RECOMMEND_REQUEST)?;
    if let Some(top_k) = config.top_k {
        request.top_k = top_k;
    }
    if config.seed.is_some() {
        request.seed = config.seed;
    }

    match &config.places {
        PlaceSource::Fixture(path) => {
            let places: Vec<Candidate> = load_json(path, ARG_RECOMMEND_PLACES)?;
            debug!("loaded {} places from {path}", places.len());
            recommend_from(MemoryCandidateSource::with_places(places), &request)
        }
        PlaceSource::Database(path) => recommend_from_database(path, &request),
    }
}

#[cfg(feature = "store-sqlite")]
fn recommend_from_database(
    path: &Utf8Path,
    request: &RecommendationRequest,
) -> Result<RecommendationResult, CliError> {
    let source = wherehere_core::SqliteCandidateSource::open(path.as_std_path())?;
    debug!("indexed {} places from {path}", source.len());
    recommend_from(source, request)
}

#[cfg(not(feature = "store-sqlite"))]
fn recommend_from_database(
    _path: &Utf8Path,
    _request: &RecommendationRequest,
) -> Result<RecommendationResult, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "reading --pois-db",
    })
}

fn recommend_from<S: CandidateSource>(
    source: S,
    request: &RecommendationRequest,
) -> Result<RecommendationResult, CliError> {
    let recommender = RoleRecommender::new(source, SeededRandom::from_entropy());
    recommender
        .recommend(request)
        .map_err(|err| CliError::Recommend {
            source: Box::new(err),
        })
}
