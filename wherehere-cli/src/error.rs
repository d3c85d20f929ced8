//! Error types emitted by the WhereHere CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wherehere_progression::UnknownActionError;

/// Boxed failure raised by a candidate source or progression store.
pub type BoxedSourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors emitted by the WhereHere CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Two options that cannot be combined were both given.
    #[error("--{first} and --{second} cannot be used together")]
    ConflictingArguments {
        /// First flag.
        first: &'static str,
        /// Second flag.
        second: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature name.
        feature: &'static str,
        /// What the user tried to do.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening a JSON input failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input could not be decoded.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the SQLite places database failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenPlaces(#[from] wherehere_core::SqliteCandidateSourceError),
    /// The candidate source failed while answering the request.
    #[error("recommendation failed: {source}")]
    Recommend {
        /// Failure raised by the candidate source.
        #[source]
        source: BoxedSourceError,
    },
    /// The action name is not one the progression system knows.
    #[error(transparent)]
    UnknownAction(#[from] UnknownActionError),
    /// Recording progression failed.
    #[error("progression update failed: {source}")]
    Progress {
        /// Failure raised by the progression store.
        #[source]
        source: BoxedSourceError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise {what}: {source}")]
    Serialise {
        /// What was being serialised.
        what: &'static str,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the progression state file failed.
    #[error("failed to write state to {path:?}: {source}")]
    WriteState {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
