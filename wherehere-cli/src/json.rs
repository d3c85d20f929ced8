//! JSON input and output shared by the subcommands.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CliError;
use crate::fs::open_utf8_file;

/// Decode a JSON document from `path`.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` followed by a newline.
pub(crate) fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    value: &T,
    what: &'static str,
) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(value).map_err(|source| CliError::Serialise { what, source })?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
