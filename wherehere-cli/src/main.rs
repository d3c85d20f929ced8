//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use wherehere_cli::CliError;

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn main() -> ExitCode {
    match wherehere_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("wherehere: {err}");
            ExitCode::FAILURE
        }
    }
}
