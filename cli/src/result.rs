use std::fmt::Display;
use std::io;

use serde::Serialize;
use serde_derive::Serialize;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct CliErrorInfo {
    pub kind: CliErrorKind,
    pub code: i32,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", content = "data")]
#[serde(rename_all = "lowercase")]
pub enum CliResult<T> {
    Success(T),
    Error(CliErrorInfo),
}

impl From<&CliError> for CliErrorInfo {
    fn from(error: &CliError) -> Self {
        Self {
            kind: error.kind,
            code: error.kind.exit_code(),
            description: error.description.to_string(),
        }
    }
}

/// Print a command result, as JSON or as text.
/// Errors are passed on so the caller can set the exit code.
pub fn emit<T: Serialize + Display>(json: bool, result: Result<T, CliError>) -> Result<(), CliError> {
    if !json {
        println!("{}", result?);
        return Ok(());
    }

    let (cli_result, error) = match result {
        Ok(v) => (CliResult::Success(v), None),
        Err(err) => (CliResult::Error(CliErrorInfo::from(&err)), Some(err)),
    };

    let stdout = io::stdout();

    serde_json::to_writer_pretty(stdout.lock(), &cli_result)
        .map_err(|err| CliError::new(CliErrorKind::Other, err.to_string()))?;
    println!();

    match error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
