//! Failures of one CLI invocation and the exit code each one ends with.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | argument parse error, reported by clap before `run` |
//! | 10   | the core rejected the request (no charges, bad resolution or domain) |
//! | 11   | reading the scene or writing output failed |
//! | 12   | malformed user input: `--params`, scene JSON, probe point |
//! | 13   | encoding the result as JSON failed |

use equipotential_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Field(FieldError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<FieldError> for CliError {
    /// Scene parse failures are the user's input; file access failures keep
    /// their own code.
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            err @ FieldError::InvalidScene(_) => CliError::Input(err.to_string()),
            other => CliError::Field(other),
        }
    }
}
