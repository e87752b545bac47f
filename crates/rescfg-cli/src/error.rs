//! CLI error type and exit code mapping

use rescfg_core::PatchError;
use thiserror::Error;

/// Exit code for usage errors (EX_USAGE-style, matches clap)
pub const EXIT_USAGE: i32 = 2;
/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad invocation; printed with a pointer to `--help`
    #[error("{message}")]
    Usage { message: String, command: String },

    /// No session token available
    #[error("You are not logged in. Set RESCFG_TOKEN or store a token in {path}")]
    NotLoggedIn { path: String },

    /// Pipeline failure other than usage
    #[error(transparent)]
    Patch(PatchError),

    /// Settings, credentials or client setup failure
    #[error("{0}")]
    Setup(String),
}

impl CliError {
    /// Wrap a pipeline error, routing usage errors to the usage class
    pub fn from_patch(err: PatchError, command: &str) -> Self {
        match err {
            PatchError::Usage(message) => Self::Usage {
                message,
                command: command.to_string(),
            },
            other => Self::Patch(other),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => EXIT_USAGE,
            Self::NotLoggedIn { .. } | Self::Patch(_) | Self::Setup(_) => EXIT_FAILURE,
        }
    }

    /// Extra line printed after the error message
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Usage { command, .. } => {
                Some(format!("Run `rescfg config {command} --help` for usage."))
            }
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Setup(format!("{err:#}"))
    }
}

impl From<rescfg_api::ApiError> for CliError {
    fn from(err: rescfg_api::ApiError) -> Self {
        Self::Setup(err.to_string())
    }
}
