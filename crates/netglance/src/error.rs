//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use netglance_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netglance::validation))]
    Validation { field: String, reason: String },

    #[error("Backend request timed out")]
    #[diagnostic(
        code(netglance::timeout),
        help("Increase the timeout with --timeout or check the backend endpoint.")
    )]
    Timeout,

    #[error("Backend error: {message}")]
    #[diagnostic(
        code(netglance::backend),
        help("Check network connectivity, or point --backend at a reachable endpoint.")
    )]
    Backend { message: String },

    #[error(transparent)]
    #[diagnostic(code(netglance::config))]
    Config(Box<figment::Error>),

    #[error("JSON encoding failed: {0}")]
    #[diagnostic(code(netglance::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BackendTimeout => CliError::Timeout,

            CoreError::BackendUnreachable { reason }
            | CoreError::MalformedPayload { reason } => CliError::Backend { message: reason },

            CoreError::ProbeLaunch { command, reason } => CliError::Backend {
                message: format!("signal probe '{command}' failed to launch: {reason}"),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Timeout => exit_code::TIMEOUT,
            Self::Backend { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}
