use thiserror::Error;

use crate::{
    api::ApiError, commands::loader::LoaderError, controller::ControllerError,
    exit_codes::NsotExitCode, format::FormattingError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested command has no registered implementation
    #[error("Error: {source}\n\n{usage}")]
    CommandNotFound { source: LoaderError, usage: String },
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),
    /// Error while setting up the API client
    #[error("Failed to initialize the API client: {0}")]
    ClientSetup(#[from] ApiError),
    /// Error while carrying out a resource action
    #[error(transparent)]
    ControllerError(#[from] ControllerError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> NsotExitCode {
        match self {
            CliError::CommandNotFound { .. } => NsotExitCode::UsageError,
            CliError::UnsupportedSubcommand(_) => NsotExitCode::SoftwareError,
            CliError::ConfigurationError(_) => NsotExitCode::ConfigError,
            CliError::ClientSetup(_) => NsotExitCode::ConfigError,
            CliError::ControllerError(e) => match e {
                ControllerError::Rejected { .. } => NsotExitCode::ApiError,
                ControllerError::Unreachable(_) => NsotExitCode::Unavailable,
                ControllerError::Formatting(FormattingError::Io(_)) => NsotExitCode::IoError,
                ControllerError::Formatting(_) => NsotExitCode::DataError,
                ControllerError::MissingIdentifier(..) => NsotExitCode::UsageError,
                ControllerError::InvalidIdentifier(_) => NsotExitCode::UsageError,
                ControllerError::Output(_) => NsotExitCode::IoError,
            },
        }
    }
}
