//! Exit codes for the nsot command-line client.
//!
//! These follow the BSD sysexits.h conventions where possible:
//! - 0: Success
//! - 64-78: Standard exit codes from sysexits.h
//! - 100+: Application-specific codes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsotExitCode {
    /// Command completed successfully
    Success = 0,

    /// Command line usage error, including an unknown command
    UsageError = 64,

    /// Results could not be displayed with the active field map
    DataError = 65,

    /// The API could not be reached
    Unavailable = 69,

    /// Unexpected application error
    SoftwareError = 70,

    /// Could not write to the terminal
    IoError = 74,

    /// Application configuration issue
    ConfigError = 78,

    /// Remote API rejected the request
    ApiError = 102,
}

impl NsotExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            NsotExitCode::Success => "Success",
            NsotExitCode::UsageError => "Command line usage error",
            NsotExitCode::DataError => "Data format error",
            NsotExitCode::Unavailable => "Service unavailable",
            NsotExitCode::SoftwareError => "Internal software error",
            NsotExitCode::IoError => "Input/output error",
            NsotExitCode::ConfigError => "Configuration error",
            NsotExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<NsotExitCode> for i32 {
    fn from(code: NsotExitCode) -> Self {
        code.code()
    }
}
