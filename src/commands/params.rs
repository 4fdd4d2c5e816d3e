//! Shared command parameters for all CLI commands.
//!
//! This module defines the parameter names and argument builders used by the
//! root command and by every resource command.

use clap::{Arg, ArgAction};

// Resource actions
pub const COMMAND_ADD: &str = "add";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_UPDATE: &str = "update";
pub const COMMAND_REMOVE: &str = "remove";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_URL: &str = "url";
pub const PARAMETER_EMAIL: &str = "email";
pub const PARAMETER_ID: &str = "id";
/// Raw arguments handed over to a resource command.
pub const PARAMETER_ARGS: &str = "args";

/// Create the global verbosity flag.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .help("Toggle verbosity.")
}

/// Create the API URL parameter.
pub fn url_parameter() -> Arg {
    Arg::new(PARAMETER_URL)
        .long(PARAMETER_URL)
        .num_args(1)
        .required(false)
        .env("NSOT_URL")
        .help("API base URL (e.g., http://localhost:8990/api)")
}

/// Create the principal identity parameter.
pub fn email_parameter() -> Arg {
    Arg::new(PARAMETER_EMAIL)
        .long(PARAMETER_EMAIL)
        .num_args(1)
        .required(false)
        .env("NSOT_EMAIL")
        .help("Email address used to authenticate against the API")
}

/// Create the object ID parameter.
pub fn id_parameter(required: bool) -> Arg {
    Arg::new(PARAMETER_ID)
        .short('I')
        .long(PARAMETER_ID)
        .num_args(1)
        .required(required)
        .value_parser(clap::value_parser!(i64))
        .help("Unique ID of the object")
}

/// Everything after a command name, parsed later by the resolved command.
pub fn forwarded_args_parameter() -> Arg {
    Arg::new(PARAMETER_ARGS)
        .num_args(0..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true)
        .value_parser(clap::value_parser!(std::ffi::OsString))
}

/// Parse a `key=value` attribute.
pub fn parse_attribute(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", s)),
    }
}
