//! Command-line client for the Network Source of Truth (NSoT) REST API.
//!
//! Every resource (devices, networks, ...) is exposed as a subcommand with
//! `add`, `list`, `update` and `remove` actions. The generic machinery lives
//! here:
//!
//! - `commands`: root command, command registry and resource plugins
//! - `controller`: maps actions to API calls, including fetch-merge-put updates
//! - `format`: field mapping and table rendering
//! - `api` / `http_utils`: the API client capability and its HTTP implementation
//! - `cli` / `context`: the top-level dispatcher and per-invocation state

pub mod api;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod console;
pub mod context;
pub mod controller;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod http_utils;
pub mod model;
