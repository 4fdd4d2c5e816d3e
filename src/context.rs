//! Execution context for one invocation.
//!
//! Built by the dispatcher from the configuration and the root command's
//! options, it owns the API client and hands out the resource controller for
//! the invoked command.

use crate::{
    commands::params::{PARAMETER_EMAIL, PARAMETER_URL},
    commands::resource::ResourceCommand,
    configuration::Configuration,
    console::StdConsole,
    controller::ResourceController,
    error::CliError,
    http_utils::{HttpClient, HttpRequestConfig},
};
use clap::ArgMatches;
use tracing::debug;

/// Execution context containing common resources needed by CLI commands.
pub struct ExecutionContext {
    configuration: Configuration,
    api: HttpClient,
}

impl ExecutionContext {
    /// Create a new execution context from the root command's arguments.
    ///
    /// `--url` and `--email` override the configuration file.
    pub fn from_args(
        mut configuration: Configuration,
        matches: &ArgMatches,
    ) -> Result<Self, CliError> {
        if let Some(url) = matches.get_one::<String>(PARAMETER_URL) {
            configuration.set_url(url)?;
        }
        if let Some(email) = matches.get_one::<String>(PARAMETER_EMAIL) {
            configuration.set_email(email);
        }

        debug!(
            "Using API at {} as {}",
            configuration.url(),
            configuration.email().unwrap_or("<anonymous>")
        );

        let api = HttpClient::new(HttpRequestConfig::from_configuration(&configuration))?;

        Ok(ExecutionContext { configuration, api })
    }

    /// Controller bound to `resource` for the rest of the invocation.
    pub fn controller(&self, resource: &ResourceCommand) -> ResourceController<HttpClient, StdConsole> {
        ResourceController::new(self.api.clone(), StdConsole::new(), resource.name())
            .with_fields_map(resource.fields_map())
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}
