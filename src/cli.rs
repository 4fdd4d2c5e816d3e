//! Top-level dispatcher.
//!
//! Parses the root command, builds the execution context, resolves the
//! requested resource command through the loader and runs it.

use crate::{
    commands::{
        loader::CommandLoader,
        params::{PARAMETER_ARGS, PARAMETER_VERBOSE},
        root_command, PLUGINS,
    },
    configuration::Configuration,
    context::ExecutionContext,
    error::CliError,
};
use std::ffi::OsString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Set up logging to standard error.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` turns on debug output
/// for this crate.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            concat!(env!("CARGO_CRATE_NAME"), "=debug")
        } else {
            "warn"
        })
    });

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run one invocation with the given command-line arguments.
///
/// Help, version and argument errors are handled by clap, which exits the
/// process before the configuration file is read. Every other failure is
/// returned.
pub async fn execute_command<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let loader = CommandLoader::new(PLUGINS);
    let mut root = root_command(&loader);
    let matches = root.clone().get_matches_from(args);

    init_logging(matches.get_flag(PARAMETER_VERBOSE));

    let (name, sub_matches) = match matches.subcommand() {
        Some(subcommand) => subcommand,
        None => return Err(CliError::UnsupportedSubcommand(String::from("unknown"))),
    };

    let resource = loader
        .resolve_command(name)
        .map_err(|source| CliError::CommandNotFound {
            source,
            usage: root.render_usage().to_string(),
        })?;

    let forwarded: Vec<OsString> = sub_matches
        .get_many::<OsString>(PARAMETER_ARGS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    debug!("Dispatching to {} with {:?}", name, forwarded);

    let resource_matches = resource
        .command()
        .get_matches_from(std::iter::once(OsString::from(name)).chain(forwarded));

    let configuration = Configuration::load_or_default()?;
    let context = ExecutionContext::from_args(configuration, &matches)?;
    let mut controller = context.controller(&resource);

    resource.execute(&mut controller, &resource_matches).await
}
