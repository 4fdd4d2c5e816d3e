//! CLI command definitions.
//!
//! The root command only knows global options and the names of the
//! registered resource commands. Each resource command lives in its own
//! module exposing `NAME`, `ABOUT` and a `command()` constructor, and is
//! listed in [`PLUGINS`]. Adding a resource means adding a module and one
//! line here.

use clap::{Command, ValueHint};
use std::ffi::OsString;

pub mod loader;
pub mod params;
pub mod resource;

pub mod attributes;
pub mod devices;
pub mod interfaces;
pub mod networks;
pub mod protocols;
pub mod sites;

use loader::{CommandEntry, CommandLoader};
use params::{email_parameter, forwarded_args_parameter, url_parameter, verbose_parameter};

/// Every resource command shipped with the client.
pub const PLUGINS: &[CommandEntry] = &[
    CommandEntry::new(attributes::NAME, attributes::ABOUT, attributes::command),
    CommandEntry::new(devices::NAME, devices::ABOUT, devices::command),
    CommandEntry::new(interfaces::NAME, interfaces::ABOUT, interfaces::command),
    CommandEntry::new(networks::NAME, networks::ABOUT, networks::command),
    CommandEntry::new(protocols::NAME, protocols::ABOUT, protocols::command),
    CommandEntry::new(sites::NAME, sites::ABOUT, sites::command),
];

/// Create the root command.
///
/// Resource commands appear as placeholders that capture their raw
/// arguments; the real command is built by the loader once the name is
/// known. Unknown names are let through so that they can be reported as
/// "no such command".
pub fn root_command(loader: &CommandLoader<'static>) -> Command {
    let mut command = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("NSoT command-line utility.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .allow_external_subcommands(true)
        .external_subcommand_value_parser(clap::value_parser!(OsString))
        .arg(verbose_parameter())
        .arg(url_parameter().value_hint(ValueHint::Url))
        .arg(email_parameter());

    for name in loader.list_commands() {
        command = command.subcommand(
            Command::new(name)
                .about(loader.about(name).unwrap_or_default())
                .disable_help_flag(true)
                .arg(forwarded_args_parameter()),
        );
    }

    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_command_is_valid() {
        let loader = CommandLoader::new(PLUGINS);
        root_command(&loader).debug_assert();
    }

    #[test]
    fn test_every_plugin_builds_a_valid_command() {
        let loader = CommandLoader::new(PLUGINS);
        for name in loader.list_commands() {
            let resource = loader.resolve_command(name).unwrap();
            assert_eq!(resource.name(), name);
            resource.command().debug_assert();
        }
    }

    #[test]
    fn test_plugins_are_registered_in_order() {
        let loader = CommandLoader::new(PLUGINS);
        assert_eq!(
            loader.list_commands(),
            vec!["attributes", "devices", "interfaces", "networks", "protocols", "sites"]
        );
    }

    #[test]
    fn test_resource_arguments_are_forwarded() {
        let loader = CommandLoader::new(PLUGINS);
        let matches = root_command(&loader)
            .try_get_matches_from(["nsot", "-v", "devices", "list", "-H", "dev1", "--help"])
            .unwrap();

        assert!(matches.get_flag(params::PARAMETER_VERBOSE));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "devices");
        let forwarded: Vec<_> = sub
            .get_many::<OsString>(params::PARAMETER_ARGS)
            .unwrap()
            .cloned()
            .collect();
        assert_eq!(forwarded, vec!["list", "-H", "dev1", "--help"]);
    }

    #[test]
    fn test_unknown_command_is_let_through() {
        let loader = CommandLoader::new(PLUGINS);
        let matches = root_command(&loader)
            .try_get_matches_from(["nsot", "routers", "list"])
            .unwrap();
        let (name, _) = matches.subcommand().unwrap();
        assert_eq!(name, "routers");
        assert!(loader.resolve_command(name).is_err());
    }
}
