//! Generic resource command.
//!
//! A resource plugin is a table of [`FieldSpec`]s. This module turns that
//! table into a clap command with `add`, `list`, `update` and `remove`
//! subcommands, collects the supplied flags into a [`ParamSet`] and hands it
//! to the [`ResourceController`].

use crate::api::ApiClient;
use crate::commands::params::{
    id_parameter, parse_attribute, COMMAND_ADD, COMMAND_LIST, COMMAND_REMOVE, COMMAND_UPDATE,
    PARAMETER_ID,
};
use crate::console::Console;
use crate::controller::{ControllerError, ResourceController};
use crate::error::CliError;
use crate::format::FieldMap;
use crate::model::{singular, Action, ObjectId, ParamSet, ID_FIELD};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Whole number, usually the ID of a related object
    Integer,
    /// Boolean switch, only ever set to true
    Flag,
    /// Repeatable `KEY=VALUE` pairs sent as a map
    Attributes,
}

/// One settable field of a resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub long: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
    pub kind: FieldKind,
    /// Must be given when adding an object
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self {
            name,
            long: name,
            short: None,
            help,
            kind,
            required: false,
        }
    }

    pub const fn text(name: &'static str, help: &'static str) -> Self {
        Self::new(name, FieldKind::Text, help)
    }

    pub const fn integer(name: &'static str, help: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, help)
    }

    pub const fn flag(name: &'static str, help: &'static str) -> Self {
        Self::new(name, FieldKind::Flag, help)
    }

    pub const fn attributes() -> Self {
        Self::new(
            "attributes",
            FieldKind::Attributes,
            "A key/value pair attached to the object (repeatable).",
        )
        .short('a')
    }

    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub const fn long(mut self, long: &'static str) -> Self {
        self.long = long;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn arg(&self, action: Action) -> Arg {
        let mut arg = Arg::new(self.name).long(self.long).help(self.help);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        let arg = match self.kind {
            FieldKind::Text => arg.num_args(1).value_parser(clap::value_parser!(String)),
            FieldKind::Integer => arg.num_args(1).value_parser(clap::value_parser!(i64)),
            FieldKind::Flag => arg.action(ArgAction::SetTrue),
            FieldKind::Attributes => arg
                .action(ArgAction::Append)
                .value_name("KEY=VALUE")
                .value_parser(parse_attribute),
        };

        arg.required(action == Action::Create && self.required)
    }

    /// Value given on the command line, `None` when the flag was not used.
    fn value(&self, matches: &ArgMatches) -> Option<Value> {
        match self.kind {
            FieldKind::Text => matches
                .get_one::<String>(self.name)
                .map(|s| Value::from(s.as_str())),
            FieldKind::Integer => matches.get_one::<i64>(self.name).map(|n| Value::from(*n)),
            FieldKind::Flag => (matches.value_source(self.name) == Some(ValueSource::CommandLine))
                .then_some(Value::Bool(true)),
            FieldKind::Attributes => matches
                .get_many::<(String, String)>(self.name)
                .map(|pairs| {
                    let map: Map<String, Value> = pairs
                        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                        .collect();
                    Value::Object(map)
                }),
        }
    }
}

/// Command for one resource collection.
#[derive(Debug, Clone)]
pub struct ResourceCommand {
    name: &'static str,
    about: &'static str,
    fields: &'static [FieldSpec],
    display_fields: Option<&'static [&'static str]>,
    headers: &'static [(&'static str, &'static str)],
}

impl ResourceCommand {
    pub const fn new(name: &'static str, about: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            about,
            fields,
            display_fields: None,
            headers: &[],
        }
    }

    /// Columns shown by `list`, in order.
    pub const fn display_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.display_fields = Some(fields);
        self
    }

    /// Headers added to the default field map.
    pub const fn headers(mut self, headers: &'static [(&'static str, &'static str)]) -> Self {
        self.headers = headers;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields_map(&self) -> FieldMap {
        FieldMap::extended(self.headers)
    }

    fn list_fields(&self) -> Option<Vec<String>> {
        self.display_fields
            .map(|fields| fields.iter().map(|f| f.to_string()).collect())
    }

    fn args(&self, action: Action) -> Vec<Arg> {
        self.fields.iter().map(|field| field.arg(action)).collect()
    }

    /// Build the clap command for this resource.
    pub fn command(&self) -> Command {
        let object = singular(self.name);

        Command::new(self.name)
            .bin_name(format!("{} {}", env!("CARGO_PKG_NAME"), self.name))
            .about(self.about)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(
                Command::new(COMMAND_ADD)
                    .about(format!("Add a new {}.", object))
                    .args(self.args(Action::Create)),
            )
            .subcommand(
                Command::new(COMMAND_LIST)
                    .about(format!("List existing {}.", self.name))
                    .visible_alias("ls")
                    .arg(id_parameter(false))
                    .args(self.args(Action::List)),
            )
            .subcommand(
                Command::new(COMMAND_UPDATE)
                    .about(format!("Update a {}.", object))
                    .arg(id_parameter(true))
                    .args(self.args(Action::Update)),
            )
            .subcommand(
                Command::new(COMMAND_REMOVE)
                    .about(format!("Remove a {}.", object))
                    .arg(id_parameter(true)),
            )
    }

    /// Collect the flags given to an action subcommand.
    ///
    /// Flags that were not used are left out of the result.
    pub fn params(&self, action: Action, matches: &ArgMatches) -> ParamSet {
        let mut params = ParamSet::new();

        if action != Action::Create {
            if let Some(id) = matches.get_one::<i64>(PARAMETER_ID) {
                params.insert(ID_FIELD, *id);
            }
        }

        if action != Action::Delete {
            for field in self.fields {
                if let Some(value) = field.value(matches) {
                    params.insert(field.name, value);
                }
            }
        }

        params
    }

    /// Run the action subcommand found in `matches`.
    pub async fn execute<A: ApiClient, C: Console>(
        &self,
        controller: &mut ResourceController<A, C>,
        matches: &ArgMatches,
    ) -> Result<(), CliError> {
        match matches.subcommand() {
            Some((COMMAND_ADD, sub_matches)) => {
                let params = self.params(Action::Create, sub_matches);
                controller.create(&params).await?;
            }
            Some((COMMAND_LIST, sub_matches)) => {
                let params = self.params(Action::List, sub_matches);
                let fields = self.list_fields();
                controller.list(&params, fields.as_deref()).await?;
            }
            Some((COMMAND_UPDATE, sub_matches)) => {
                let params = self.params(Action::Update, sub_matches);
                controller.update(&params).await?;
            }
            Some((COMMAND_REMOVE, sub_matches)) => {
                let params = self.params(Action::Delete, sub_matches);
                let id = params
                    .get(ID_FIELD)
                    .ok_or(ControllerError::MissingIdentifier(ID_FIELD, Action::Delete))
                    .and_then(|value| Ok(ObjectId::try_from(value)?))?;
                controller.remove(&id, &params).await?;
            }
            Some((other, _)) => return Err(CliError::UnsupportedSubcommand(other.to_string())),
            None => return Err(CliError::UnsupportedSubcommand(self.name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("hostname", "The hostname of the device.")
            .short('H')
            .required(),
        FieldSpec::integer("site_id", "Site the device belongs to.").long("site-id"),
        FieldSpec::flag("active", "Mark the device active."),
        FieldSpec::attributes(),
    ];

    fn devices() -> ResourceCommand {
        ResourceCommand::new("devices", "Device objects.", FIELDS)
            .display_fields(&["id", "hostname"])
            .headers(&[("hostname", "Hostname")])
    }

    fn parse(args: &[&str]) -> ArgMatches {
        devices()
            .command()
            .try_get_matches_from(std::iter::once("devices").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_has_all_actions() {
        let command = devices().command();
        let names: Vec<_> = command.get_subcommands().map(|c| c.get_name().to_string()).collect();
        assert_eq!(names, vec!["add", "list", "update", "remove"]);
        for name in &names {
            assert!(Action::from_str(name).is_ok());
        }
    }

    #[test]
    fn test_add_collects_only_supplied_flags() {
        let matches = parse(&["add", "-H", "dev1", "-a", "owner=neteng", "-a", "vendor=juniper"]);
        let (_, sub) = matches.subcommand().unwrap();

        let params = devices().params(Action::Create, sub);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"hostname": "dev1", "attributes": {"owner": "neteng", "vendor": "juniper"}})
        );
    }

    #[test]
    fn test_add_requires_required_fields() {
        let result = devices()
            .command()
            .try_get_matches_from(["devices", "add", "--site-id", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_reads_id_and_flags() {
        let matches = parse(&["update", "-I", "7", "--active"]);
        let (_, sub) = matches.subcommand().unwrap();

        let params = devices().params(Action::Update, sub);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"id": 7, "active": true})
        );
    }

    #[test]
    fn test_update_requires_id() {
        let result = devices()
            .command()
            .try_get_matches_from(["devices", "update", "-H", "dev2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_filters_are_optional() {
        let matches = parse(&["ls"]);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, COMMAND_LIST);
        assert!(devices().params(Action::List, sub).is_empty());
    }

    #[test]
    fn test_remove_takes_only_id() {
        let matches = parse(&["remove", "--id", "3"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(
            serde_json::to_value(devices().params(Action::Delete, sub)).unwrap(),
            json!({"id": 3})
        );
    }

    #[test]
    fn test_fields_map_extends_defaults() {
        let map = devices().fields_map();
        assert_eq!(map.header("hostname"), Some("Hostname"));
        assert_eq!(map.header("id"), Some("ID"));
    }
}
