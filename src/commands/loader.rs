//! Registry of resource commands.
//!
//! Every resource plugin registers a name, a one-line description and a
//! constructor. The constructor only runs when its command is actually
//! invoked, so listing commands for help never builds them.

use crate::commands::resource::ResourceCommand;
use thiserror::Error;
use tracing::trace;

/// Constructor of a resource command.
pub type CommandFactory = fn() -> ResourceCommand;

#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub about: &'static str,
    pub factory: CommandFactory,
}

impl CommandEntry {
    pub const fn new(name: &'static str, about: &'static str, factory: CommandFactory) -> Self {
        Self {
            name,
            about,
            factory,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("No such command '{0}'.")]
    NotFound(String),
}

pub struct CommandLoader<'a> {
    entries: &'a [CommandEntry],
}

impl<'a> CommandLoader<'a> {
    pub fn new(entries: &'a [CommandEntry]) -> Self {
        Self { entries }
    }

    /// Names of all registered commands, sorted.
    pub fn list_commands(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.entries.iter().map(|entry| entry.name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Description of a command without building it.
    pub fn about(&self, name: &str) -> Option<&'a str> {
        self.find(name).map(|entry| entry.about)
    }

    /// Build the command registered under `name`.
    pub fn resolve_command(&self, name: &str) -> Result<ResourceCommand, LoaderError> {
        trace!("Resolving command {:?}...", name);
        self.find(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| LoaderError::NotFound(name.to_string()))
    }

    fn find(&self, name: &str) -> Option<&'a CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &'static str) -> ResourceCommand {
        ResourceCommand::new(name, "", &[])
    }

    const ENTRIES: &[CommandEntry] = &[
        CommandEntry::new("b", "the b command", || named("b")),
        CommandEntry::new("a", "the a command", || named("a")),
        CommandEntry::new("c", "the c command", || named("c")),
    ];

    #[test]
    fn test_list_commands_is_alphabetic() {
        let loader = CommandLoader::new(ENTRIES);
        assert_eq!(loader.list_commands(), vec!["a", "b", "c"]);
        // Listing twice gives the same answer.
        assert_eq!(loader.list_commands(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_resolve_known_command() {
        let loader = CommandLoader::new(ENTRIES);
        let command = loader.resolve_command("c").unwrap();
        assert_eq!(command.name(), "c");
        assert_eq!(loader.about("a"), Some("the a command"));
    }

    #[test]
    fn test_resolve_unknown_command_is_not_found() {
        let loader = CommandLoader::new(ENTRIES);
        match loader.resolve_command("d") {
            Err(LoaderError::NotFound(name)) => assert_eq!(name, "d"),
            Ok(_) => panic!("expected NotFound"),
        }
        assert_eq!(loader.about("d"), None);
    }

    #[test]
    fn test_empty_registry() {
        let loader = CommandLoader::new(&[]);
        assert!(loader.list_commands().is_empty());
    }
}
