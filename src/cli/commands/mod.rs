pub mod budget;
pub mod dashboard;
pub mod entry;
pub mod receipt;
pub mod system;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(entry::definitions());
    commands.extend(receipt::definitions());
    commands.extend(budget::definitions());
    commands.extend(dashboard::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

/// Commands in registration order, looked up by name or alias.
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        Self { definitions }
    }

    pub fn get(&self, word: &str) -> Option<&CommandDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.answers_to(word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    /// Primary names followed by aliases, for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions
            .iter()
            .flat_map(|definition| {
                std::iter::once(definition.name).chain(definition.aliases.iter().copied())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_once() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<&str> = registry.names().collect();
        for expected in [
            "add",
            "scan",
            "accept",
            "budget",
            "summary",
            "recent",
            "categories",
            "version",
            "help",
            "exit",
        ] {
            assert_eq!(
                names.iter().filter(|name| **name == expected).count(),
                1,
                "{expected}"
            );
        }
    }

    #[test]
    fn aliases_resolve_to_their_command() {
        let registry = CommandRegistry::new(all_definitions());
        assert_eq!(registry.get("quit").map(|d| d.name), Some("exit"));
        assert_eq!(registry.get("ls").map(|d| d.name), Some("recent"));
        assert!(registry.get("nope").is_none());
    }
}
