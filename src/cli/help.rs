use crate::cli::commands::{CommandDefinition, CommandRegistry};
use crate::cli::output;
use crate::cli::output::section as output_section;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for definition in registry.iter() {
        output::info(format!(
            "  {:<12} {}",
            definition.name, definition.description
        ));
    }
    output::info("Use `help <command>` for details.");
}

pub fn print_command(definition: &CommandDefinition) {
    output_section(format!("Help: {}", definition.name));
    output::info(format!("  Description: {}", definition.description));
    output::info(format!("  Usage: {}", definition.usage));
    if !definition.aliases.is_empty() {
        output::info(format!("  Aliases: {}", definition.aliases.join(", ")));
    }
}
