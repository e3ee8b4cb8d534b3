use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::output::section as output_section;
use crate::ledger::RowSchema;
use crate::storage::SHEET_SCHEMA_VERSION;
use crate::utils::build_info::BUILD;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit)
            .with_aliases(&["quit", "q"]),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(BUILD);
    output::info(format!("  Sheet file   : v{}", SHEET_SCHEMA_VERSION));
    output::info(format!(
        "  Row layout   : v{} ({})",
        RowSchema::CANONICAL.version,
        RowSchema::CANONICAL.header().join(", ")
    ));
    output::info(format!(
        "  Config       : {}",
        context.config_manager.path().display()
    ));
    for (label, value) in BUILD.rows() {
        output::info(format!("  {:<13}: {}", label, value));
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.command(&name.to_lowercase()) {
            Some(definition) => help::print_command(definition),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
