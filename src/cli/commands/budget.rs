use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{BudgetService, BudgetSource};
use crate::currency::format_yen_unsigned;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "budget",
        "Show or change the monthly budget",
        "budget [set <amount>]",
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_budget(context),
        ["set", amount] => set_budget(context, amount),
        _ => Err(CommandError::InvalidArguments(
            "usage: budget [set <amount>]".into(),
        )),
    }
}

fn show_budget(context: &mut ShellContext) -> CommandResult {
    let reading = context.tracker.reload_budget();
    let origin = match &reading.source {
        BudgetSource::Stored => "from the settings sheet".to_string(),
        BudgetSource::DefaultConfigMissing(reason) => format!("default, {}", reason),
        BudgetSource::DefaultStoreUnavailable(reason) => {
            format!("default, sheet unreachable: {}", reason)
        }
    };
    output::info(format!(
        "Monthly budget: {} ({})",
        format_yen_unsigned(reading.setting.value()),
        origin
    ));
    Ok(())
}

fn set_budget(context: &mut ShellContext, amount: &str) -> CommandResult {
    let setting = BudgetService::parse_input(amount)?;
    context.tracker.set_budget(setting)?;
    output::success(format!(
        "Monthly budget set to {}.",
        format_yen_unsigned(setting.value())
    ));
    Ok(())
}
