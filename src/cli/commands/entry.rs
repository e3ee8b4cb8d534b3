use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::{format_date, format_yen_unsigned};
use crate::domain::{Category, LedgerRow};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "add",
        "Record an expense",
        "add <date|today> <item> <amount> [category] [description]",
        cmd_add,
    )]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, item, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <date|today> <item> <amount> [category] [description]".into(),
        ));
    };
    let category = rest.first().copied();
    let description = rest.get(1..).map(|words| words.join(" "));

    let date = if date.eq_ignore_ascii_case("today") {
        format_date(context.today())
    } else {
        date.to_string()
    };
    let row = LedgerRow::normalize(&date, item, amount, category, description.as_deref())
        .map_err(|failure| CommandError::InvalidArguments(failure.to_string()))?;
    warn_on_fallback(category, row.category());

    context.tracker.submit(&row)?;
    output::success(saved_message(&row));
    Ok(())
}

pub(crate) fn warn_on_fallback(requested: Option<&str>, resolved: Category) {
    if let Some(raw) = requested {
        if Category::from_exact(raw.trim()).is_none() {
            output::warning(format!(
                "Unknown category `{}`; filed under {}.",
                raw.trim(),
                resolved
            ));
        }
    }
}

pub(crate) fn saved_message(row: &LedgerRow) -> String {
    format!(
        "Saved {} {} ({}) on {}.",
        row.item(),
        format_yen_unsigned(row.amount()),
        row.category(),
        format_date(row.date())
    )
}
