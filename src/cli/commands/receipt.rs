use std::fs;

use crate::cli::commands::entry::saved_message;
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::output::section as output_section;
use crate::currency::{format_date, format_yen_unsigned};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "scan",
            "Read a receipt into a pending suggestion",
            "scan <file>",
            cmd_scan,
        ),
        CommandDefinition::new(
            "accept",
            "Save the pending receipt suggestion",
            "accept [date|today] [description]",
            cmd_accept,
        ),
    ]
}

/// With an analyzer configured the file is sent as an image; otherwise it is
/// read as a saved analyzer reply.
fn cmd_scan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments("usage: scan <file>".into()));
    };
    let suggestion = if context.tracker.has_analyzer() {
        let image = fs::read(path)?;
        context.tracker.scan(&image)?
    } else {
        let reply = fs::read_to_string(path)?;
        context.tracker.suggest(&reply)?
    };

    output_section("Receipt suggestion");
    output::info(format!("  Item    : {}", suggestion.item));
    output::info(format!("  Amount  : {}", format_yen_unsigned(suggestion.amount)));
    output::info(format!("  Category: {}", suggestion.category));
    if !suggestion.has_amount() {
        output::warning("No total found on the receipt; record it with `add` instead.");
    }
    output::info("Use `accept [date] [description]` to save it.");
    context.pending = Some(suggestion);
    Ok(())
}

fn cmd_accept(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(suggestion) = context.pending.clone() else {
        return Err(CommandError::Message(
            "No pending receipt. Use `scan <file>` first.".into(),
        ));
    };
    let date = match args.first() {
        Some(raw) => context.parse_date_arg(raw)?,
        None => context.today(),
    };
    let description = args.get(1..).map(|words| words.join(" ")).unwrap_or_default();

    let prompt = format!(
        "Save {} {} on {}?",
        suggestion.item,
        format_yen_unsigned(suggestion.amount),
        format_date(date)
    );
    if !context.confirm(&prompt)? {
        context.pending = None;
        output::info("Suggestion discarded.");
        return Ok(());
    }

    let row = suggestion.into_entry(date, description);
    context.tracker.submit(&row)?;
    context.pending = None;
    output::success(saved_message(&row));
    Ok(())
}
