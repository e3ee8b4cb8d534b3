use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::dashboard;
use crate::cli::output;
use crate::cli::output::section as output_section;
use crate::currency::{format_date, format_yen_unsigned};
use crate::domain::Category;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show budget versus spend for a month",
            "summary [date|today]",
            cmd_summary,
        ),
        CommandDefinition::new(
            "recent",
            "List the latest expenses",
            "recent [count]",
            cmd_recent,
        )
        .with_aliases(&["ls"]),
        CommandDefinition::new(
            "categories",
            "List expense categories",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = match args.first() {
        Some(raw) => context.parse_date_arg(raw)?,
        None => context.today(),
    };
    let view = context.tracker.dashboard(reference)?;

    output_section(format!("Summary {}", view.month));
    if context.tracker.budget().used_default() {
        output::warning("Budget not set; showing the default.");
    }
    for line in dashboard::headline(&view) {
        output::info(line);
    }
    if view.is_overspent() {
        output::warning("Over budget this month.");
    }

    output_section("By category");
    if view.category_breakdown.is_empty() {
        output::info("  No expenses this month.");
    }
    for line in dashboard::breakdown(&view) {
        output::info(line);
    }

    if !view.monthly_series.is_empty() {
        output_section("By month");
        for line in dashboard::series(&view) {
            output::info(line);
        }
    }
    Ok(())
}

fn cmd_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a row count", raw))
        })?,
        None => context.config.recent_rows,
    };
    let report = context.tracker.ledger()?;

    output_section("Recent expenses");
    let rows = report.ledger.recent(limit);
    if rows.is_empty() {
        output::info("  No expenses recorded yet.");
    }
    for row in rows {
        output::info(format!(
            "  {}  {:<20} {:>10}  {}",
            format_date(row.date()),
            row.item(),
            format_yen_unsigned(row.amount()),
            row.category()
        ));
    }
    if !report.skipped.is_empty() {
        output::warning(format!(
            "{} unreadable row(s) ignored.",
            report.skipped.len()
        ));
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Categories");
    for category in Category::ALL {
        output::info(format!("  {}", category.label()));
    }
    Ok(())
}
