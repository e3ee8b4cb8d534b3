//! Text rendering of dashboard figures.

use crate::currency::{format_percent, format_yen, format_yen_unsigned};
use crate::ledger::MonthlyAggregate;

const BAR_WIDTH: usize = 20;

/// `[########------------]` for a fraction in `[0, 1]`.
pub(crate) fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Headline lines: spend, remaining and the progress bar.
pub(crate) fn headline(view: &MonthlyAggregate) -> Vec<String> {
    vec![
        format!("  Budget    : {}", format_yen_unsigned(view.budget.value())),
        format!(
            "  Spent     : {}",
            format_yen_unsigned(view.current_month_total)
        ),
        format!(
            "  Remaining : {} ({} left)",
            format_yen(view.remaining),
            format_percent(view.percent_remaining)
        ),
        format!(
            "  Progress  : {} {}",
            progress_bar(view.progress_fraction),
            format_percent(view.progress_fraction)
        ),
    ]
}

pub(crate) fn breakdown(view: &MonthlyAggregate) -> Vec<String> {
    view.ranked_categories()
        .into_iter()
        .map(|(category, total)| {
            format!(
                "  {:<28} {:>12}",
                category.label(),
                format_yen_unsigned(total)
            )
        })
        .collect()
}

/// Oldest month first.
pub(crate) fn series(view: &MonthlyAggregate) -> Vec<String> {
    view.monthly_series
        .iter()
        .map(|entry| {
            let marker = if entry.month == view.month { " *" } else { "" };
            format!(
                "  {}  {:>12}{}",
                entry.label,
                format_yen_unsigned(entry.total),
                marker
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetSetting, Category, LedgerRow};
    use crate::ledger::aggregate;
    use chrono::NaiveDate;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(0.5), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(3.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn headline_reports_percent_left() {
        let rows = vec![LedgerRow::new(may(3), "Lawson", 600, Category::Food, "")];
        let view = aggregate(&rows, BudgetSetting::new(300_000), may(15));
        let lines = headline(&view);
        assert!(lines[1].contains("¥600"));
        assert!(lines[2].contains("¥299,400"));
        assert!(lines[2].contains("99.8% left"));
    }

    #[test]
    fn series_marks_current_month() {
        let rows = vec![
            LedgerRow::new(may(3), "Lawson", 450, Category::Food, ""),
            LedgerRow::new(
                NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
                "Suica",
                3_000,
                Category::Transport,
                "",
            ),
        ];
        let view = aggregate(&rows, BudgetSetting::new(300_000), may(15));
        let lines = series(&view);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  2024-04"));
        assert!(lines[1].ends_with(" *"));
    }
}
