//! Budget-vs-spend aggregation over a ledger snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetSetting, Category, LedgerRow, RawRecord, YearMonth};
use crate::ledger::Ledger;

/// Spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub label: String,
    pub total: u64,
}

/// Derived dashboard figures for the month containing the reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub month: YearMonth,
    pub budget: BudgetSetting,
    pub current_month_total: u64,
    /// Budget minus spend; negative when overspent.
    pub remaining: i64,
    /// `remaining / budget`, or 0 for a zero budget.
    pub percent_remaining: f64,
    /// `spend / budget` clamped to `[0, 1]`, or 0 for a zero budget.
    pub progress_fraction: f64,
    pub category_breakdown: BTreeMap<Category, u64>,
    pub monthly_series: Vec<MonthlyTotal>,
}

impl MonthlyAggregate {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0
    }

    pub fn spent_categories(&self) -> usize {
        self.category_breakdown.len()
    }

    /// Categories ordered by spend, largest first.
    pub fn ranked_categories(&self) -> Vec<(Category, u64)> {
        let mut ranked: Vec<(Category, u64)> = self
            .category_breakdown
            .iter()
            .map(|(category, total)| (*category, *total))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Aggregates validated rows against a budget for the reference month.
pub fn aggregate(
    rows: &[LedgerRow],
    budget: BudgetSetting,
    reference: NaiveDate,
) -> MonthlyAggregate {
    let month = YearMonth::of(reference);
    let mut by_month: BTreeMap<YearMonth, u64> = BTreeMap::new();
    let mut category_breakdown: BTreeMap<Category, u64> = BTreeMap::new();

    for row in rows {
        let key = row.year_month();
        let slot = by_month.entry(key).or_default();
        *slot = slot.saturating_add(row.amount());
        if key == month {
            let slot = category_breakdown.entry(row.category()).or_default();
            *slot = slot.saturating_add(row.amount());
        }
    }

    let current_month_total = by_month.get(&month).copied().unwrap_or(0);
    let remaining = signed(budget.value()).saturating_sub(signed(current_month_total));
    let (percent_remaining, progress_fraction) = if budget.value() > 0 {
        let ceiling = budget.value() as f64;
        (
            remaining as f64 / ceiling,
            (current_month_total as f64 / ceiling).clamp(0.0, 1.0),
        )
    } else {
        (0.0, 0.0)
    };

    let monthly_series = by_month
        .into_iter()
        .map(|(month, total)| MonthlyTotal {
            month,
            label: month.label(),
            total,
        })
        .collect();

    MonthlyAggregate {
        month,
        budget,
        current_month_total,
        remaining,
        percent_remaining,
        progress_fraction,
        category_breakdown,
        monthly_series,
    }
}

/// Applies the lenient read policy to raw records, then aggregates.
pub fn aggregate_records(
    records: &[RawRecord],
    budget: BudgetSetting,
    reference: NaiveDate,
) -> MonthlyAggregate {
    let report = Ledger::from_records(records);
    aggregate(report.ledger.rows(), budget, reference)
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
