use chrono::NaiveDate;

use crate::core::services::ServiceResult;
use crate::domain::BudgetSetting;
use crate::ledger::{aggregate, LoadReport, Ledger, MonthlyAggregate};
use crate::storage::RowSource;

/// Builds dashboard figures from a fresh read of the sheet.
pub struct SummaryService;

impl SummaryService {
    /// Reads every record and applies the lenient read policy. Store failures
    /// propagate; they are never reported as an empty ledger.
    pub fn load_ledger<S: RowSource + ?Sized>(source: &S) -> ServiceResult<LoadReport> {
        let records = source.fetch_records().inspect_err(|err| {
            tracing::warn!(error = %err, "could not read expense sheet");
        })?;
        let report = Ledger::from_records(&records);
        if !report.skipped.is_empty() {
            tracing::debug!(
                skipped = report.skipped.len(),
                kept = report.ledger.len(),
                "ignored unreadable rows"
            );
        }
        Ok(report)
    }

    pub fn monthly<S: RowSource + ?Sized>(
        source: &S,
        budget: BudgetSetting,
        reference: NaiveDate,
    ) -> ServiceResult<MonthlyAggregate> {
        let report = Self::load_ledger(source)?;
        Ok(aggregate(report.ledger.rows(), budget, reference))
    }
}
