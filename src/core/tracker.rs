use chrono::NaiveDate;

use crate::config::Config;
use crate::core::services::{
    BudgetReading, BudgetService, EntryService, ReceiptService, ServiceError, ServiceResult,
    SummaryService,
};
use crate::domain::{BudgetSetting, LedgerRow};
use crate::errors::AnalyzerError;
use crate::ledger::{LoadReport, MonthlyAggregate};
use crate::receipt::{ReceiptAnalyzer, ReceiptSuggestion};
use crate::storage::SheetBackend;

/// One user session against a sheet and, optionally, a receipt analyzer.
///
/// The budget is read once when the session opens and updated in place when
/// the user changes it. Ledger rows are re-read on every dashboard request.
pub struct Tracker {
    sheet: Box<dyn SheetBackend>,
    analyzer: Option<Box<dyn ReceiptAnalyzer>>,
    default_budget: BudgetSetting,
    budget: BudgetReading,
}

impl Tracker {
    pub fn new(sheet: Box<dyn SheetBackend>, config: &Config) -> Self {
        let default_budget = BudgetSetting::new(config.default_budget);
        let budget = BudgetService::read_budget(sheet.as_ref(), default_budget);
        Self {
            sheet,
            analyzer: None,
            default_budget,
            budget,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn ReceiptAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn budget(&self) -> &BudgetReading {
        &self.budget
    }

    pub fn reload_budget(&mut self) -> &BudgetReading {
        self.budget = BudgetService::read_budget(self.sheet.as_ref(), self.default_budget);
        &self.budget
    }

    pub fn set_budget(&mut self, setting: BudgetSetting) -> ServiceResult<()> {
        BudgetService::write_budget(self.sheet.as_ref(), setting)?;
        self.reload_budget();
        Ok(())
    }

    pub fn submit(&self, row: &LedgerRow) -> ServiceResult<()> {
        EntryService::submit(self.sheet.as_ref(), row)
    }

    pub fn ledger(&self) -> ServiceResult<LoadReport> {
        SummaryService::load_ledger(self.sheet.as_ref())
    }

    pub fn dashboard(&self, reference: NaiveDate) -> ServiceResult<MonthlyAggregate> {
        SummaryService::monthly(self.sheet.as_ref(), self.budget.setting, reference)
    }

    pub fn has_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }

    pub fn scan(&self, image: &[u8]) -> ServiceResult<ReceiptSuggestion> {
        let analyzer = self.analyzer.as_deref().ok_or_else(|| {
            ServiceError::from(AnalyzerError("no receipt analyzer configured".into()))
        })?;
        ReceiptService::scan(analyzer, image)
    }

    pub fn suggest(&self, response: &str) -> ServiceResult<ReceiptSuggestion> {
        ReceiptService::suggest(response)
    }
}
