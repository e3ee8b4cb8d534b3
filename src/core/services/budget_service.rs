//! Reads and writes the monthly budget cell.

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::BudgetSetting;
use crate::errors::ConfigMissing;
use crate::storage::BudgetStore;

/// Where a session's budget value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetSource {
    Stored,
    /// The cell was empty or unreadable text; the default was used.
    DefaultConfigMissing(ConfigMissing),
    /// The store could not be reached; the default was used.
    DefaultStoreUnavailable(String),
}

/// Budget value for the session together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetReading {
    pub setting: BudgetSetting,
    pub source: BudgetSource,
}

impl BudgetReading {
    pub fn used_default(&self) -> bool {
        !matches!(self.source, BudgetSource::Stored)
    }
}

/// Stateless helpers over a [`BudgetStore`].
pub struct BudgetService;

impl BudgetService {
    /// Reads the budget, never failing: any problem falls back to `default`
    /// and is recorded in the returned [`BudgetSource`].
    pub fn read_budget<S: BudgetStore + ?Sized>(
        store: &S,
        default: BudgetSetting,
    ) -> BudgetReading {
        let cell = match store.read_budget_cell() {
            Ok(cell) => cell,
            Err(err) => {
                tracing::warn!(error = %err, "budget cell unreachable, using default");
                return BudgetReading {
                    setting: default,
                    source: BudgetSource::DefaultStoreUnavailable(err.to_string()),
                };
            }
        };
        match BudgetSetting::from_cell(cell.as_deref()) {
            Ok(setting) => BudgetReading {
                setting,
                source: BudgetSource::Stored,
            },
            Err(missing) => {
                tracing::warn!(
                    reason = %missing,
                    default = default.value(),
                    "using default budget"
                );
                BudgetReading {
                    setting: default,
                    source: BudgetSource::DefaultConfigMissing(missing),
                }
            }
        }
    }

    /// Persists a new budget to the same cell it is read from.
    pub fn write_budget<S: BudgetStore + ?Sized>(
        store: &S,
        setting: BudgetSetting,
    ) -> ServiceResult<()> {
        store.write_budget_cell(&setting.to_cell())?;
        tracing::info!(budget = setting.value(), "monthly budget updated");
        Ok(())
    }

    /// Parses user input for a new budget (separators allowed).
    pub fn parse_input(raw: &str) -> ServiceResult<BudgetSetting> {
        BudgetSetting::from_cell(Some(raw)).map_err(|_| {
            ServiceError::Invalid(format!("`{}` is not a whole yen amount", raw.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_MONTHLY_BUDGET;
    use crate::storage::MemorySheet;

    #[test]
    fn stored_value_is_used() {
        let sheet = MemorySheet::new().with_budget_cell("450,000");
        let reading = BudgetService::read_budget(&sheet, BudgetSetting::default());
        assert_eq!(reading.setting.value(), 450_000);
        assert!(!reading.used_default());
    }

    #[test]
    fn empty_cell_falls_back_and_says_so() {
        let sheet = MemorySheet::new();
        let reading = BudgetService::read_budget(&sheet, BudgetSetting::default());
        assert_eq!(reading.setting.value(), DEFAULT_MONTHLY_BUDGET);
        assert_eq!(
            reading.source,
            BudgetSource::DefaultConfigMissing(ConfigMissing::Empty)
        );
    }

    #[test]
    fn offline_store_falls_back_distinctly() {
        let sheet = MemorySheet::new().with_budget_cell("100000");
        sheet.set_offline(true);
        let reading = BudgetService::read_budget(&sheet, BudgetSetting::default());
        assert_eq!(reading.setting.value(), DEFAULT_MONTHLY_BUDGET);
        assert!(matches!(
            reading.source,
            BudgetSource::DefaultStoreUnavailable(_)
        ));
    }

    #[test]
    fn written_budget_reads_back() {
        let sheet = MemorySheet::new();
        BudgetService::write_budget(&sheet, BudgetSetting::new(280_000)).unwrap();
        assert_eq!(sheet.budget_cell().as_deref(), Some("280000"));
        let reading = BudgetService::read_budget(&sheet, BudgetSetting::default());
        assert_eq!(reading.setting.value(), 280_000);
    }

    #[test]
    fn parse_input_rejects_words() {
        assert_eq!(
            BudgetService::parse_input("320,000").unwrap(),
            BudgetSetting::new(320_000)
        );
        assert!(matches!(
            BudgetService::parse_input("plenty"),
            Err(ServiceError::Invalid(_))
        ));
    }
}
