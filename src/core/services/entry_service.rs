//! Submission path for new expenses.

use crate::core::services::ServiceResult;
use crate::domain::LedgerRow;
use crate::errors::StoreError;
use crate::ledger::RowSchema;
use crate::storage::RowSink;

/// Validates entries and appends them to the sheet in its own column order.
pub struct EntryService;

impl EntryService {
    /// Appends `row` when it passes submission checks. A rejected row never
    /// reaches the sink.
    pub fn submit<S: RowSink + ?Sized>(sink: &S, row: &LedgerRow) -> ServiceResult<()> {
        if let Err(failure) = row.validate_for_submission() {
            tracing::info!(%failure, "expense rejected before save");
            return Err(failure.into());
        }
        let header = sink.header()?;
        let cells = RowSchema::encode_for(&header, row)
            .map_err(|column| StoreError::MissingColumn(column.header().to_string()))?;
        sink.append_row(&cells).inspect_err(|err| {
            tracing::warn!(error = %err, "append to expense sheet failed");
        })?;
        tracing::info!(
            item = row.item(),
            amount = row.amount(),
            category = row.category().as_str(),
            layout = ?RowSchema::detect(&header).map(|schema| schema.version),
            "expense saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::domain::Category;
    use crate::errors::LedgerError;
    use crate::storage::MemorySheet;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn empty_item_blocks_the_append() {
        let sheet = MemorySheet::new();
        let row = LedgerRow::new(date(), "", 500, Category::Food, "");
        let err = EntryService::submit(&sheet, &row).expect_err("blank item");
        match err {
            ServiceError::Ledger(LedgerError::Validation(failure)) => {
                assert!(failure.cites_empty_item())
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sheet.raw_rows().is_empty());
    }

    #[test]
    fn valid_entry_is_written_in_canonical_order() {
        let sheet = MemorySheet::new();
        let row = LedgerRow::new(date(), "Suica top-up", 3_000, Category::Transport, "");
        EntryService::submit(&sheet, &row).unwrap();
        assert_eq!(
            sheet.raw_rows(),
            vec![vec![
                "2024-05-15".to_string(),
                "Suica top-up".to_string(),
                "3000".to_string(),
                "Transport 🚆".to_string(),
                String::new(),
            ]]
        );
    }

    fn legacy_header() -> Vec<String> {
        ["Date", "Item", "Category", "Amount"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn legacy_sheet_gets_its_own_column_order() {
        let sheet = MemorySheet::with_header(legacy_header());
        let row = LedgerRow::new(date(), "Lawson", 980, Category::Food, "onigiri");
        EntryService::submit(&sheet, &row).unwrap();
        assert_eq!(
            sheet.raw_rows(),
            vec![vec![
                "2024-05-15".to_string(),
                "Lawson".to_string(),
                "Food 🍱".to_string(),
                "980".to_string(),
            ]]
        );
    }

    #[test]
    fn sheet_without_amount_column_is_refused() {
        let header = vec!["Date".to_string(), "Item".to_string(), "Category".to_string()];
        let sheet = MemorySheet::with_header(header);
        let row = LedgerRow::new(date(), "Lawson", 980, Category::Food, "");
        let err = EntryService::submit(&sheet, &row).expect_err("no amount column");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::StoreUnavailable(StoreError::MissingColumn(ref name)))
                if name == "Amount"
        ));
        assert!(sheet.raw_rows().is_empty());
    }

    #[test]
    fn offline_sink_surfaces_store_unavailable() {
        let sheet = MemorySheet::new();
        sheet.set_offline(true);
        let row = LedgerRow::new(date(), "Bento", 680, Category::Food, "");
        let err = EntryService::submit(&sheet, &row).expect_err("offline");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::StoreUnavailable(_))
        ));
        assert!(!err.is_recoverable());
    }
}
