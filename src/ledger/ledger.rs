use serde::{Deserialize, Serialize};

use crate::domain::{LedgerRow, RawRecord};
use crate::errors::ValidationFailure;

/// Append-only collection of validated expense rows, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

/// Outcome of reading historical records: the usable ledger plus the rows
/// that were dropped and why.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone)]
pub struct SkippedRecord {
    /// Zero-based position among the data rows.
    pub index: usize,
    pub failure: ValidationFailure,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from historical records, dropping rows whose date or
    /// amount cannot be read.
    pub fn from_records(records: &[RawRecord]) -> LoadReport {
        let mut ledger = Ledger::new();
        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match LedgerRow::from_record(record) {
                Ok(row) => ledger.rows.push(row),
                Err(failure) => {
                    tracing::debug!(index, %failure, "dropping unreadable ledger row");
                    skipped.push(SkippedRecord { index, failure });
                }
            }
        }
        LoadReport { ledger, skipped }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    /// Newest entries first, by sheet position.
    pub fn recent(&self, limit: usize) -> Vec<&LedgerRow> {
        self.rows.iter().rev().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
