use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use crate::{domain::RawRecord, errors::StoreError, ledger::RowSchema};

use super::{BudgetStore, Result, RowSink, RowSource};

/// In-process sheet, handy for tests and demos.
///
/// `set_offline(true)` makes every call fail with [`StoreError::Unavailable`]
/// so callers can exercise the unavailable-store path.
#[derive(Debug)]
pub struct MemorySheet {
    header: Vec<String>,
    rows: Mutex<Vec<Vec<String>>>,
    budget_cell: Mutex<Option<String>>,
    offline: AtomicBool,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::with_header(RowSchema::CANONICAL.header())
    }

    pub fn with_header(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Mutex::new(Vec::new()),
            budget_cell: Mutex::new(None),
            offline: AtomicBool::new(false),
        }
    }

    pub fn with_rows(self, rows: Vec<Vec<String>>) -> Self {
        *lock(&self.rows) = rows;
        self
    }

    pub fn with_budget_cell(self, value: impl Into<String>) -> Self {
        *lock(&self.budget_cell) = Some(value.into());
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Positional rows as written, oldest first.
    pub fn raw_rows(&self) -> Vec<Vec<String>> {
        lock(&self.rows).clone()
    }

    pub fn budget_cell(&self) -> Option<String> {
        lock(&self.budget_cell).clone()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory sheet is offline".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemorySheet {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSource for MemorySheet {
    fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        self.ensure_online()?;
        Ok(lock(&self.rows)
            .iter()
            .map(|values| RawRecord::from_header(&self.header, values))
            .collect())
    }
}

impl RowSink for MemorySheet {
    fn header(&self) -> Result<Vec<String>> {
        self.ensure_online()?;
        Ok(self.header.clone())
    }

    fn append_row(&self, cells: &[String]) -> Result<()> {
        self.ensure_online()?;
        lock(&self.rows).push(cells.to_vec());
        Ok(())
    }
}

impl BudgetStore for MemorySheet {
    fn read_budget_cell(&self) -> Result<Option<String>> {
        self.ensure_online()?;
        Ok(lock(&self.budget_cell).clone())
    }

    fn write_budget_cell(&self, value: &str) -> Result<()> {
        self.ensure_online()?;
        *lock(&self.budget_cell) = Some(value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
