//! Narrow interfaces to the external sheet, plus the stores shipped with the
//! crate.

pub mod json_backend;
pub mod memory;

use crate::{domain::RawRecord, errors::StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Reads every data row of the expense sheet, keyed by header name.
pub trait RowSource: Send + Sync {
    fn fetch_records(&self) -> Result<Vec<RawRecord>>;
}

/// Appends one positional row to the expense sheet.
pub trait RowSink: Send + Sync {
    /// Current header row; appended cells must follow its order.
    fn header(&self) -> Result<Vec<String>>;
    fn append_row(&self, cells: &[String]) -> Result<()>;
}

/// Single addressable cell holding the monthly budget as text.
pub trait BudgetStore: Send + Sync {
    /// `None` when the cell is empty.
    fn read_budget_cell(&self) -> Result<Option<String>>;
    fn write_budget_cell(&self, value: &str) -> Result<()>;
}

/// Everything a tracker session needs from one spreadsheet.
pub trait SheetBackend: RowSource + RowSink + BudgetStore {}

impl<T> SheetBackend for T where T: RowSource + RowSink + BudgetStore {}

pub use json_backend::{JsonSheet, SheetDocument, SHEET_SCHEMA_VERSION};
pub use memory::MemorySheet;
