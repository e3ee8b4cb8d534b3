use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::utils::write_atomic, domain::RawRecord, errors::StoreError, ledger::RowSchema,
};

use super::{BudgetStore, Result, RowSink, RowSource};

pub const SHEET_SCHEMA_VERSION: u32 = 2;
pub const DEFAULT_SETTINGS_SHEET: &str = "Settings";
pub const DEFAULT_BUDGET_CELL: &str = "B1";

/// On-disk shape of a local expense sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDocument {
    pub schema_version: u32,
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Settings cells keyed by sheet-qualified address, e.g. `Settings!B1`.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl Default for SheetDocument {
    fn default() -> Self {
        Self {
            schema_version: SHEET_SCHEMA_VERSION,
            header: RowSchema::CANONICAL.header(),
            rows: Vec::new(),
            settings: BTreeMap::new(),
        }
    }
}

/// A spreadsheet stand-in persisted as a single JSON file.
///
/// Every write rewrites the file through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct JsonSheet {
    path: PathBuf,
    budget_cell: String,
}

impl JsonSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_budget_cell(path, DEFAULT_BUDGET_CELL)
    }

    /// Budget cell on the default `Settings` sheet.
    pub fn with_budget_cell(path: impl Into<PathBuf>, cell: &str) -> Self {
        Self::with_settings_cell(path, DEFAULT_SETTINGS_SHEET, cell)
    }

    pub fn with_settings_cell(path: impl Into<PathBuf>, sheet: &str, cell: &str) -> Self {
        Self {
            path: path.into(),
            budget_cell: format!("{}!{}", sheet.trim(), cell.trim().to_ascii_uppercase()),
        }
    }

    /// Sheet-qualified address of the budget cell, e.g. `Settings!B1`.
    pub fn budget_cell(&self) -> &str {
        &self.budget_cell
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the sheet; a missing file is an empty sheet, a corrupt one is
    /// an error.
    pub fn load(&self) -> Result<SheetDocument> {
        if !self.path.exists() {
            return Ok(SheetDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let document: SheetDocument = serde_json::from_str(&data)?;
        if document.schema_version > SHEET_SCHEMA_VERSION {
            return Err(StoreError::Unavailable(format!(
                "sheet `{}` is from a newer schema version",
                self.path.display()
            )));
        }
        Ok(document)
    }

    pub fn save(&self, document: &SheetDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

impl RowSource for JsonSheet {
    fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let document = self.load()?;
        Ok(document
            .rows
            .iter()
            .map(|values| RawRecord::from_header(&document.header, values))
            .collect())
    }
}

impl RowSink for JsonSheet {
    fn header(&self) -> Result<Vec<String>> {
        Ok(self.load()?.header)
    }

    fn append_row(&self, cells: &[String]) -> Result<()> {
        let mut document = self.load()?;
        if document.header.len() != cells.len() {
            return Err(StoreError::Unavailable(format!(
                "sheet `{}` has {} columns but the row has {}",
                self.path.display(),
                document.header.len(),
                cells.len()
            )));
        }
        document.rows.push(cells.to_vec());
        self.save(&document)?;
        tracing::debug!(path = %self.path.display(), rows = document.rows.len(), "row appended");
        Ok(())
    }
}

impl BudgetStore for JsonSheet {
    fn read_budget_cell(&self) -> Result<Option<String>> {
        let document = self.load()?;
        Ok(document
            .settings
            .get(&self.budget_cell)
            .filter(|value| !value.trim().is_empty())
            .cloned())
    }

    fn write_budget_cell(&self, value: &str) -> Result<()> {
        let mut document = self.load()?;
        document
            .settings
            .insert(self.budget_cell.clone(), value.to_string());
        self.save(&document)
    }
}
