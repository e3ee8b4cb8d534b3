//! The canonical expense row and the rules that turn raw sheet text into it.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::common::YearMonth;
use crate::errors::{FieldIssue, ValidationFailure};
use crate::ledger::schema::Column;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// One recorded expense. Rows are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    date: NaiveDate,
    item: String,
    amount: u64,
    category: Category,
    #[serde(default)]
    description: String,
}

impl LedgerRow {
    pub fn new(
        date: NaiveDate,
        item: impl Into<String>,
        amount: u64,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            item: item.into().trim().to_string(),
            amount,
            category,
            description: description.into().trim().to_string(),
        }
    }

    /// Normalizes raw textual fields into a row.
    ///
    /// Date and amount failures are collected together; an empty item or an
    /// unknown category never fails here.
    pub fn normalize(
        raw_date: &str,
        raw_item: &str,
        raw_amount: &str,
        raw_category: Option<&str>,
        raw_description: Option<&str>,
    ) -> Result<Self, ValidationFailure> {
        let date = parse_date(raw_date);
        let amount = parse_amount(raw_amount);

        let mut issues = Vec::new();
        if date.is_none() {
            issues.push(FieldIssue::Date(raw_date.trim().to_string()));
        }
        if amount.is_none() {
            issues.push(FieldIssue::Amount(raw_amount.trim().to_string()));
        }

        match (date, amount) {
            (Some(date), Some(amount)) => Ok(Self::new(
                date,
                raw_item,
                amount,
                Category::resolve(raw_category),
                raw_description.unwrap_or_default(),
            )),
            _ => Err(ValidationFailure::new(issues)),
        }
    }

    /// Normalizes a header-keyed sheet record.
    pub fn from_record(record: &RawRecord) -> Result<Self, ValidationFailure> {
        Self::normalize(
            record.get(Column::Date).unwrap_or_default(),
            record.get(Column::Item).unwrap_or_default(),
            record.get(Column::Amount).unwrap_or_default(),
            record.get(Column::Category),
            record.get(Column::Description),
        )
    }

    /// Pre-save checks that gate an append to the ledger.
    pub fn validate_for_submission(&self) -> Result<(), ValidationFailure> {
        let mut issues = Vec::new();
        if self.item.is_empty() {
            issues.push(FieldIssue::EmptyItem);
        }
        if self.amount == 0 {
            issues.push(FieldIssue::NonPositiveAmount);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(issues))
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Cell text for a given column.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Date => self.date.format("%Y-%m-%d").to_string(),
            Column::Item => self.item.clone(),
            Column::Amount => self.amount.to_string(),
            Column::Category => self.category.label().to_string(),
            Column::Description => self.description.clone(),
        }
    }
}

/// A header-keyed row as read from the external sheet.
///
/// Header names are trimmed on construction so lookups survive stray
/// whitespace in the sheet's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    cells: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.insert(key.as_ref(), value);
        }
        record
    }

    /// Zips a header row with a positional value row.
    pub fn from_header(header: &[String], values: &[String]) -> Self {
        Self::from_pairs(
            header
                .iter()
                .zip(values.iter().map(String::as_str).chain(std::iter::repeat("")))
                .map(|(key, value)| (key.as_str(), value.to_string())),
        )
    }

    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.cells.insert(column.trim().to_string(), value.into());
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.get_named(column.header())
    }

    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.cells.get(name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Permissive calendar-date parser for sheet cells.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Coerces a cell into whole yen. Fractional, negative and non-numeric text
/// yields `None`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['¥', '￥'])
        .chars()
        .filter(|ch| !matches!(ch, ',' | '，'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(value) = cleaned.parse::<u64>() {
        return Some(value);
    }
    let value = cleaned.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
