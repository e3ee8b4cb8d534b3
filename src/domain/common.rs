use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month of a specific year, used to bucket ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Stable `YYYY-MM` label used for series keys.
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::of(date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(YearMonth::of(date).label(), "2024-05");
    }

    #[test]
    fn orders_chronologically_across_years() {
        let december = YearMonth::new(2023, 12).unwrap();
        let january = YearMonth::new(2024, 1).unwrap();
        assert!(december < january);
        assert!(YearMonth::new(2024, 13).is_none());
    }
}
