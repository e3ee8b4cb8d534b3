use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigMissing;

/// Fallback ceiling used when the budget cell holds nothing usable.
pub const DEFAULT_MONTHLY_BUDGET: u64 = 300_000;

/// Monthly spending ceiling in whole yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetSetting(u64);

impl BudgetSetting {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Parses the textual budget cell, tolerating thousands separators and a
    /// leading yen sign.
    pub fn from_cell(raw: Option<&str>) -> Result<Self, ConfigMissing> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ConfigMissing::Empty);
        }
        let cleaned: String = raw
            .trim_start_matches(['¥', '￥'])
            .chars()
            .filter(|ch| !matches!(ch, ',' | '，' | '_') && !ch.is_whitespace())
            .collect();
        cleaned
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ConfigMissing::Unparseable(raw.to_string()))
    }

    /// Text written back to the budget cell.
    pub fn to_cell(&self) -> String {
        self.0.to_string()
    }
}

impl Default for BudgetSetting {
    fn default() -> Self {
        Self(DEFAULT_MONTHLY_BUDGET)
    }
}

impl From<u64> for BudgetSetting {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BudgetSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_values() {
        assert_eq!(
            BudgetSetting::from_cell(Some("300,000")),
            Ok(BudgetSetting::new(300_000))
        );
        assert_eq!(
            BudgetSetting::from_cell(Some(" ¥1,250,000 ")),
            Ok(BudgetSetting::new(1_250_000))
        );
        assert_eq!(
            BudgetSetting::from_cell(Some("0")),
            Ok(BudgetSetting::new(0))
        );
    }

    #[test]
    fn empty_and_garbage_cells_report_config_missing() {
        assert_eq!(BudgetSetting::from_cell(None), Err(ConfigMissing::Empty));
        assert_eq!(BudgetSetting::from_cell(Some("  ")), Err(ConfigMissing::Empty));
        assert_eq!(
            BudgetSetting::from_cell(Some("lots")),
            Err(ConfigMissing::Unparseable("lots".into()))
        );
        assert!(BudgetSetting::from_cell(Some("-5000")).is_err());
    }
}
