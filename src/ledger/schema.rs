use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::LedgerRow;

/// Named sheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Date,
    Item,
    Amount,
    Category,
    Description,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Item => "Item",
            Column::Amount => "Amount",
            Column::Category => "Category",
            Column::Description => "Description",
        }
    }
}

impl Column {
    /// Columns every writable sheet must carry; `Description` is optional.
    pub const REQUIRED: [Column; 4] = [Column::Date, Column::Item, Column::Amount, Column::Category];

    /// Matches a header cell, ignoring surrounding whitespace.
    pub fn from_header(name: &str) -> Option<Column> {
        let name = name.trim();
        [
            Column::Date,
            Column::Item,
            Column::Amount,
            Column::Category,
            Column::Description,
        ]
        .into_iter()
        .find(|column| column.header() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Versioned column layout of the expense sheet.
///
/// Reads always go by header name, so any known layout can be read. New
/// sheets are created with [`RowSchema::CANONICAL`]; appends to an existing
/// sheet follow its own header through [`RowSchema::encode_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSchema {
    pub version: u32,
    pub columns: &'static [Column],
}

impl RowSchema {
    /// `[Date, Item, Category, Amount]`, written by early sheets.
    pub const LEGACY: RowSchema = RowSchema {
        version: 1,
        columns: &[Column::Date, Column::Item, Column::Category, Column::Amount],
    };

    /// `[Date, Item, Amount, Category, Description]`.
    pub const CANONICAL: RowSchema = RowSchema {
        version: 2,
        columns: &[
            Column::Date,
            Column::Item,
            Column::Amount,
            Column::Category,
            Column::Description,
        ],
    };

    pub fn header(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.header().to_string())
            .collect()
    }

    /// Cells for `row` in the order of an existing `header`.
    ///
    /// Header cells that name no known column are left blank, as is
    /// `Description` on sheets without one. Fails with the first required
    /// column the header lacks.
    pub fn encode_for(header: &[String], row: &LedgerRow) -> Result<Vec<String>, Column> {
        let columns: Vec<Option<Column>> =
            header.iter().map(|name| Column::from_header(name)).collect();
        if let Some(missing) = Column::REQUIRED
            .into_iter()
            .find(|required| !columns.contains(&Some(*required)))
        {
            return Err(missing);
        }
        Ok(columns
            .into_iter()
            .map(|column| column.map(|column| row.cell(column)).unwrap_or_default())
            .collect())
    }

    /// Identifies a layout from a header row, ignoring surrounding whitespace.
    pub fn detect(header: &[String]) -> Option<RowSchema> {
        [Self::CANONICAL, Self::LEGACY].into_iter().find(|schema| {
            schema.columns.len() == header.len()
                && schema
                    .columns
                    .iter()
                    .zip(header)
                    .all(|(column, name)| column.header() == name.trim())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Category;

    #[test]
    fn canonical_order_puts_amount_before_category() {
        let row = LedgerRow::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Coffee",
            450,
            Category::Food,
            "morning",
        );
        assert_eq!(
            RowSchema::encode_for(&RowSchema::CANONICAL.header(), &row).unwrap(),
            vec!["2024-05-01", "Coffee", "450", "Food 🍱", "morning"]
        );
        assert_eq!(
            RowSchema::encode_for(&RowSchema::LEGACY.header(), &row).unwrap(),
            vec!["2024-05-01", "Coffee", "Food 🍱", "450"]
        );
    }

    #[test]
    fn detects_layout_from_padded_header() {
        let header: Vec<String> = ["Date ", " Item", "Category", "Amount"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(RowSchema::detect(&header), Some(RowSchema::LEGACY));
        assert_eq!(
            RowSchema::detect(&RowSchema::CANONICAL.header()),
            Some(RowSchema::CANONICAL)
        );
        assert_eq!(RowSchema::detect(&["Date".to_string()]), None);
    }

    fn coffee() -> LedgerRow {
        LedgerRow::new(
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            "Lawson",
            980,
            Category::Food,
            "onigiri",
        )
    }

    #[test]
    fn encodes_against_legacy_header_by_name() {
        let header: Vec<String> = ["Date", "Item", " Category ", "Amount"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            RowSchema::encode_for(&header, &coffee()).unwrap(),
            vec!["2024-05-03", "Lawson", "Food 🍱", "980"]
        );
    }

    #[test]
    fn unknown_columns_stay_blank_and_missing_ones_are_reported() {
        let header: Vec<String> = ["Date", "Memo", "Item", "Amount", "Category"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            RowSchema::encode_for(&header, &coffee()).unwrap(),
            vec!["2024-05-03", "", "Lawson", "980", "Food 🍱"]
        );
        let no_amount: Vec<String> = ["Date", "Item", "Category"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            RowSchema::encode_for(&no_amount, &coffee()),
            Err(Column::Amount)
        );
    }
}
