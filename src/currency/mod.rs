//! Yen display helpers.

use chrono::{Datelike, NaiveDate};

pub const YEN_SYMBOL: &str = "¥";

/// Groups digits in threes, e.g. `1234567` → `1,234,567`.
pub fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `¥1,234`, or `-¥1,234` for negative values.
pub fn format_yen(amount: i64) -> String {
    let body = group_digits(&amount.unsigned_abs().to_string(), ',');
    if amount < 0 {
        format!("-{}{}", YEN_SYMBOL, body)
    } else {
        format!("{}{}", YEN_SYMBOL, body)
    }
}

pub fn format_yen_unsigned(amount: u64) -> String {
    format!("{}{}", YEN_SYMBOL, group_digits(&amount.to_string(), ','))
}

/// One decimal place, e.g. `0.998` → `99.8%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_yen(0), "¥0");
        assert_eq!(format_yen(980), "¥980");
        assert_eq!(format_yen(299_550), "¥299,550");
        assert_eq!(format_yen(-12_000), "-¥12,000");
        assert_eq!(format_yen_unsigned(1_234_567), "¥1,234,567");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.998), "99.8%");
        assert_eq!(format_percent(-0.2), "-20.0%");
    }
}
