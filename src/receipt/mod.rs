//! Validation of AI-produced receipt suggestions.
//!
//! The external analyzer returns free text that should contain a JSON object
//! with `item`, `amount` and `category`. Nothing here touches the ledger; a
//! [`ReceiptSuggestion`] only pre-fills an entry the user still has to confirm.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Category, LedgerRow};
use crate::errors::{AnalyzerError, ParseFailure};

const FENCE: &str = "```";

/// External service that reads a receipt image and answers in free text.
pub trait ReceiptAnalyzer {
    fn analyze(&self, image: &[u8], instruction: &str) -> Result<String, AnalyzerError>;
}

/// Unconfirmed candidate values for a new expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSuggestion {
    pub item: String,
    /// Zero when the analyzer could not determine a total.
    pub amount: u64,
    pub category: Category,
}

impl Default for ReceiptSuggestion {
    fn default() -> Self {
        Self {
            item: String::new(),
            amount: 0,
            category: Category::DEFAULT,
        }
    }
}

impl ReceiptSuggestion {
    pub fn has_amount(&self) -> bool {
        self.amount > 0
    }

    /// Builds the entry the user confirms. It still goes through submission
    /// validation before any append.
    pub fn into_entry(self, date: NaiveDate, description: impl Into<String>) -> LedgerRow {
        LedgerRow::new(date, self.item, self.amount, self.category, description)
    }
}

/// Instruction sent alongside the receipt image.
pub fn instruction() -> String {
    let labels: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
    format!(
        "Analyze this Japanese receipt. Return ONLY a JSON object:\n\
         {{\"item\": \"store or item name\", \"amount\": total_as_int, \"category\": \"match one below\"}}\n\
         Categories: {}\n\
         Look for '合計' or '税込' for the total.",
        labels.join(", ")
    )
}

/// Parses analyzer output into a suggestion.
pub fn validate(response: &str) -> Result<ReceiptSuggestion, ParseFailure> {
    let body = strip_fences(response);
    if body.is_empty() {
        return Err(ParseFailure::Empty);
    }
    let candidate = outermost_object(body).unwrap_or(body);
    let value: Value =
        serde_json::from_str(candidate).map_err(|err| ParseFailure::Malformed(err.to_string()))?;
    let object = value.as_object().ok_or(ParseFailure::NotAnObject)?;

    let item = required_str(object, "item")?.trim().to_string();
    let category = Category::resolve(Some(required_str(object, "category")?));
    let amount = object.get("amount").map(coerce_amount).unwrap_or(0);

    Ok(ReceiptSuggestion {
        item,
        amount,
        category,
    })
}

/// Removes a surrounding code fence (with optional language tag).
pub fn strip_fences(text: &str) -> &str {
    let body = text.trim();
    let (Some(start), Some(end)) = (body.find(FENCE), body.rfind(FENCE)) else {
        return body;
    };
    let inner = if start < end {
        drop_language_tag(&body[start + FENCE.len()..end])
    } else if start == 0 {
        drop_language_tag(&body[FENCE.len()..])
    } else {
        &body[..start]
    };
    inner.trim()
}

fn drop_language_tag(text: &str) -> &str {
    match text.find('\n') {
        Some(newline) if !text[..newline].contains(['{', '[']) => &text[newline + 1..],
        _ => text,
    }
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, ParseFailure> {
    match object.get(key) {
        None => Err(ParseFailure::MissingKey(key)),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ParseFailure::WrongType(key)),
    }
}

fn coerce_amount(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
                    .map(|v| v as u64)
            })
            .unwrap_or(0),
        Value::String(text) => crate::domain::row::parse_amount(text).unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{"item":"Lawson","amount":980,"category":"Food 🍱"}"#;

    #[test]
    fn fenced_json_matches_plain_json() {
        let fenced = format!("```json\n{PLAIN}\n```");
        let expected = validate(PLAIN).expect("plain parses");
        assert_eq!(validate(&fenced).expect("fenced parses"), expected);
        assert_eq!(expected.item, "Lawson");
        assert_eq!(expected.amount, 980);
        assert_eq!(expected.category, Category::Food);
        assert_eq!(expected.category.label(), "Food 🍱");
    }

    #[test]
    fn stripping_is_idempotent() {
        let fenced = format!("```json\n{PLAIN}\n```");
        let once = strip_fences(&fenced);
        assert_eq!(strip_fences(once), once);
        assert_eq!(once, PLAIN);
        assert_eq!(strip_fences(&format!("```{PLAIN}```")), PLAIN);
    }

    #[test]
    fn prose_around_the_fence_is_ignored() {
        let text = format!("Here is the receipt:\n```json\n{PLAIN}\n```\nThanks!");
        assert_eq!(validate(&text).unwrap().amount, 980);
    }

    #[test]
    fn malformed_text_never_yields_a_suggestion() {
        assert!(matches!(
            validate("```json\n{\"item\": \"Lawson\", \"amount\": 98\n```"),
            Err(ParseFailure::Malformed(_))
        ));
        assert_eq!(validate("   "), Err(ParseFailure::Empty));
        assert_eq!(validate("```\n```"), Err(ParseFailure::Empty));
        assert_eq!(validate("[1, 2]"), Err(ParseFailure::NotAnObject));
        assert_eq!(
            validate(r#"{"amount": 500, "category": "Food 🍱"}"#),
            Err(ParseFailure::MissingKey("item"))
        );
        assert_eq!(
            validate(r#"{"item": 12, "amount": 500, "category": "Food 🍱"}"#),
            Err(ParseFailure::WrongType("item"))
        );
    }

    #[test]
    fn undetermined_amount_defaults_to_zero() {
        let suggestion =
            validate(r#"{"item": "Seven", "amount": "unknown", "category": "Shopping 🛍️"}"#)
                .unwrap();
        assert_eq!(suggestion.amount, 0);
        assert!(!suggestion.has_amount());
        assert_eq!(suggestion.category, Category::Shopping);

        let suggestion = validate(r#"{"item": "Seven", "category": "Gifts 🎁"}"#).unwrap();
        assert_eq!(suggestion.amount, 0);

        let suggestion =
            validate(r#"{"item": "Seven", "amount": -40, "category": "Gifts 🎁"}"#).unwrap();
        assert_eq!(suggestion.amount, 0);

        let suggestion =
            validate(r#"{"item": "Seven", "amount": "1,280", "category": "Gifts 🎁"}"#).unwrap();
        assert_eq!(suggestion.amount, 1280);
    }

    #[test]
    fn unknown_category_falls_back() {
        let suggestion =
            validate(r#"{"item": "Daiso", "amount": 110, "category": "Household"}"#).unwrap();
        assert_eq!(suggestion.category, Category::Food);
    }

    #[test]
    fn instruction_lists_every_category() {
        let text = instruction();
        for category in Category::ALL {
            assert!(text.contains(category.label()), "missing {category}");
        }
        assert!(text.contains("合計"));
    }

    #[test]
    fn suggestion_becomes_a_submittable_entry() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let row = validate(PLAIN).unwrap().into_entry(date, "scanned");
        assert!(row.validate_for_submission().is_ok());
        assert_eq!(row.description(), "scanned");
    }
}
