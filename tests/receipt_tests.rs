use chrono::NaiveDate;
use yen_tracker::{
    core::services::{EntryService, ReceiptService},
    domain::Category,
    errors::{AnalyzerError, ParseFailure},
    receipt::{self, ReceiptAnalyzer},
    storage::MemorySheet,
};

struct FixedReply(String);

impl ReceiptAnalyzer for FixedReply {
    fn analyze(&self, _image: &[u8], instruction: &str) -> Result<String, AnalyzerError> {
        assert!(instruction.contains("合計"));
        Ok(self.0.clone())
    }
}

#[test]
fn fenced_reply_becomes_a_suggestion() {
    let reply = "```json\n{\"item\":\"Lawson\",\"amount\":980,\"category\":\"Food 🍱\"}\n```";
    let suggestion = receipt::validate(reply).unwrap();
    assert_eq!(suggestion.item, "Lawson");
    assert_eq!(suggestion.amount, 980);
    assert_eq!(suggestion.category, Category::Food);
    assert_eq!(suggestion.category.label(), "Food 🍱");
}

#[test]
fn chatty_reply_around_json_is_tolerated() {
    let reply = "Here is the receipt:\n{\"item\": \"FamilyMart\", \"amount\": \"1,120\", \"category\": \"Food 🍱\"}\nHope that helps!";
    let suggestion = receipt::validate(reply).unwrap();
    assert_eq!(suggestion.item, "FamilyMart");
    assert_eq!(suggestion.amount, 1_120);
}

#[test]
fn unknown_category_falls_back_to_food() {
    let reply = r#"{"item":"Tsutaya","amount":1500,"category":"Books 📚"}"#;
    let suggestion = receipt::validate(reply).unwrap();
    assert_eq!(suggestion.category, Category::Food);
}

#[test]
fn missing_required_keys_fail() {
    assert!(matches!(
        receipt::validate(r#"{"amount":300,"category":"Food 🍱"}"#),
        Err(ParseFailure::MissingKey("item"))
    ));
    assert!(matches!(
        receipt::validate("[1, 2, 3]"),
        Err(ParseFailure::NotAnObject)
    ));
    assert!(matches!(receipt::validate("   "), Err(ParseFailure::Empty)));
}

#[test]
fn analyzer_suggestion_still_needs_submission_checks() {
    let analyzer = FixedReply(r#"{"item":"Uniqlo","category":"Shopping 🛍️"}"#.to_string());
    let suggestion = ReceiptService::scan(&analyzer, b"jpeg bytes").unwrap();
    assert!(!suggestion.has_amount());

    let sheet = MemorySheet::new();
    let row = suggestion.into_entry(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), "");
    assert!(EntryService::submit(&sheet, &row).is_err());
    assert!(sheet.raw_rows().is_empty());
}
