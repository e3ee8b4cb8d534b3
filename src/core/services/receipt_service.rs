use crate::core::services::ServiceResult;
use crate::receipt::{self, ReceiptAnalyzer, ReceiptSuggestion};

/// Turns receipt images or analyzer replies into suggestions.
pub struct ReceiptService;

impl ReceiptService {
    /// Validates a reply already obtained from the analyzer.
    pub fn suggest(response: &str) -> ServiceResult<ReceiptSuggestion> {
        let suggestion = receipt::validate(response).inspect_err(|failure| {
            tracing::warn!(%failure, "receipt reply rejected");
        })?;
        tracing::info!(
            item = suggestion.item.as_str(),
            amount = suggestion.amount,
            "receipt suggestion ready"
        );
        Ok(suggestion)
    }

    /// Sends the image to the analyzer and validates its reply. Blocks until
    /// the analyzer answers.
    pub fn scan(
        analyzer: &dyn ReceiptAnalyzer,
        image: &[u8],
    ) -> ServiceResult<ReceiptSuggestion> {
        let response = analyzer.analyze(image, &receipt::instruction())?;
        Self::suggest(&response)
    }
}
