//! Dollar amount matching.
//!
//! Amounts are kept verbatim: report pages carry irregular digit counts
//! (`$1,234.5`) that a numeric parse would silently normalize.

use super::patterns::AMOUNT_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        AMOUNT_PATTERN.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_PATTERN
            .find_iter(text)
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// First dollar amount in `text`, verbatim.
pub fn extract_amount(text: &str) -> Option<String> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}
