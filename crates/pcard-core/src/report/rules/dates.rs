//! Transaction date matching.

use super::patterns::DATE_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Matches `M/DD/YYYY` or `MM/DD/YYYY` shapes only; the value is not checked
/// against the calendar.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_PATTERN.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_PATTERN
            .find_iter(text)
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// First date-shaped substring in `text`, verbatim.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_date() {
        assert_eq!(extract_date("WIDGETS INC01/02/2022$100.00"), Some("01/02/2022".to_string()));
    }

    #[test]
    fn test_single_digit_month() {
        assert_eq!(extract_date("ACME 1/15/2021$3.00"), Some("1/15/2021".to_string()));
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(extract_date("13/45/2022"), Some("13/45/2022".to_string()));
    }

    #[test]
    fn test_fixed_width_day_and_year() {
        assert_eq!(extract_date("01/2/2022"), None);
        assert_eq!(extract_date("01/02/22"), None);
    }

    #[test]
    fn test_extract_all() {
        let dates = DateExtractor::new().extract_all("01/02/2022 and 12/31/2021");
        let values: Vec<_> = dates.into_iter().map(|m| m.value).collect();

        assert_eq!(values, vec!["01/02/2022", "12/31/2021"]);
    }
}
