//! Vendor name segmentation.
//!
//! Report pages print the vendor name and the transaction date with no
//! delimiter between them (`WIDGETS INC01/02/2022$100.00`), and a vendor may
//! follow a `Cardholder` label left over from the column layout. The
//! segmenter isolates the text before the date, dropping the label when it
//! is present.

use regex::Regex;

use super::patterns::{CARDHOLDER_MARKER, VENDOR_AFTER_CARDHOLDER, VENDOR_BEFORE_DATE};
use super::{ExtractionMatch, FieldExtractor};

/// Splits the vendor name off a vendor+date+amount span.
pub struct VendorSegmenter;

impl VendorSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn pattern_for(text: &str) -> &'static Regex {
        if text.contains(CARDHOLDER_MARKER) {
            &VENDOR_AFTER_CARDHOLDER
        } else {
            &VENDOR_BEFORE_DATE
        }
    }
}

impl Default for VendorSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorSegmenter {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Every non-blank vendor run in `text`, cleaned, in order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        Self::pattern_for(text)
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter(|run| !run.as_str().trim().is_empty())
            .map(|run| {
                ExtractionMatch::new(clean_vendor(run.as_str()))
                    .with_position(run.start(), run.end())
            })
            .collect()
    }
}

/// Vendor name preceding the first date in `span`.
///
/// Returns `None` when every run before a date is blank.
pub fn segment_vendor(span: &str) -> Option<String> {
    VendorSegmenter::new().extract(span).map(|m| m.value)
}

// Line wrapping in the PDF splits words at arbitrary points, so breaks are
// removed rather than turned into spaces.
fn clean_vendor(raw: &str) -> String {
    raw.trim().chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_vendor() {
        assert_eq!(
            segment_vendor("WIDGETS INC01/02/2022$100.00"),
            Some("WIDGETS INC".to_string())
        );
    }

    #[test]
    fn test_cardholder_prefix_dropped() {
        assert_eq!(
            segment_vendor("Cardholder ACME CORP 01/02/2022$45.00"),
            Some("ACME CORP".to_string())
        );
    }

    #[test]
    fn test_line_breaks_concatenated() {
        assert_eq!(
            segment_vendor("\n OFFICE DE\nPOT #12\r\n03/14/2022$19.99"),
            Some("OFFICE DEPOT #12".to_string())
        );
    }

    #[test]
    fn test_blank_cardholder_run_uses_next_marker() {
        let span = "Cardholder 01/02/2022 Cardholder HOME GOODS 01/03/2022$5.00";
        assert_eq!(segment_vendor(span), Some("HOME GOODS".to_string()));
    }

    #[test]
    fn test_blank_plain_run_uses_next_segment() {
        let span = "  01/02/2022 STAPLES 01/03/2022$5.00";
        assert_eq!(segment_vendor(span), Some("STAPLES".to_string()));
    }

    #[test]
    fn test_no_vendor() {
        assert_eq!(segment_vendor("01/02/2022$5.00"), None);
        assert_eq!(segment_vendor("Cardholder \n01/02/2022$5.00"), None);
        assert_eq!(segment_vendor("no date at all"), None);
    }

    #[test]
    fn test_vendor_stops_at_first_date() {
        assert_eq!(
            segment_vendor("DELTA 12/05/2022$1.00"),
            Some("DELTA".to_string())
        );
    }
}
