//! Page parser turning one page of report text into transaction records.

use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::record::{Agency, PageNumber, RecordField, TransactionRecord};

use super::rules::{
    amounts::extract_amount, dates::extract_date, header::extract_agency,
    header::extract_page_number, patterns::CANDIDATE_ENTRY, vendor::segment_vendor,
};
use super::Result;

/// Result of parsing one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Page number shared by every record on the page.
    pub page: PageNumber,
    /// Agency shared by every record on the page.
    pub agency: Agency,
    /// Records in the order their entries appear in the text.
    pub records: Vec<TransactionRecord>,
    /// Recoverable problems met while parsing (skipped entries, missing headers).
    pub diagnostics: Vec<ExtractionError>,
}

impl PageExtraction {
    /// Number of candidate entries that were skipped.
    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, ExtractionError::MissingField { .. }))
            .count()
    }
}

/// Trait for page parsing.
pub trait PageParser {
    /// Parse one page of text. `None` stands for a page with no content.
    fn parse(&self, text: Option<&str>) -> PageExtraction;

    /// Records of one page, dropping diagnostics.
    fn extract_records(&self, text: Option<&str>) -> Vec<TransactionRecord> {
        self.parse(text).records
    }
}

/// Parser for SC charge card usage report pages.
///
/// Stateless: every call scans its input from scratch, so one parser can be
/// shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPageParser;

impl ReportPageParser {
    pub fn new() -> Self {
        Self
    }

    /// Build a record from one candidate span.
    ///
    /// All three fields come from this span alone; nothing is carried over
    /// from earlier candidates.
    fn parse_candidate(
        &self,
        span: &str,
        page: PageNumber,
        agency: &Agency,
    ) -> Result<TransactionRecord> {
        let missing = |field| ExtractionError::MissingField {
            field,
            span: span.to_string(),
        };

        let amount = extract_amount(span).ok_or_else(|| missing(RecordField::Amount))?;
        let date = extract_date(span).ok_or_else(|| missing(RecordField::Date))?;
        let vendor = segment_vendor(span).ok_or_else(|| missing(RecordField::Vendor))?;

        Ok(TransactionRecord {
            vendor,
            date,
            amount,
            page,
            agency: agency.clone(),
        })
    }
}

impl PageParser for ReportPageParser {
    fn parse(&self, text: Option<&str>) -> PageExtraction {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            debug!("Page has no content");
            return PageExtraction {
                diagnostics: vec![ExtractionError::MissingContent],
                ..PageExtraction::default()
            };
        };

        let mut diagnostics = Vec::new();

        let page = extract_page_number(text);
        if !page.is_known() {
            diagnostics.push(ExtractionError::StructureNotFound("page header"));
        }

        let agency = extract_agency(text);
        if !agency.is_known() {
            diagnostics.push(ExtractionError::StructureNotFound("agency line"));
        }

        let mut records = Vec::new();
        for candidate in CANDIDATE_ENTRY.find_iter(text) {
            trace!("Candidate entry: {:?}", candidate.as_str());

            match self.parse_candidate(candidate.as_str(), page, &agency) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!("Skipping entry at byte {}: {}", candidate.start(), e);
                    diagnostics.push(e);
                }
            }
        }

        debug!(
            "Page {} ({}): {} records, {} diagnostics",
            page,
            agency,
            records.len(),
            diagnostics.len()
        );

        PageExtraction {
            page,
            agency,
            records,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "Page 2 of 5 DEPARTMENT OF REVENUE\n\
        Vendor Name Transaction Date Amount ($)\n\
        WIDGETS INC01/02/2022$100.00\n\
        Cardholder ACME CORP 01/04/2022$45.00\n\
        OFFICE DE\nPOT #12 1/05/2022$1,219.9\n";

    fn fields(records: &[TransactionRecord]) -> Vec<(&str, &str, &str)> {
        records
            .iter()
            .map(|r| (r.vendor.as_str(), r.date.as_str(), r.amount.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_page() {
        let result = ReportPageParser::new().parse(Some(PAGE));

        assert_eq!(result.page, PageNumber::Known(2));
        assert_eq!(result.agency, Agency::Known("DEPARTMENT OF REVENUE".to_string()));
        assert_eq!(
            fields(&result.records),
            vec![
                ("WIDGETS INC", "01/02/2022", "$100.00"),
                ("ACME CORP", "01/04/2022", "$45.00"),
                ("OFFICE DEPOT #12", "1/05/2022", "$1,219.9"),
            ]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_page_fields_shared_by_records() {
        let records = ReportPageParser::new().extract_records(Some(PAGE));

        assert!(records.iter().all(|r| r.page == PageNumber::Known(2)));
        assert!(records
            .iter()
            .all(|r| r.agency == Agency::Known("DEPARTMENT OF REVENUE".to_string())));
    }

    #[test]
    fn test_missing_content() {
        let parser = ReportPageParser::new();

        assert!(parser.extract_records(None).is_empty());
        assert!(parser.extract_records(Some("")).is_empty());
        assert_eq!(
            parser.parse(None).diagnostics,
            vec![ExtractionError::MissingContent]
        );
    }

    #[test]
    fn test_no_dates_no_records() {
        let text = "Page 1 of 1 CLEMSON UNIVERSITY\nVendor Name\nno transactions $5.00 this month\n";
        assert!(ReportPageParser::new().extract_records(Some(text)).is_empty());
    }

    #[test]
    fn test_missing_header_is_unknown() {
        let result = ReportPageParser::new().parse(Some("WIDGETS INC01/02/2022$100.00"));

        assert_eq!(result.page, PageNumber::Unknown);
        assert_eq!(result.agency, Agency::Unknown);
        assert_eq!(fields(&result.records), vec![("WIDGETS INC", "01/02/2022", "$100.00")]);
        assert_eq!(
            result.diagnostics,
            vec![
                ExtractionError::StructureNotFound("page header"),
                ExtractionError::StructureNotFound("agency line"),
            ]
        );
    }

    #[test]
    fn test_malformed_amount_skipped() {
        let text = "Page 1 of 1 AGENCY\nVendor Name ($)\n\
            STAPLES 02/01/2022$10.00\n\
            BROKEN VENDOR 02/03/2022$100\n\
            HOME DEPOT 02/02/2022$35.10\n";

        let result = ReportPageParser::new().parse(Some(text));

        assert_eq!(
            fields(&result.records),
            vec![
                ("STAPLES", "02/01/2022", "$10.00"),
                ("HOME DEPOT", "02/02/2022", "$35.10"),
            ]
        );
        assert_eq!(
            result.diagnostics,
            vec![ExtractionError::MissingField {
                field: RecordField::Amount,
                span: "\nBROKEN VENDOR 02/03/2022$100".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_amount_last_on_page() {
        let text = "Amount ($)\nHOME DEPOT 02/02/2022$35.10\nBROKEN 02/03/2022$1,00";
        let result = ReportPageParser::new().parse(Some(text));

        assert_eq!(fields(&result.records), vec![("HOME DEPOT", "02/02/2022", "$35.10")]);
        assert_eq!(result.skipped(), 1);
    }

    #[test]
    fn test_column_header_joins_first_vendor() {
        // Column labels use only vendor-name characters, so without a
        // breaking character they run into the first entry.
        let text = "Page 1 of 1 AGENCY\n\
            Cardholder Vendor Name Date Amount\n\
            JOHN DOE\n\
            ACME 01/02/2022$5.00\n\
            LOWES 01/03/2022$2.00\n";

        let result = ReportPageParser::new().parse(Some(text));

        assert_eq!(
            fields(&result.records),
            vec![
                ("Vendor Name Date AmountJOHN DOEACME", "01/02/2022", "$5.00"),
                ("LOWES", "01/03/2022", "$2.00"),
            ]
        );
        assert_eq!(result.page, PageNumber::Known(1));
    }

    #[test]
    fn test_blank_vendor_skipped() {
        let text = "Amount ($)\nCardholder 03/01/2022$9.99\nLOWES 03/02/2022$4.00";
        let result = ReportPageParser::new().parse(Some(text));

        assert_eq!(fields(&result.records), vec![("LOWES", "03/02/2022", "$4.00")]);
        assert_eq!(result.skipped(), 1);
        assert!(matches!(
            &result.diagnostics[..],
            [.., ExtractionError::MissingField { field: RecordField::Vendor, .. }]
        ));
    }

    #[test]
    fn test_order_preserved() {
        let text = "(\nZETA 01/01/2022$1.00\nALPHA 01/02/2022$2.00\nMIDDLE 01/03/2022$3.00";
        let records = ReportPageParser::new().extract_records(Some(text));
        let vendors: Vec<_> = records.iter().map(|r| r.vendor.as_str()).collect();

        assert_eq!(vendors, vec!["ZETA", "ALPHA", "MIDDLE"]);
    }

    #[test]
    fn test_idempotent() {
        let parser = ReportPageParser::new();
        assert_eq!(parser.parse(Some(PAGE)), parser.parse(Some(PAGE)));
    }
}
