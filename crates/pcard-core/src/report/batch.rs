//! Aggregation of per-page records into a report dataset.

use tracing::{debug, info};

use crate::dataset::ReportDataset;
use crate::error::ExtractionError;
use crate::models::record::TransactionRecord;

use super::parser::{PageExtraction, PageParser, ReportPageParser};

/// Collects page results, keyed by 0-based page index, into a dataset.
///
/// Pages are independent, so results may arrive in any order (for example
/// from concurrent workers); the dataset is ordered by index regardless.
#[derive(Debug, Clone)]
pub struct PageBatch<P = ReportPageParser> {
    parser: P,
    keep_empty_pages: bool,
    dataset: ReportDataset,
}

impl PageBatch<ReportPageParser> {
    /// Create a batch using the default report page parser.
    pub fn new() -> Self {
        Self::with_parser(ReportPageParser::new())
    }
}

impl Default for PageBatch<ReportPageParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PageParser> PageBatch<P> {
    /// Create a batch around a specific parser.
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            keep_empty_pages: true,
            dataset: ReportDataset::new(),
        }
    }

    /// Keep or drop pages that produced no records.
    pub fn keep_empty_pages(mut self, keep: bool) -> Self {
        self.keep_empty_pages = keep;
        self
    }

    /// Parse one page and store its records under `index`.
    ///
    /// Returns the page diagnostics.
    pub fn extract_page(&mut self, index: usize, text: Option<&str>) -> Vec<ExtractionError> {
        let extraction = self.parser.parse(text);
        self.insert_extraction(index, extraction)
    }

    /// Store a page parsed elsewhere (e.g. on a worker thread).
    ///
    /// Returns the page diagnostics.
    pub fn insert_extraction(
        &mut self,
        index: usize,
        extraction: PageExtraction,
    ) -> Vec<ExtractionError> {
        debug!(
            "Page index {}: {} records, {} skipped",
            index,
            extraction.records.len(),
            extraction.skipped()
        );
        self.insert(index, extraction.records);
        extraction.diagnostics
    }

    /// Store records under `index`, replacing anything already there.
    pub fn insert(&mut self, index: usize, records: Vec<TransactionRecord>) {
        if records.is_empty() && !self.keep_empty_pages {
            self.dataset.remove_page(index);
            return;
        }
        self.dataset.insert_page(index, records);
    }

    /// Number of pages stored so far.
    pub fn len(&self) -> usize {
        self.dataset.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.page_count() == 0
    }

    /// Finish the batch and return the dataset.
    pub fn finish(self) -> ReportDataset {
        info!(
            "Aggregated {} records from {} pages",
            self.dataset.record_count(),
            self.dataset.page_count()
        );
        self.dataset
    }
}

/// Parse every page with the default parser; page `i` of the input is
/// stored under index `i`.
pub fn aggregate_pages<I, S>(pages: I) -> ReportDataset
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut batch = PageBatch::new();
    for (index, text) in pages.into_iter().enumerate() {
        batch.extract_page(index, text.as_ref().map(|t| t.as_ref()));
    }
    batch.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIRST: &str = "Page 1 of 2 AGENCY A\nVendor Name ($)\nSTAPLES 02/01/2022$10.00\n";
    const SECOND: &str = "Page 2 of 2 AGENCY A\nVendor Name ($)\nLOWES 02/03/2022$7.25\nHOME DEPOT 02/04/2022$1.00\n";

    #[test]
    fn test_aggregate_pages_by_index() {
        let dataset = aggregate_pages(vec![Some(FIRST), None, Some(SECOND)]);

        assert_eq!(dataset.page_count(), 3);
        assert_eq!(dataset.page(0).unwrap().len(), 1);
        assert!(dataset.page(1).unwrap().is_empty());
        assert_eq!(dataset.page(2).unwrap()[1].vendor, "HOME DEPOT");
        assert_eq!(dataset.record_count(), 3);
    }

    #[test]
    fn test_out_of_order_insertion() {
        let parser = ReportPageParser::new();
        let mut batch = PageBatch::new();

        batch.insert_extraction(1, parser.parse(Some(SECOND)));
        batch.insert_extraction(0, parser.parse(Some(FIRST)));

        let dataset = batch.finish();
        let vendors: Vec<_> = dataset.records().map(|r| r.vendor.as_str()).collect();
        assert_eq!(vendors, vec!["STAPLES", "LOWES", "HOME DEPOT"]);
    }

    #[test]
    fn test_drop_empty_pages() {
        let mut batch = PageBatch::new().keep_empty_pages(false);

        batch.extract_page(0, Some(FIRST));
        let diagnostics = batch.extract_page(1, Some("nothing here"));

        assert_eq!(batch.len(), 1);
        assert!(diagnostics.contains(&ExtractionError::StructureNotFound("page header")));
    }

    #[test]
    fn test_no_cross_page_dedup() {
        let dataset = aggregate_pages(vec![Some(FIRST), Some(FIRST)]);

        assert_eq!(dataset.page(0), dataset.page(1));
        assert_eq!(dataset.record_count(), 2);
    }
}
