//! Persisted report datasets and the listing document served from them.
//!
//! A dataset maps 0-based page indices to that page's records. On disk it is
//! a JSON object keyed by the index as a string:
//!
//! ```json
//! {"0": [{"vendor": "ACME CORP", "date": "01/02/2022", "amount": "$45.00",
//!         "page": 1, "agency": "DEPARTMENT OF REVENUE"}], "1": []}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::record::TransactionRecord;

/// Records of one report, keyed by page index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportDataset {
    pages: BTreeMap<usize, Vec<TransactionRecord>>,
}

impl ReportDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store records for a page, replacing any previous entry.
    pub fn insert_page(&mut self, index: usize, records: Vec<TransactionRecord>) {
        self.pages.insert(index, records);
    }

    pub fn remove_page(&mut self, index: usize) -> Option<Vec<TransactionRecord>> {
        self.pages.remove(&index)
    }

    pub fn page(&self, index: usize) -> Option<&[TransactionRecord]> {
        self.pages.get(&index).map(Vec::as_slice)
    }

    /// Pages in index order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[TransactionRecord])> {
        self.pages.iter().map(|(index, records)| (*index, records.as_slice()))
    }

    /// All records, in page-index order then extraction order.
    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.pages.values().flatten()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn record_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Load a dataset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} records from {} pages in {}",
            dataset.record_count(),
            dataset.page_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Save to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json(pretty)?)?;
        debug!("Saved dataset to {}", path.display());
        Ok(())
    }
}

/// Read-only listing of every stored record.
///
/// The `taxSales` key is a legacy name kept for existing consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "taxSales")]
    pub tax_sales: Vec<TransactionRecord>,
}

impl Listing {
    /// Flatten a dataset, preserving page then extraction order.
    pub fn from_dataset(dataset: &ReportDataset) -> Self {
        Self {
            tax_sales: dataset.records().cloned().collect(),
        }
    }

    /// Vendor names in listing order, duplicates kept.
    pub fn vendors(&self) -> Vec<&str> {
        self.tax_sales.iter().map(|r| r.vendor.as_str()).collect()
    }
}

impl From<&ReportDataset> for Listing {
    fn from(dataset: &ReportDataset) -> Self {
        Self::from_dataset(dataset)
    }
}
