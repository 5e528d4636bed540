//! Core library for purchase-card report extraction.
//!
//! This crate provides:
//! - PDF processing (per-page text extraction)
//! - Record extraction from charge card usage report pages (vendor, date,
//!   amount, page number, agency)
//! - Report datasets keyed by page index, and the listing document served
//!   from them

pub mod dataset;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use dataset::{Listing, ReportDataset};
pub use error::{ExtractionError, PcardError, PdfError, Result};
pub use models::config::PcardConfig;
pub use models::record::{Agency, PageNumber, RecordField, TransactionRecord};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use report::{aggregate_pages, PageBatch, PageExtraction, PageParser, ReportPageParser};
