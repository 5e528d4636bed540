//! Record extraction from charge card usage report pages.

mod batch;
mod parser;
pub mod rules;

pub use batch::{aggregate_pages, PageBatch};
pub use parser::{PageExtraction, PageParser, ReportPageParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
