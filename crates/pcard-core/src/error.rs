//! Error types for the pcard-core library.

use thiserror::Error;

use crate::models::record::RecordField;

/// Main error type for the pcard library.
#[derive(Error, Debug)]
pub enum PcardError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Dataset (de)serialization error.
    #[error("dataset error: {0}")]
    Dataset(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while turning page text into records.
///
/// None of these abort a batch: missing content yields an empty page, a
/// missing field skips one candidate, and a missing header falls back to
/// the `unknown` sentinel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No text was supplied for the page.
    #[error("no page content")]
    MissingContent,

    /// A candidate entry did not yield one of its fields.
    #[error("missing {field} in {span:?}")]
    MissingField { field: RecordField, span: String },

    /// A page-level structure (header line, agency line) was absent.
    #[error("{0} not found")]
    StructureNotFound(&'static str),
}

/// Result type for the pcard library.
pub type Result<T> = std::result::Result<T, PcardError>;
