//! Rule-based field extractors for charge card report pages.

pub mod amounts;
pub mod dates;
pub mod header;
pub mod patterns;
pub mod vendor;

pub use amounts::{extract_amount, AmountExtractor};
pub use dates::{extract_date, DateExtractor};
pub use header::{extract_agency, extract_page_number};
pub use patterns::*;
pub use vendor::{segment_vendor, VendorSegmenter};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

impl ExtractionMatch<String> {
    fn from_regex(m: regex::Match<'_>) -> Self {
        ExtractionMatch::new(m.as_str().to_string()).with_position(m.start(), m.end())
    }
}
