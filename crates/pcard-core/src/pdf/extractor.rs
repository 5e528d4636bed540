//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF page text extractor.
///
/// `lopdf` loads (and if needed decrypts) the document; `pdf-extract`
/// renders the text of each page.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_pages: usize,
    decrypt_empty_password: bool,
}

/// Extracted text content of a report PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfContent {
    /// Pages in document order.
    pub pages: Vec<PdfPage>,
}

/// Text of a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfContent {
    /// True when no page produced any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.text.trim().is_empty())
    }

    /// Page texts in order, `None` for pages without text.
    pub fn page_texts(&self) -> Vec<Option<&str>> {
        self.pages
            .iter()
            .map(|p| Some(p.text.as_str()).filter(|t| !t.trim().is_empty()))
            .collect()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
            decrypt_empty_password: true,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_max_pages(config.max_pages)
            .with_empty_password(config.decrypt_empty_password)
    }

    /// Limit the number of pages extracted (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Try an empty password on encrypted documents.
    pub fn with_empty_password(mut self, enabled: bool) -> Self {
        self.decrypt_empty_password = enabled;
        self
    }

    /// Extract the text of every page.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let texts = self.extract_page_texts()?;

        let pages: Vec<PdfPage> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PdfPage {
                number: i as u32 + 1,
                text,
            })
            .collect();

        let blank = pages.iter().filter(|p| p.text.trim().is_empty()).count();
        if blank > 0 {
            warn!("{} of {} pages have no text layer", blank, pages.len());
        }

        Ok(PdfContent { pages })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let mut pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if self.max_pages > 0 && pages.len() > self.max_pages {
            debug!("Limiting extraction to {} of {} pages", self.max_pages, pages.len());
            pages.truncate(self.max_pages);
        }

        Ok(pages)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        self.extract_page_texts()?
            .into_iter()
            .nth((page - 1) as usize)
            .ok_or(PdfError::InvalidPage(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_page_texts(), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::InvalidPage(1))));
    }

    #[test]
    fn test_load_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_from_config() {
        let config = PdfConfig {
            max_pages: 3,
            decrypt_empty_password: false,
        };
        let extractor = PdfExtractor::from_config(&config);

        assert_eq!(extractor.max_pages, 3);
        assert!(!extractor.decrypt_empty_password);
    }

    #[test]
    fn test_content_page_texts() {
        let content = PdfContent {
            pages: vec![
                PdfPage { number: 1, text: "Page 1 of 2".to_string() },
                PdfPage { number: 2, text: " \n".to_string() },
            ],
        };

        assert_eq!(content.page_texts(), vec![Some("Page 1 of 2"), None]);
        assert!(!content.is_blank());
    }
}
