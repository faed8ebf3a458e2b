//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
///
/// lopdf parses (and, if needed, decrypts) the document; pdf-extract produces
/// the reading-order text. When pdf-extract fails or panics, the text of each
/// page is taken from lopdf instead and joined in page order.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_empty_password: bool,
    page_separator: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    /// Create an extractor honoring the PDF section of the configuration.
    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_empty_password: config.decrypt_empty_password,
            page_separator: config.page_separator.clone(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Text of every page through lopdf, joined with the page separator.
    fn extract_text_by_pages(&self) -> Result<String> {
        let doc = self.document()?;
        let mut pages = Vec::new();

        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    trace!("lopdf could not read page {}: {}", page_num, e);
                    pages.push(String::new());
                }
            }
        }

        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(PdfError::TextExtraction(
                "no text found on any page".to_string(),
            ));
        }

        Ok(pages.join(&self.page_separator))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        self.document = None;
        self.raw_data.clear();

        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the raw bytes, so hand it the decrypted copy
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

    fn extract_text(&self) -> Result<String> {
        self.document()?;

        let raw = &self.raw_data;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(raw)
        }));

        let primary = match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => return Ok(text),
            Ok(Ok(_)) => PdfError::TextExtraction("pdf-extract returned no text".to_string()),
            Ok(Err(e)) => PdfError::TextExtraction(e.to_string()),
            Err(payload) => PdfError::Panicked(panic_message(payload.as_ref())),
        };

        warn!("pdf-extract failed ({}), falling back to per-page text", primary);
        self.extract_text_by_pages().map_err(|fallback| {
            debug!("Per-page fallback failed too: {}", fallback);
            primary
        })
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::TextExtraction(format!("invalid page number: {}", page)));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "malformed PDF".to_string()
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
    fn test_load_rejects_non_pdf_bytes() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();

        assert!(matches!(err, PdfError::Parse(_)));
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_extract_before_load_fails() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
        assert!(extractor.extract_page_text(1).is_err());
    }

    #[test]
    fn test_panic_message_downcast() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "malformed PDF");
    }
}
