//! Batch driver: one extraction per document, failures contained per item.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::{info, warn};

use crate::error::PdfError;
use crate::models::booking::{BatchDiagnostic, FieldMapping, ResultTable};
use crate::pdf::{panic_message, PdfProcessor};

use super::parser::BookingParser;

/// Raw bytes of one document and the name used to report on it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Caller-supplied identifier; never parsed.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, named after its file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Everything a batch produced: the records and one diagnostic per failure.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub table: ResultTable,
    pub diagnostics: Vec<BatchDiagnostic>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document that failed before or during extraction.
    pub fn record_failure(&mut self, document: impl Into<String>, error: impl ToString) {
        let diagnostic = BatchDiagnostic {
            document: document.into(),
            error: error.to_string(),
        };
        warn!("Failed to process {}: {}", diagnostic.document, diagnostic.error);
        self.diagnostics.push(diagnostic);
    }

    /// Documents seen so far, successful or not.
    pub fn processed(&self) -> usize {
        self.table.len() + self.diagnostics.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Applies a [`BookingParser`] to many documents.
pub struct BatchDriver {
    parser: BookingParser,
}

impl BatchDriver {
    pub fn new(parser: BookingParser) -> Self {
        Self { parser }
    }

    /// Extract one document into `report`.
    ///
    /// On success the record is appended to the table and returned; on
    /// failure a diagnostic is recorded instead and `None` is returned.
    pub fn process<'r, P: PdfProcessor + ?Sized>(
        &self,
        processor: &mut P,
        document: &Document,
        report: &'r mut BatchReport,
    ) -> Option<&'r FieldMapping> {
        match self.extract(processor, document) {
            Ok(mapping) => {
                report.table.push(mapping);
                report.table.records().last()
            }
            Err(e) => {
                report.record_failure(document.name.as_str(), e);
                None
            }
        }
    }

    /// Extract every document in order. Never aborts on a single failure.
    pub fn run<P, I>(&self, processor: &mut P, documents: I) -> BatchReport
    where
        P: PdfProcessor + ?Sized,
        I: IntoIterator<Item = Document>,
    {
        let mut report = BatchReport::new();
        for document in documents {
            self.process(processor, &document, &mut report);
        }

        info!(
            "Batch finished: {} record(s), {} failure(s)",
            report.table.len(),
            report.diagnostics.len()
        );
        report
    }

    fn extract<P: PdfProcessor + ?Sized>(
        &self,
        processor: &mut P,
        document: &Document,
    ) -> Result<FieldMapping, PdfError> {
        // Backends may panic on malformed input; keep that inside this document.
        catch_unwind(AssertUnwindSafe(|| {
            self.parser.parse_document(processor, &document.bytes)
        }))
        .unwrap_or_else(|payload| Err(PdfError::Panicked(panic_message(payload.as_ref()))))
    }
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::new(BookingParser::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingField;
    use crate::pdf::Result;

    /// Treats the bytes as UTF-8 text; "BAD" fails to load, "BOOM" panics.
    #[derive(Default)]
    struct TextProcessor {
        text: Option<String>,
    }

    impl PdfProcessor for TextProcessor {
        fn load(&mut self, data: &[u8]) -> Result<()> {
            match data {
                b"BAD" => Err(PdfError::Parse("not a PDF".to_string())),
                b"BOOM" => panic!("backend exploded"),
                _ => {
                    self.text = Some(String::from_utf8_lossy(data).into_owned());
                    Ok(())
                }
            }
        }

        fn page_count(&self) -> u32 {
            1
        }

        fn extract_text(&self) -> Result<String> {
            self.text.clone().ok_or(PdfError::NoPages)
        }

        fn extract_page_text(&self, _page: u32) -> Result<String> {
            self.extract_text()
        }
    }

    #[test]
    fn test_failures_become_diagnostics() {
        let driver = BatchDriver::default();
        let mut processor = TextProcessor::default();
        let docs = vec![
            Document::new("a.pdf", "Ref 111-1"),
            Document::new("b.pdf", "BAD"),
            Document::new("c.pdf", "Ref 333-3"),
        ];

        let report = driver.run(&mut processor, docs);

        assert_eq!(report.table.len(), 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].document, "b.pdf");
        assert!(report.diagnostics[0].error.contains("not a PDF"));
        assert_eq!(report.table.records()[1].get(BookingField::Reference), "333-3");
        assert_eq!(report.processed(), 3);
    }

    #[test]
    fn test_panic_is_contained() {
        let driver = BatchDriver::default();
        let mut processor = TextProcessor::default();
        let docs = vec![Document::new("boom.pdf", "BOOM"), Document::new("ok.pdf", "Ref 123-4")];

        let report = driver.run(&mut processor, docs);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.diagnostics[0].document, "boom.pdf");
        assert!(report.diagnostics[0].error.contains("backend exploded"));
    }

    #[test]
    fn test_process_returns_appended_record() {
        let driver = BatchDriver::default();
        let mut processor = TextProcessor::default();
        let mut report = BatchReport::new();

        let record = driver.process(&mut processor, &Document::new("x", "Ref 555-5"), &mut report);
        assert_eq!(record.map(|r| r.get(BookingField::Reference)), Some("555-5"));
        assert!(driver
            .process(&mut processor, &Document::new("y", "BAD"), &mut report)
            .is_none());
        assert!(report.has_failures());
    }

    #[test]
    fn test_empty_batch() {
        let report = BatchDriver::default().run(&mut TextProcessor::default(), Vec::new());
        assert!(report.table.is_empty());
        assert!(report.diagnostics.is_empty());
    }
}
