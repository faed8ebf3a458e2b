//! Document text normalization.
//!
//! Turns a loaded document into one ordered text blob plus a line-indexed
//! view. Both are derived once per document and never change afterwards.

use tracing::debug;

use crate::models::config::PdfConfig;
use crate::pdf::{PdfProcessor, Result};

/// Full text of a document and its lines, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    lines: Vec<String>,
}

impl NormalizedText {
    /// Build from already-extracted text.
    ///
    /// Lines are split from the complete text. When `noise_marker` is set and
    /// present, the full text (not the line view) is cut at its first
    /// occurrence so that free-text remarks cannot feed the text-wide patterns.
    pub fn new(text: impl Into<String>, noise_marker: Option<&str>) -> Self {
        let mut text = text.into();
        let lines = text.lines().map(str::to_string).collect();

        if let Some(marker) = noise_marker.filter(|m| !m.is_empty()) {
            if let Some(pos) = text.find(marker) {
                debug!("Truncating text at noise marker {:?} (offset {})", marker, pos);
                text.truncate(pos);
            }
        }

        Self { text, lines }
    }

    /// Build from page texts, joined in page order.
    pub fn from_pages<S: AsRef<str>>(pages: &[S], config: &PdfConfig) -> Self {
        let joined = pages
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(&config.page_separator);
        Self::new(joined, config.noise_marker.as_deref())
    }

    /// Load `data` into `processor` and normalize its text.
    ///
    /// Any load or extraction failure is returned as-is; no partial text is
    /// produced.
    pub fn from_document<P: PdfProcessor + ?Sized>(
        processor: &mut P,
        data: &[u8],
        config: &PdfConfig,
    ) -> Result<Self> {
        processor.load(data)?;
        let text = processor.extract_text()?;
        debug!(
            "Extracted {} chars from {} pages",
            text.len(),
            processor.page_count()
        );
        Ok(Self::new(text, config.noise_marker.as_deref()))
    }

    /// The full (possibly truncated) text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every line of the document, untruncated.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The last `n` lines (fewer when the document is shorter).
    pub fn tail(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }
}
