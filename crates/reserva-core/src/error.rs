//! Error types for the reserva-core library.

use thiserror::Error;

/// Main error type for the reserva library.
#[derive(Error, Debug)]
pub enum ReservaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field lookup error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning document bytes into text.
///
/// Every variant is fatal to the single document being read and to nothing else.
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

    /// The text backend panicked on malformed input.
    #[error("text extraction panicked: {0}")]
    Panicked(String),
}

/// Errors related to addressing extracted fields.
///
/// Extraction itself never fails: a rule without a match yields an empty value.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field name is not part of the fixed field set.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for the reserva library.
pub type Result<T> = std::result::Result<T, ReservaError>;
