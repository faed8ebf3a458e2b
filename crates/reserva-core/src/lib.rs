//! Core library for booking-confirmation PDF extraction.
//!
//! This crate provides:
//! - PDF text extraction (lopdf with a pdf-extract fast path)
//! - Text normalization into a full-text and line-indexed view
//! - Rule-based booking field extraction (reference, client name, labeled
//!   fields, hotel and contact fallback chains, passenger ages)
//! - Batch processing with per-document failure diagnostics
//! - CSV export of the resulting table

pub mod booking;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod text;

pub use booking::{BatchDriver, BatchReport, BookingParser, Document, ParseResult, RuleHit};
pub use error::{ExtractionError, PdfError, ReservaError, Result};
pub use models::booking::{BatchDiagnostic, BookingField, FieldMapping, ResultTable};
pub use models::config::ReservaConfig;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use text::NormalizedText;
