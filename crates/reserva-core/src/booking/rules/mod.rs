//! Rule-based field extractors for booking documents.

pub mod ages;
pub mod chain;
pub mod contact;
pub mod dates;
pub mod hotel;
pub mod labeled;
pub mod lines;
pub mod name;
pub mod patterns;

pub use ages::{AgeExtractor, SectionScanner, SectionState};
pub use chain::{clean_value, ChainEntry, Rule, RuleChain};
pub use contact::{normalize_phone, ContactExtractor};
pub use dates::parse_booking_date;
pub use hotel::{title_case, HotelExtractor};
pub use labeled::{labeled_chains, LabeledFieldExtractor};
pub use lines::{passenger_count_chain, service_code_chain};
pub use name::{ReferenceMatch, ReferenceNameExtractor};

use crate::text::NormalizedText;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a normalized document.
    ///
    /// `None` means the field was not found; that is never an error.
    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output>;
}

/// An extracted value and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Label of the rule that matched.
    pub rule: &'static str,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            source: source.into(),
        }
    }

    /// Transform the value, keeping rule and source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            source: self.source,
        }
    }
}
