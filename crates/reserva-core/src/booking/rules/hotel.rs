//! Hotel resolution.
//!
//! Forms ask for the hotel in several languages depending on revision. The
//! known phrasings are tried in a fixed order; when none is present the last
//! few lines are scanned bottom-up for the word "hotel".

use tracing::debug;

use super::chain::{Rule, RuleChain};
use super::patterns::{HOTEL_EN, HOTEL_ES, HOTEL_PT, HOTEL_STAYING, HOTEL_WORD};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::booking::BookingField;
use crate::models::config::DEFAULT_HOTEL_TAIL_LINES;
use crate::text::NormalizedText;

/// Label reported when the tail scan found the hotel.
pub const TAIL_SCAN_RULE: &str = "tail-scan";

/// Hotel extractor: phrase chain, then tail scan.
pub struct HotelExtractor {
    chain: RuleChain,
    tail_lines: usize,
}

impl HotelExtractor {
    pub fn new() -> Self {
        Self::with_tail_lines(DEFAULT_HOTEL_TAIL_LINES)
    }

    /// Use a different tail-scan window.
    pub fn with_tail_lines(tail_lines: usize) -> Self {
        let chain = RuleChain::new(BookingField::Hotel)
            .strip_leading_punctuation()
            .with(10, "es-indique-hotel", Rule::Text(&HOTEL_ES))
            .with(20, "pt-hospedado", Rule::Text(&HOTEL_PT))
            .with(30, "alojado", Rule::Text(&HOTEL_STAYING))
            .with(40, "en-advise-hotel", Rule::Text(&HOTEL_EN));
        Self { chain, tail_lines }
    }

    /// Scan the last lines bottom-up for "hotel" and title-case what follows.
    fn scan_tail(&self, doc: &NormalizedText) -> Option<ExtractionMatch<String>> {
        doc.tail(self.tail_lines).iter().rev().find_map(|line| {
            let m = HOTEL_WORD.find(line)?;
            let rest = line[m.end()..]
                .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
            if rest.is_empty() {
                return None;
            }
            Some(ExtractionMatch::new(title_case(rest), TAIL_SCAN_RULE, line.as_str()))
        })
    }
}

impl Default for HotelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for HotelExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        self.chain.resolve(doc).or_else(|| {
            let found = self.scan_tail(doc);
            if found.is_some() {
                debug!("{}: resolved by rule {}", BookingField::Hotel, TAIL_SCAN_RULE);
            }
            found
        })
    }
}

/// Uppercase the first letter of every word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
