//! International contact phone from the document footer.

use super::chain::{Rule, RuleChain};
use super::patterns::{CONTACT_INCLUDED, CONTACT_INTERNATIONAL};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::booking::BookingField;
use crate::models::config::DEFAULT_CONTACT_TAIL_LINES;
use crate::text::NormalizedText;

/// Contact phone extractor working on the last lines of the document.
pub struct ContactExtractor {
    chain: RuleChain,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self::with_tail_lines(DEFAULT_CONTACT_TAIL_LINES)
    }

    /// Search a different number of trailing lines.
    pub fn with_tail_lines(lines: usize) -> Self {
        let chain = RuleChain::new(BookingField::ContactPhone)
            .with(
                10,
                "included-international",
                Rule::Tail {
                    lines,
                    pattern: &CONTACT_INCLUDED,
                },
            )
            .with(
                20,
                "international",
                Rule::Tail {
                    lines,
                    pattern: &CONTACT_INTERNATIONAL,
                },
            );
        Self { chain }
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContactExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        self.chain
            .resolve(doc)
            .map(|m| m.map(|raw| normalize_phone(&raw)))
    }
}

/// Drop spaces and hyphens; a leading `00` becomes `+`.
pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    match compact.strip_prefix("00") {
        Some(rest) => format!("+{}", rest),
        None => compact,
    }
}
