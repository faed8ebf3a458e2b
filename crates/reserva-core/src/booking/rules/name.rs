//! Reference number and client name.
//!
//! The client name carries no label. It sits in the lines around the first
//! "Ref <number>" anchor, written in capitals, so the extractor inspects a
//! symmetric window around that anchor and keeps the lines shaped like a name.

use tracing::{debug, trace};

use super::patterns::{NAME_SHAPE, REFERENCE_ANCHOR};
use super::FieldExtractor;
use crate::models::config::ExtractionConfig;
use crate::text::NormalizedText;

/// Reference found at the anchor, plus the name assembled around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Booking reference, e.g. "123-4567".
    pub reference: String,
    /// Client name; empty when no window line qualified.
    pub name: String,
    /// Index of the anchor line.
    pub line: usize,
}

/// Context-window matcher for the reference and client name.
pub struct ReferenceNameExtractor {
    radius: usize,
    min_length: usize,
    noise_tokens: Vec<String>,
}

impl ReferenceNameExtractor {
    /// Create an extractor with the default window and noise tokens.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            radius: config.name_window_radius,
            min_length: config.min_name_length,
            noise_tokens: config.noise_tokens.clone(),
        }
    }

    /// Whether a trimmed window line can be part of the client name.
    pub fn is_name_candidate(&self, line: &str) -> bool {
        line.chars().count() >= self.min_length
            && NAME_SHAPE.is_match(line)
            && !self.noise_tokens.iter().any(|t| line.contains(t.as_str()))
    }

    /// Window lines (trimmed) around `anchor`, clipped at the document bounds.
    fn window<'a>(&self, lines: &'a [String], anchor: usize) -> Vec<&'a str> {
        let start = anchor.saturating_sub(self.radius);
        let end = (anchor + self.radius + 1).min(lines.len());
        lines[start..end].iter().map(|l| l.trim()).collect()
    }
}

impl Default for ReferenceNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceNameExtractor {
    type Output = ReferenceMatch;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        let lines = doc.lines();

        // Only the first anchor in the document counts.
        let (index, reference) = lines.iter().enumerate().find_map(|(i, line)| {
            REFERENCE_ANCHOR
                .captures(line)
                .map(|caps| (i, caps[1].trim().to_string()))
        })?;

        let parts: Vec<&str> = self
            .window(lines, index)
            .into_iter()
            .filter(|candidate| {
                let keep = self.is_name_candidate(candidate);
                trace!("Name candidate {:?}: {}", candidate, keep);
                keep
            })
            .collect();

        debug!(
            "Reference {} at line {}, {} name line(s)",
            reference,
            index,
            parts.len()
        );

        Some(ReferenceMatch {
            reference,
            name: parts.join(" "),
            line: index,
        })
    }
}
