//! Ordered fallback chains.
//!
//! A chain is an explicit list of `(priority, rule)` entries for one field.
//! Entries are tried in ascending priority (insertion order breaks ties) and
//! the first entry yielding a non-empty value wins.

use regex::Regex;
use tracing::{debug, trace};

use super::{ExtractionMatch, FieldExtractor};
use crate::models::booking::BookingField;
use crate::text::NormalizedText;

/// Where and how a chain entry looks for its value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Capture group 1 of the first match in the full text.
    Text(&'static Regex),
    /// Capture group 1 of the first match in the last `lines` lines, joined
    /// with newlines so a value token cannot run into the next line.
    Tail { lines: usize, pattern: &'static Regex },
    /// Only the first line matching `select` is considered; its value is
    /// capture group 1 of `capture` on that line. Later lines are never
    /// tried, even when the first candidate has no value.
    FirstLine {
        select: &'static Regex,
        capture: &'static Regex,
    },
}

impl Rule {
    fn apply(&self, doc: &NormalizedText) -> Option<(String, String)> {
        match self {
            Rule::Text(pattern) => capture(pattern, doc.text()),
            Rule::Tail { lines, pattern } => {
                let window = doc.tail(*lines).join("\n");
                capture(pattern, &window)
            }
            Rule::FirstLine { select, capture: value } => {
                let line = doc.lines().iter().find(|l| select.is_match(l))?;
                trace!("First candidate line: {:?}", line);
                capture(value, line)
            }
        }
    }
}

fn capture(pattern: &Regex, haystack: &str) -> Option<(String, String)> {
    let caps = pattern.captures(haystack)?;
    let value = caps.get(1)?.as_str().to_string();
    let source = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
    Some((value, source))
}

/// One prioritized entry of a chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainEntry {
    /// Lower runs first.
    pub priority: u8,
    /// Name used in logs and in [`ExtractionMatch::rule`].
    pub label: &'static str,
    pub rule: Rule,
}

/// Ordered fallback chain for a single field.
#[derive(Debug, Clone)]
pub struct RuleChain {
    field: BookingField,
    entries: Vec<ChainEntry>,
    strip_punctuation: bool,
}

impl RuleChain {
    /// Create an empty chain whose values are only trimmed of whitespace.
    pub fn new(field: BookingField) -> Self {
        Self {
            field,
            entries: Vec::new(),
            strip_punctuation: false,
        }
    }

    /// Also strip leading punctuation from resolved values.
    pub fn strip_leading_punctuation(mut self) -> Self {
        self.strip_punctuation = true;
        self
    }

    /// Add an entry, keeping the chain sorted by priority.
    pub fn with(mut self, priority: u8, label: &'static str, rule: Rule) -> Self {
        let at = self
            .entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, ChainEntry { priority, label, rule });
        self
    }

    /// Field this chain resolves.
    pub fn field(&self) -> BookingField {
        self.field
    }

    /// Entry labels in evaluation order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.label).collect()
    }

    /// Evaluate entries top-down; the first non-empty value wins.
    pub fn resolve(&self, doc: &NormalizedText) -> Option<ExtractionMatch<String>> {
        for entry in &self.entries {
            let Some((raw, source)) = entry.rule.apply(doc) else {
                trace!("{}: rule {} did not match", self.field, entry.label);
                continue;
            };

            let value = if self.strip_punctuation {
                clean_value(&raw)
            } else {
                raw.trim().to_string()
            };

            if value.is_empty() {
                trace!("{}: rule {} matched an empty value", self.field, entry.label);
                continue;
            }

            debug!("{}: resolved by rule {}", self.field, entry.label);
            return Some(ExtractionMatch::new(value, entry.label, source));
        }
        None
    }
}

impl FieldExtractor for RuleChain {
    type Output = ExtractionMatch<String>;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        self.resolve(doc)
    }
}

/// Trim whitespace and leading punctuation.
pub fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .trim()
        .to_string()
}
