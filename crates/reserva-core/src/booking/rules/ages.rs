//! Passenger ages from the "Edad" section.
//!
//! The section has no end marker of its own: it runs from the "Edad" line
//! until the first line carrying one of the stop phrases. Once stopped the
//! scan never resumes.

use tracing::{debug, trace};

use super::patterns::{AGE_SECTION_START, AGE_VALUE};
use super::FieldExtractor;
use crate::models::config::ExtractionConfig;
use crate::text::NormalizedText;

/// State of a [`SectionScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// Start marker not seen yet.
    Idle,
    /// Accumulating section lines.
    Capturing,
    /// A stop phrase was seen. Terminal.
    Stopped,
}

/// Two-state section scanner with a terminal stop state.
#[derive(Debug, Clone)]
pub struct SectionScanner<'a> {
    stop_phrases: &'a [String],
    state: SectionState,
    buffer: Vec<String>,
}

impl<'a> SectionScanner<'a> {
    pub fn new(stop_phrases: &'a [String]) -> Self {
        Self {
            stop_phrases,
            state: SectionState::Idle,
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Feed the next line and return the resulting state.
    pub fn feed(&mut self, line: &str) -> SectionState {
        self.state = match self.state {
            SectionState::Idle if AGE_SECTION_START.is_match(line) => {
                trace!("Age section starts at {:?}", line);
                SectionState::Capturing
            }
            SectionState::Idle => SectionState::Idle,
            SectionState::Capturing if self.is_stop(line) => {
                trace!("Age section stops at {:?}", line);
                SectionState::Stopped
            }
            SectionState::Capturing => {
                self.buffer.push(line.trim().to_string());
                SectionState::Capturing
            }
            SectionState::Stopped => SectionState::Stopped,
        };
        self.state
    }

    fn is_stop(&self, line: &str) -> bool {
        self.stop_phrases.iter().any(|p| line.contains(p.as_str()))
    }

    /// Accumulated section lines.
    pub fn captured(&self) -> &[String] {
        &self.buffer
    }

    /// Every standalone 1-3 digit number in the section, left to right.
    pub fn numbers(&self) -> Vec<String> {
        let joined = self.buffer.join(" ");
        AGE_VALUE
            .find_iter(&joined)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Extractor for the ordered list of passenger ages.
pub struct AgeExtractor {
    stop_phrases: Vec<String>,
}

impl AgeExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            stop_phrases: config.age_stop_phrases.clone(),
        }
    }
}

impl Default for AgeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AgeExtractor {
    type Output = Vec<String>;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        let mut scanner = SectionScanner::new(&self.stop_phrases);
        for line in doc.lines() {
            if scanner.feed(line) == SectionState::Stopped {
                break;
            }
        }

        let ages = scanner.numbers();
        debug!(
            "Age section: {} line(s), {} age(s)",
            scanner.captured().len(),
            ages.len()
        );
        (!ages.is_empty()).then_some(ages)
    }
}
