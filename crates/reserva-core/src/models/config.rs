//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Lines scanned from the end of a document when no hotel phrasing matched.
///
/// Tuned against sample documents; revisit against the real corpus.
pub const DEFAULT_HOTEL_TAIL_LINES: usize = 6;

/// Lines from the end of a document searched for the contact phone.
///
/// Tuned against sample documents; revisit against the real corpus.
pub const DEFAULT_CONTACT_TAIL_LINES: usize = 15;

/// Lines inspected on each side of the reference anchor for the client name.
pub const DEFAULT_NAME_WINDOW_RADIUS: usize = 2;

/// Shortest line accepted as part of a client name.
pub const DEFAULT_MIN_NAME_LENGTH: usize = 5;

/// Prefix of the numbered age columns.
pub const DEFAULT_AGE_COLUMN_PREFIX: &str = "Age";

/// Main configuration for the reserva pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservaConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry encrypted documents with the empty user password.
    pub decrypt_empty_password: bool,

    /// Inserted between the text of consecutive pages.
    pub page_separator: String,

    /// Truncate the full text at the first occurrence of this marker.
    pub noise_marker: Option<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            page_separator: "\n".to_string(),
            noise_marker: None,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Trailing lines scanned by the hotel fallback.
    pub hotel_tail_lines: usize,

    /// Trailing lines searched for the contact phone.
    pub contact_tail_lines: usize,

    /// Lines before and after the reference line considered for the name.
    pub name_window_radius: usize,

    /// Minimum length of a client-name line.
    pub min_name_length: usize,

    /// Lines containing any of these tokens never become part of a name.
    pub noise_tokens: Vec<String>,

    /// Prefix of the numbered age columns.
    pub age_column_prefix: String,

    /// Phrases that end the age section.
    pub age_stop_phrases: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            hotel_tail_lines: DEFAULT_HOTEL_TAIL_LINES,
            contact_tail_lines: DEFAULT_CONTACT_TAIL_LINES,
            name_window_radius: DEFAULT_NAME_WINDOW_RADIUS,
            min_name_length: DEFAULT_MIN_NAME_LENGTH,
            noise_tokens: vec![
                "ARRAMPICATA".to_string(),
                "NUEVA".to_string(),
                "CANCELACI".to_string(),
            ],
            age_column_prefix: DEFAULT_AGE_COLUMN_PREFIX.to_string(),
            age_stop_phrases: vec![
                "Número confirmación".to_string(),
                "Total pasajeros".to_string(),
                "Horario".to_string(),
                "Modalidad".to_string(),
                "Idioma".to_string(),
                "Observaciones".to_string(),
            ],
        }
    }
}

impl ReservaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
