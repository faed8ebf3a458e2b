//! Booking parser: runs every rule against one document.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::booking::{BookingField, FieldMapping};
use crate::models::config::{ExtractionConfig, PdfConfig, ReservaConfig};
use crate::pdf::{PdfProcessor, Result};
use crate::text::NormalizedText;

use super::rules::patterns::{CANCELLATION, NEW_RESERVATION};
use super::rules::{
    passenger_count_chain, service_code_chain, AgeExtractor, ContactExtractor, ExtractionMatch,
    FieldExtractor, HotelExtractor, LabeledFieldExtractor, ReferenceNameExtractor, RuleChain,
};

/// Reservation type for a new booking.
pub const NEW_RESERVATION_TYPE: &str = "NUEVA RESERVA";

/// Reservation type for a cancellation.
pub const CANCELLATION_TYPE: &str = "CANCELACIÓN";

/// Rule label for the client name, which has no chain of its own.
const NAME_WINDOW_RULE: &str = "ref-window";

/// The rule that filled one field and the text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub field: BookingField,
    pub rule: &'static str,
    pub source: String,
}

/// Result of parsing one document.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Extracted record.
    pub mapping: FieldMapping,
    /// Which rule produced each non-empty fixed field, in evaluation order.
    pub rules: Vec<RuleHit>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Booking parser.
///
/// Holds only immutable compiled rules, so one parser can be shared across
/// threads and reused for any number of documents.
pub struct BookingParser {
    pdf: PdfConfig,
    age_prefix: String,
    name: ReferenceNameExtractor,
    labeled: LabeledFieldExtractor,
    hotel: HotelExtractor,
    passengers: RuleChain,
    service_code: RuleChain,
    contact: ContactExtractor,
    ages: AgeExtractor,
}

impl BookingParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ReservaConfig::default())
    }

    pub fn from_config(config: &ReservaConfig) -> Self {
        Self::with_extraction(&config.extraction).with_pdf_config(config.pdf.clone())
    }

    /// Create a parser with the given extraction settings and default PDF settings.
    pub fn with_extraction(config: &ExtractionConfig) -> Self {
        Self {
            pdf: PdfConfig::default(),
            age_prefix: config.age_column_prefix.clone(),
            name: ReferenceNameExtractor::from_config(config),
            labeled: LabeledFieldExtractor::new(),
            hotel: HotelExtractor::with_tail_lines(config.hotel_tail_lines),
            passengers: passenger_count_chain(),
            service_code: service_code_chain(),
            contact: ContactExtractor::with_tail_lines(config.contact_tail_lines),
            ages: AgeExtractor::from_config(config),
        }
    }

    /// Set the text normalization settings used by [`parse_document`](Self::parse_document).
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    /// Load one document into `processor` and extract its record.
    ///
    /// Only load and text extraction can fail; once text is available every
    /// field is best-effort and the record is always complete.
    pub fn parse_document<P: PdfProcessor + ?Sized>(
        &self,
        processor: &mut P,
        data: &[u8],
    ) -> Result<FieldMapping> {
        let doc = NormalizedText::from_document(processor, data, &self.pdf)?;
        Ok(self.parse_text(&doc))
    }

    /// Extract a record from already normalized text.
    pub fn parse_text(&self, doc: &NormalizedText) -> FieldMapping {
        self.parse_detailed(doc).mapping
    }

    /// Extract a record and report which rule filled each field.
    pub fn parse_detailed(&self, doc: &NormalizedText) -> ParseResult {
        let start = Instant::now();
        let mut mapping = FieldMapping::new(self.age_prefix.as_str());
        let mut rules = Vec::new();

        info!(
            "Parsing booking from {} characters ({} lines)",
            doc.text().len(),
            doc.lines().len()
        );

        let mut record = |field: BookingField, m: ExtractionMatch<String>| {
            mapping.set(field, &m.value);
            rules.push(RuleHit {
                field,
                rule: m.rule,
                source: m.source,
            });
        };

        if let Some(kind) = reservation_type(doc.text()) {
            let m = ExtractionMatch::new(kind.to_string(), "reservation-type", kind);
            record(BookingField::ReservationType, m);
        }

        if let Some(found) = self.name.extract(doc) {
            let anchor = doc.lines().get(found.line).map(String::as_str).unwrap_or_default();
            record(
                BookingField::Reference,
                ExtractionMatch::new(found.reference, "ref-anchor", anchor),
            );
            if !found.name.is_empty() {
                record(
                    BookingField::ClientName,
                    ExtractionMatch::new(found.name, NAME_WINDOW_RULE, anchor),
                );
            }
        }

        for (field, m) in self.labeled.extract(doc).unwrap_or_default() {
            record(field, m);
        }

        if let Some(m) = self.hotel.extract(doc) {
            record(BookingField::Hotel, m);
        }
        if let Some(m) = self.passengers.extract(doc) {
            record(BookingField::TotalPassengers, m);
        }
        if let Some(m) = self.service_code.extract(doc) {
            record(BookingField::ServiceCode, m);
        }

        if let Some(m) = self.contact.extract(doc) {
            record(BookingField::ContactPhone, m);
        }

        for age in self.ages.extract(doc).unwrap_or_default() {
            mapping.push_age(age);
        }

        debug!(
            "Booking {:?}: {} field(s), {} age(s)",
            mapping.get(BookingField::Reference),
            rules.len(),
            mapping.ages().len()
        );

        ParseResult {
            mapping,
            rules,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for BookingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// "NUEVA RESERVA" or "CANCELACIÓN", whichever phrase the text carries first
/// in that order of preference.
pub fn reservation_type(text: &str) -> Option<&'static str> {
    if NEW_RESERVATION.is_match(text) {
        Some(NEW_RESERVATION_TYPE)
    } else if CANCELLATION.is_match(text) {
        Some(CANCELLATION_TYPE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
ARRAMPICATA
NUEVA RESERVA
GARCÍA LÓPEZ
Ref 123-4567
MARÍA
Fecha creación 02-ENE.-25
Total pasajeros: 2 Pax (2 adultos)
Fecha Servicio 15-FEB.-25
Servicio MADTOUR01
Desc. Servicio Visita al Museo del Prado
Modalidad: GRP
Desc. Modalidad Grupo reducido
Idioma ES
Horario 10:30
Edad
34 56
Número confirmación 998877
Por favor indique en qué hotel está vd. alojado. - Hotel Gran Vía
llamar al numero internacional 0034911234567 en caso de urgencia
";

    fn parse(text: &str) -> FieldMapping {
        BookingParser::new().parse_text(&NormalizedText::new(text, None))
    }

    #[test]
    fn test_full_booking() {
        let mapping = parse(SAMPLE);

        assert_eq!(mapping.get(BookingField::ReservationType), "NUEVA RESERVA");
        assert_eq!(mapping.get(BookingField::Reference), "123-4567");
        assert_eq!(mapping.get(BookingField::ClientName), "GARCÍA LÓPEZ MARÍA");
        assert_eq!(mapping.get(BookingField::CreationDate), "02-ENE.-25");
        assert_eq!(mapping.get(BookingField::TotalPassengers), "2 Pax (2 adultos)");
        assert_eq!(mapping.get(BookingField::ServiceDate), "15-FEB.-25");
        assert_eq!(mapping.get(BookingField::ServiceCode), "MADTOUR01");
        assert_eq!(
            mapping.get(BookingField::ServiceDescription),
            "Visita al Museo del Prado"
        );
        assert_eq!(mapping.get(BookingField::ModalityCode), "GRP");
        assert_eq!(mapping.get(BookingField::ModalityDescription), "Grupo reducido");
        assert_eq!(mapping.get(BookingField::Language), "ES");
        assert_eq!(mapping.get(BookingField::Schedule), "10:30");
        assert_eq!(mapping.get(BookingField::Hotel), "Hotel Gran Vía");
        assert_eq!(mapping.get(BookingField::ContactPhone), "+34911234567");
        assert_eq!(mapping.ages(), ["34", "56"]);
    }

    #[test]
    fn test_empty_text_gives_complete_empty_record() {
        let mapping = parse("");
        assert_eq!(mapping.columns().len(), BookingField::ALL.len());
        assert!(BookingField::ALL.iter().all(|f| mapping.get(*f).is_empty()));
        assert!(mapping.ages().is_empty());
    }

    #[test]
    fn test_rules_reported_in_evaluation_order() {
        let result = BookingParser::new().parse_detailed(&NormalizedText::new(SAMPLE, None));
        let fields: Vec<BookingField> = result.rules.iter().map(|hit| hit.field).collect();

        assert_eq!(fields[0], BookingField::ReservationType);
        assert_eq!(fields[1], BookingField::Reference);
        assert_eq!(fields.last(), Some(&BookingField::ContactPhone));
        let hotel = result
            .rules
            .iter()
            .find(|hit| hit.field == BookingField::Hotel)
            .unwrap();
        assert_eq!(hotel.rule, "es-indique-hotel");
        assert!(hotel.source.contains("alojado"));
    }

    #[test]
    fn test_rule_sources_point_at_matched_text() {
        let result = BookingParser::new().parse_detailed(&NormalizedText::new(SAMPLE, None));
        let source = |field: BookingField| {
            result
                .rules
                .iter()
                .find(|hit| hit.field == field)
                .map(|hit| hit.source.as_str())
        };

        assert_eq!(source(BookingField::Reference), Some("Ref 123-4567"));
        assert_eq!(source(BookingField::ClientName), Some("Ref 123-4567"));
        assert_eq!(source(BookingField::ServiceCode), Some("Servicio MADTOUR01"));
        assert_eq!(source(BookingField::ReservationType), Some("NUEVA RESERVA"));
    }

    #[test]
    fn test_reservation_type() {
        assert_eq!(reservation_type("xx NUEVA  RESERVA"), Some(NEW_RESERVATION_TYPE));
        assert_eq!(reservation_type("CANCELACION de reserva"), Some(CANCELLATION_TYPE));
        assert_eq!(reservation_type("CANCELACIÓN"), Some(CANCELLATION_TYPE));
        assert_eq!(reservation_type("Reserva"), None);
    }

    #[test]
    fn test_custom_age_prefix() {
        let config = ExtractionConfig {
            age_column_prefix: "Edad".to_string(),
            ..ExtractionConfig::default()
        };
        let parser = BookingParser::with_extraction(&config);
        let mapping = parser.parse_text(&NormalizedText::new("Edad\n40\nIdioma EN", None));

        assert_eq!(mapping.get_by_name("Edad 1"), Some("40"));
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BookingParser>();
    }
}
