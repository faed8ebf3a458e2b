//! Labeled fields: a label token, optional separator and a shaped value.

use super::chain::{Rule, RuleChain};
use super::patterns::{
    CREATION_DATE, KNOWN_LABEL, LANGUAGE, MODALITY_CODE, MODALITY_DESCRIPTION, SCHEDULE,
    SERVICE_DATE, SERVICE_DESCRIPTION,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::booking::BookingField;
use crate::text::NormalizedText;

/// Single-pattern chains for every labeled field, in evaluation order.
///
/// The service code is not listed here: it has its own fallback chain
/// (see [`super::lines::service_code_chain`]).
pub fn labeled_chains() -> Vec<RuleChain> {
    [
        (BookingField::CreationDate, "fecha-creacion", &*CREATION_DATE),
        (BookingField::ServiceDate, "fecha-servicio", &*SERVICE_DATE),
        (BookingField::ServiceDescription, "desc-servicio", &*SERVICE_DESCRIPTION),
        (BookingField::ModalityCode, "modalidad", &*MODALITY_CODE),
        (BookingField::ModalityDescription, "desc-modalidad", &*MODALITY_DESCRIPTION),
        (BookingField::Language, "idioma", &*LANGUAGE),
        (BookingField::Schedule, "horario", &*SCHEDULE),
    ]
    .into_iter()
    .map(|(field, label, pattern)| RuleChain::new(field).with(0, label, Rule::Text(pattern)))
    .collect()
}

/// Free-text fields end at the next known label on the same line.
fn is_free_text(field: BookingField) -> bool {
    matches!(
        field,
        BookingField::ServiceDescription | BookingField::ModalityDescription
    )
}

/// Cut a free-text value where the next known label starts.
pub fn truncate_at_label(value: &str) -> &str {
    match KNOWN_LABEL.find(value) {
        Some(m) => value[..m.start()].trim(),
        None => value.trim(),
    }
}

/// Extractor for all labeled fields.
///
/// Every rule is evaluated independently; a miss in one never affects another.
pub struct LabeledFieldExtractor {
    chains: Vec<RuleChain>,
}

impl LabeledFieldExtractor {
    pub fn new() -> Self {
        Self {
            chains: labeled_chains(),
        }
    }
}

impl Default for LabeledFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LabeledFieldExtractor {
    type Output = Vec<(BookingField, ExtractionMatch<String>)>;

    fn extract(&self, doc: &NormalizedText) -> Option<Self::Output> {
        let found: Vec<_> = self
            .chains
            .iter()
            .filter_map(|chain| {
                let field = chain.field();
                let m = chain.resolve(doc)?;
                if !is_free_text(field) {
                    return Some((field, m));
                }

                let cut = truncate_at_label(&m.value).to_string();
                (!cut.is_empty()).then(|| (field, m.map(|_| cut)))
            })
            .collect();

        (!found.is_empty()).then_some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Vec<(BookingField, String)> {
        LabeledFieldExtractor::new()
            .extract(&NormalizedText::new(text, None))
            .unwrap_or_default()
            .into_iter()
            .map(|(f, m)| (f, m.value))
            .collect()
    }

    fn value(text: &str, field: BookingField) -> Option<String> {
        extract(text).into_iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    #[test]
    fn test_dates() {
        let text = "Fecha creación: 02-ENE.-25\nFecha Servicio 15-FEB.-25\n";
        assert_eq!(value(text, BookingField::CreationDate).as_deref(), Some("02-ENE.-25"));
        assert_eq!(value(text, BookingField::ServiceDate).as_deref(), Some("15-FEB.-25"));
    }

    #[test]
    fn test_label_is_case_insensitive() {
        let text = "FECHA CREACION - 02-ENE.-25\nhorario (10:30)\n";
        assert_eq!(value(text, BookingField::CreationDate).as_deref(), Some("02-ENE.-25"));
        assert_eq!(value(text, BookingField::Schedule).as_deref(), Some("10:30"));
    }

    #[test]
    fn test_codes_and_language() {
        let text = "Modalidad: GRP\nDesc. Modalidad Grupo reducido\nIdioma ES\n";
        assert_eq!(value(text, BookingField::ModalityCode).as_deref(), Some("GRP"));
        assert_eq!(
            value(text, BookingField::ModalityDescription).as_deref(),
            Some("Grupo reducido")
        );
        assert_eq!(value(text, BookingField::Language).as_deref(), Some("ES"));
    }

    #[test]
    fn test_modality_label_inside_line() {
        let text = "Servicio MADTOUR01 Modalidad GRP Idioma ES\n";
        assert_eq!(value(text, BookingField::ModalityCode).as_deref(), Some("GRP"));
        assert_eq!(value(text, BookingField::Language).as_deref(), Some("ES"));
    }

    #[test]
    fn test_modality_code_after_description_on_same_line() {
        let text = "Desc. Modalidad Tour privado Modalidad PRV\n";
        assert_eq!(value(text, BookingField::ModalityCode).as_deref(), Some("PRV"));
    }

    #[test]
    fn test_description_line_is_not_a_code() {
        let text = "Desc. Modalidad Tour privado\n";
        assert_eq!(value(text, BookingField::ModalityCode), None);
    }

    #[test]
    fn test_free_text_stops_at_next_label() {
        let text = "Desc. Servicio Visita al Museo del Prado Idioma ES\n";
        assert_eq!(
            value(text, BookingField::ServiceDescription).as_deref(),
            Some("Visita al Museo del Prado")
        );
    }

    #[test]
    fn test_free_text_may_contain_servicio() {
        let text = "Desc. Servicio Servicio de traslado al aeropuerto\n";
        assert_eq!(
            value(text, BookingField::ServiceDescription).as_deref(),
            Some("Servicio de traslado al aeropuerto")
        );
    }

    #[test]
    fn test_misses_are_independent() {
        let found = extract("Horario 09:15\n");
        assert_eq!(found, vec![(BookingField::Schedule, "09:15".to_string())]);
    }

    #[test]
    fn test_nothing_found() {
        assert!(extract("nada que ver aquí").is_empty());
    }
}
