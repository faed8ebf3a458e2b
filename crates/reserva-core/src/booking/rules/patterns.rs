//! Common regex patterns for booking-document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Reference anchor: "Ref 123-4567" / "Ref 1234-5"
    pub static ref REFERENCE_ANCHOR: Regex = Regex::new(
        r"Ref\s+(\d{3,4}-\d+)"
    ).unwrap();

    // Client name lines: letters (accented uppercase tolerated) and spaces only
    pub static ref NAME_SHAPE: Regex = Regex::new(
        r"^[A-Za-zÁÉÍÓÚÜÑ\s]+$"
    ).unwrap();

    // Reservation type markers
    pub static ref NEW_RESERVATION: Regex = Regex::new(
        r"NUEVA\s+RESERVA"
    ).unwrap();

    pub static ref CANCELLATION: Regex = Regex::new(
        r"CANCELACI[ÓO]N"
    ).unwrap();

    // Labeled fields
    pub static ref CREATION_DATE: Regex = Regex::new(
        r"(?i)Fecha\s+creaci[óo]n\s*[:\-()]*\s*(\d{2}-[A-Z]{3}\.-\d{2})"
    ).unwrap();

    pub static ref SERVICE_DATE: Regex = Regex::new(
        r"(?i)Fecha\s+servicio\s*[:\-()]*\s*(\d{2}-[A-Z]{3}\.-\d{2})"
    ).unwrap();

    pub static ref SERVICE_DESCRIPTION: Regex = Regex::new(
        r"(?i)Desc\.\s*Servicio\s*[:\-()]*\s*([^\n]*)"
    ).unwrap();

    // Anywhere in a line, but not as part of "Desc. Modalidad"
    pub static ref MODALITY_CODE: Regex = Regex::new(
        r"(?im)(?:^|[^.\s])[ \t]*\bModalidad[ \t]*[:\-()]*[ \t]*((?-i:[A-Z0-9]+))\b"
    ).unwrap();

    pub static ref MODALITY_DESCRIPTION: Regex = Regex::new(
        r"(?i)Desc\.\s*Modalidad\s*[:\-()]*\s*([^\n]*)"
    ).unwrap();

    pub static ref LANGUAGE: Regex = Regex::new(
        r"(?i)Idioma\s*[:\-()]*\s*((?-i:[A-Z]{2,3}))\b"
    ).unwrap();

    pub static ref SCHEDULE: Regex = Regex::new(
        r"(?i)Horario\s*[:\-()]*\s*(\d{2}:\d{2})"
    ).unwrap();

    // Labels that end a free-text value. Bare "Servicio"/"Modalidad" are
    // left out: they occur inside descriptions.
    pub static ref KNOWN_LABEL: Regex = Regex::new(
        r"(?i)Fecha\s+creaci[óo]n|Fecha\s+servicio|Desc\.\s*Servicio|Desc\.\s*Modalidad|Total\s+pasajeros|N[úu]mero\s+confirmaci[óo]n|\bIdioma\b|\bHorario\b|\bEdad\b|\bObservaciones\b"
    ).unwrap();

    // Line-scan fields
    pub static ref TOTAL_PASSENGERS_LABEL: Regex = Regex::new(
        r"(?i)Total\s+pasajeros"
    ).unwrap();

    pub static ref TOTAL_PASSENGERS_VALUE: Regex = Regex::new(
        r"(?i)Total\s+pasajeros\s*[:\-]?\s*(\d+\s*Pax\b.*)$"
    ).unwrap();

    pub static ref SERVICE_LINE: Regex = Regex::new(
        r"^\s*Servicio\b"
    ).unwrap();

    pub static ref SERVICE_LINE_CODE: Regex = Regex::new(
        r"^\s*Servicio\s*[:\-()]*\s*([A-Za-z0-9]{6,})\b"
    ).unwrap();

    // Hotel phrasings, in priority order
    pub static ref HOTEL_ES: Regex = Regex::new(
        r"(?i)hotel\s+est[áa]\s+(?:vd\.?|usted)\s+alojad[oa]\.?\s*[-:]?\s*([^\n]+)"
    ).unwrap();

    pub static ref HOTEL_PT: Regex = Regex::new(
        r"(?i)hotel\s+(?:est[áa]|se\s+encontra)\s+(?:vd\.?|voc[êe]\s+)?\s*hospedad[oa]\.?\s*[-:]?\s*([^\n]+)"
    ).unwrap();

    pub static ref HOTEL_STAYING: Regex = Regex::new(
        r"(?i)\balojad[oa]\.?\s*[-:]?\s*([^\n]+)"
    ).unwrap();

    pub static ref HOTEL_EN: Regex = Regex::new(
        r"(?i)advise\s+(?:the\s+)?name\s+of\s+(?:the\s+|your\s+)?hotel\b(?:[ \t]+where\s+you\s+(?:are|will\s+be)\s+staying)?[ \t]*[:\-]?[ \t]*([^\n]+)"
    ).unwrap();

    pub static ref HOTEL_WORD: Regex = Regex::new(
        r"(?i)\bhotel\b"
    ).unwrap();

    // Contact phone, in priority order. The phrase may span lines; the
    // number may not.
    pub static ref CONTACT_INCLUDED: Regex = Regex::new(
        r"(?is)\binclu(?:id[oa]s?|yendo|ding|ded|indo)\b.*?\binterna[ct]ional\w*\D*?([+\d][\d \-]{6,})"
    ).unwrap();

    pub static ref CONTACT_INTERNATIONAL: Regex = Regex::new(
        r"(?i)\binterna[ct]ional\w*\D*?([+\d][\d \-]{6,})"
    ).unwrap();

    // Age section
    pub static ref AGE_SECTION_START: Regex = Regex::new(
        r"\bEdad\b"
    ).unwrap();

    pub static ref AGE_VALUE: Regex = Regex::new(
        r"\b\d{1,3}\b"
    ).unwrap();
}
