//! Booking record models: the per-document field mapping and the batch table.

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// A fixed, always-present field of a booking record.
///
/// Declaration order is the export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    /// Reservation type ("NUEVA RESERVA", "CANCELACIÓN").
    ReservationType,
    /// Booking reference number (e.g. "123-4567").
    Reference,
    /// Client name assembled from the lines around the reference.
    ClientName,
    /// Booking creation date, verbatim (`DD-MMM.-YY`).
    CreationDate,
    /// Passenger count, verbatim ("2 Pax ...").
    TotalPassengers,
    /// Service date, verbatim (`DD-MMM.-YY`).
    ServiceDate,
    /// Free-text service description.
    ServiceDescription,
    /// Service code.
    ServiceCode,
    /// Modality code.
    ModalityCode,
    /// Free-text modality description.
    ModalityDescription,
    /// Language code (2-3 letters).
    Language,
    /// Schedule time (`HH:MM`).
    Schedule,
    /// Hotel the client is staying at.
    Hotel,
    /// International contact phone, normalized.
    ContactPhone,
}

impl BookingField {
    /// Every fixed field, in column order.
    pub const ALL: [BookingField; 14] = [
        BookingField::ReservationType,
        BookingField::Reference,
        BookingField::ClientName,
        BookingField::CreationDate,
        BookingField::TotalPassengers,
        BookingField::ServiceDate,
        BookingField::ServiceDescription,
        BookingField::ServiceCode,
        BookingField::ModalityCode,
        BookingField::ModalityDescription,
        BookingField::Language,
        BookingField::Schedule,
        BookingField::Hotel,
        BookingField::ContactPhone,
    ];

    /// Column name used in mappings and exports.
    pub fn name(&self) -> &'static str {
        match self {
            BookingField::ReservationType => "Tipo de Reserva",
            BookingField::Reference => "Número Ref",
            BookingField::ClientName => "Nombre Cliente",
            BookingField::CreationDate => "Fecha Creación",
            BookingField::TotalPassengers => "Total Pasajeros",
            BookingField::ServiceDate => "Fecha Servicio",
            BookingField::ServiceDescription => "Desc. Servicio",
            BookingField::ServiceCode => "Servicio",
            BookingField::ModalityCode => "Modalidad",
            BookingField::ModalityDescription => "Desc. Modalidad",
            BookingField::Language => "Idioma",
            BookingField::Schedule => "Horario",
            BookingField::Hotel => "Hotel",
            BookingField::ContactPhone => "Teléfono Contacto",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BookingField {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BookingField::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExtractionError::UnknownField(wanted.to_string()))
    }
}

/// Extracted values for one document.
///
/// Every fixed field is always present (possibly empty). Ages are exposed as
/// numbered columns (`"<prefix> 1"`, `"<prefix> 2"`, ...) in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    values: [String; BookingField::ALL.len()],
    ages: Vec<String>,
    age_prefix: String,
}

impl FieldMapping {
    /// Create a mapping with every fixed field empty.
    pub fn new(age_prefix: impl Into<String>) -> Self {
        Self {
            values: Default::default(),
            ages: Vec::new(),
            age_prefix: age_prefix.into(),
        }
    }

    /// Value of a fixed field (empty when nothing was found).
    pub fn get(&self, field: BookingField) -> &str {
        &self.values[field.index()]
    }

    /// Set a fixed field. The value is trimmed.
    pub fn set(&mut self, field: BookingField, value: impl AsRef<str>) {
        self.values[field.index()] = value.as_ref().trim().to_string();
    }

    /// Append the next numbered age.
    pub fn push_age(&mut self, age: impl Into<String>) {
        self.ages.push(age.into());
    }

    /// Ages in discovery order.
    pub fn ages(&self) -> &[String] {
        &self.ages
    }

    /// Prefix of the numbered age columns.
    pub fn age_prefix(&self) -> &str {
        &self.age_prefix
    }

    /// Look up any column by name, numbered age columns included.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        if let Ok(field) = name.parse::<BookingField>() {
            return Some(self.get(field));
        }

        let ordinal = name
            .strip_prefix(self.age_prefix.as_str())?
            .trim()
            .parse::<usize>()
            .ok()?;
        ordinal
            .checked_sub(1)
            .and_then(|i| self.ages.get(i))
            .map(String::as_str)
    }

    /// Column names of this record, in order.
    pub fn columns(&self) -> Vec<String> {
        self.iter().map(|(name, _)| name).collect()
    }

    /// Iterate `(column, value)` pairs: fixed fields first, then ages.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        let fixed = BookingField::ALL
            .iter()
            .map(move |f| (f.name().to_string(), self.get(*f)));
        let ages = self
            .ages
            .iter()
            .enumerate()
            .map(move |(i, age)| (format!("{} {}", self.age_prefix, i + 1), age.as_str()));
        fixed.chain(ages)
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_AGE_COLUMN_PREFIX)
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(BookingField::ALL.len() + self.ages.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(&name, value)?;
        }
        map.end()
    }
}

/// Diagnostic for a document that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDiagnostic {
    /// Caller-supplied identifier of the document.
    pub document: String,
    /// Human-readable cause.
    pub error: String,
}

/// Ordered booking records plus the union of their columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultTable {
    records: Vec<FieldMapping>,
    columns: Vec<String>,
}

impl ResultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, extending the column union in first-seen order.
    pub fn push(&mut self, record: FieldMapping) {
        for column in record.columns() {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.records.push(record);
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[FieldMapping] {
        &self.records
    }

    /// Union of all columns ever produced.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows aligned to [`columns`](Self::columns); absent values are empty.
    pub fn rows(&self) -> Vec<Vec<&str>> {
        self.records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| record.get_by_name(column).unwrap_or(""))
                    .collect()
            })
            .collect()
    }
}
