//! Line-scan fields: passenger count and service code.

use super::chain::{Rule, RuleChain};
use super::patterns::{
    SERVICE_LINE, SERVICE_LINE_CODE, TOTAL_PASSENGERS_LABEL, TOTAL_PASSENGERS_VALUE,
};
use crate::models::booking::BookingField;

/// Passenger count: the first "Total pasajeros" line must carry
/// "<digits> Pax ..." or the field stays empty.
pub fn passenger_count_chain() -> RuleChain {
    RuleChain::new(BookingField::TotalPassengers).with(
        10,
        "total-pasajeros-line",
        Rule::FirstLine {
            select: &TOTAL_PASSENGERS_LABEL,
            capture: &TOTAL_PASSENGERS_VALUE,
        },
    )
}

/// Service code: the first line starting with "Servicio" must carry a 6+
/// character code or the field stays empty.
pub fn service_code_chain() -> RuleChain {
    RuleChain::new(BookingField::ServiceCode).with(
        10,
        "servicio-line",
        Rule::FirstLine {
            select: &SERVICE_LINE,
            capture: &SERVICE_LINE_CODE,
        },
    )
}
