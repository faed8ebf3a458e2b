//! Booking field extraction module.

pub mod batch;
mod parser;
pub mod rules;

pub use batch::{BatchDriver, BatchReport, Document};
pub use parser::{
    reservation_type, BookingParser, ParseResult, RuleHit, CANCELLATION_TYPE,
    NEW_RESERVATION_TYPE,
};
