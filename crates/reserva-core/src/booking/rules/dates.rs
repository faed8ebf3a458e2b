//! Booking form dates.
//!
//! Dates are printed as `DD-MMM.-YY` with a Spanish month abbreviation,
//! e.g. `05-ENE.-25`. The raw text is what goes into the record; this module
//! only offers typed parsing for callers that need it.

use chrono::NaiveDate;

/// Parse a `DD-MMM.-YY` (or `DD-MMM-YYYY`) booking date.
pub fn parse_booking_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('-');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month = month_to_number(parts.next()?.trim().trim_end_matches('.'))?;
    let year = parse_year(parts.next()?.trim())?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    match s.len() {
        // Booking forms only cover recent years
        2 => Some(2000 + year),
        4 => Some(year),
        _ => None,
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let number = match month.to_uppercase().as_str() {
        "ENE" | "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "ABR" | "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AGO" | "AUG" => 8,
        "SEP" | "SET" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DIC" | "DEC" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_spanish_abbreviation() {
        assert_eq!(parse_booking_date("05-ENE.-25"), date(2025, 1, 5));
        assert_eq!(parse_booking_date("31-DIC.-24"), date(2024, 12, 31));
        assert_eq!(parse_booking_date("15-AGO.-25"), date(2025, 8, 15));
    }

    #[test]
    fn test_english_and_long_year() {
        assert_eq!(parse_booking_date("01-APR-2025"), date(2025, 4, 1));
        assert_eq!(parse_booking_date(" 10-set.-25 "), date(2025, 9, 10));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_booking_date("30-FEB.-25"), None);
        assert_eq!(parse_booking_date("05-XYZ.-25"), None);
        assert_eq!(parse_booking_date("05/01/2025"), None);
        assert_eq!(parse_booking_date("05-ENE.-125"), None);
        assert_eq!(parse_booking_date(""), None);
    }
}
