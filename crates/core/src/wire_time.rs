//! Date-time parsing and rendering in the fixed `DD.MM.YYYY HH:MM:SS` format.
//!
//! Every date-time that crosses the HTTP boundary (transfer windows, list
//! filters, row timestamps) uses this single textual format.

use serde::Serializer;

use crate::types::{Timestamp, WindowTime};

/// `chrono` format string for the wire representation.
pub const WIRE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Parse a wire date-time. Surrounding whitespace is ignored.
///
/// Returns `None` for anything that does not match the format exactly,
/// including out-of-range components such as `31.02.2024`.
pub fn parse(input: &str) -> Option<WindowTime> {
    WindowTime::parse_from_str(input.trim(), WIRE_FORMAT).ok()
}

/// Render a window bound in the wire format.
pub fn format(value: &WindowTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Render a UTC timestamp in the wire format.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// `serialize_with` helper for [`WindowTime`] fields.
pub fn serialize<S: Serializer>(value: &WindowTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// `serialize_with` helper for [`Timestamp`] fields.
pub fn serialize_timestamp<S: Serializer>(
    value: &Timestamp,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(value))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn at(day: u32, hour: u32, min: u32, sec: u32) -> WindowTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn parses_wire_format() {
        assert_eq!(parse("01.01.2024 10:00:00"), Some(at(1, 10, 0, 0)));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse("  05.01.2024 23:59:58 "), Some(at(5, 23, 59, 58)));
    }

    #[test]
    fn rejects_iso_format() {
        assert_eq!(parse("2024-01-01 10:00:00"), None);
        assert_eq!(parse("2024-01-01T10:00:00Z"), None);
    }

    #[test]
    fn rejects_missing_seconds() {
        assert_eq!(parse("01.01.2024 10:00"), None);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse("31.02.2024 10:00:00"), None);
        assert_eq!(parse("01.13.2024 10:00:00"), None);
    }

    #[test]
    fn format_round_trips_through_parse() {
        let value = at(9, 7, 5, 3);
        assert_eq!(format(&value), "09.01.2024 07:05:03");
        assert_eq!(parse(&format(&value)), Some(value));
    }

    #[test]
    fn formats_utc_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 14, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "02.03.2024 14:30:00");
    }
}
