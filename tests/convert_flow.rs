//! End-to-end conversion properties through the public dispatcher API.

use std::sync::Arc;

use timebridge::convert::{Conversion, ConvertError, Converter, ConverterOptions};
use timebridge::timezone::TzdbProvider;

fn converter() -> Converter {
    Converter::new(Arc::new(TzdbProvider::new()), ConverterOptions::default())
}

fn convert(input: &str, timezone: &str) -> Result<Conversion, ConvertError> {
    converter().convert(input, timezone)
}

#[test]
fn seconds_scale_numeric_input() {
    let conversion = convert("1700000000", "UTC").unwrap();
    let entries = conversion.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].timestamp_s, 1700000000);
    assert_eq!(entries[0].timestamp_ms, 1700000000000);
    assert_eq!(entries[0].timestamp_us, 1700000000000000);
    assert_eq!(entries[0].timestamp_ns, 1700000000000000000);
}

#[test]
fn small_numeric_values_are_seconds() {
    // Everything at or below 1e9 reads as seconds.
    let conversion = convert("123.75", "UTC").unwrap();
    assert_eq!(conversion.entries()[0].timestamp_s, 123);
    assert_eq!(conversion.entries()[0].timestamp_ms, 123750);
}

#[test]
fn millisecond_scale_numeric_input() {
    let conversion = convert("1700000000500", "UTC").unwrap();
    let entry = &conversion.entries()[0];
    assert_eq!(entry.timestamp_ms, 1700000000500);
    assert_eq!(entry.timestamp_s, 1700000000);
}

#[test]
fn microsecond_scale_numeric_input() {
    let conversion = convert("1700000000500000", "UTC").unwrap();
    let entry = &conversion.entries()[0];
    assert_eq!(entry.timestamp_us, 1700000000500000);
    assert_eq!(entry.timestamp_s, 1700000000);
}

#[test]
fn nanosecond_scale_numeric_input() {
    // f64 carries ~15-16 significant digits; full-resolution nanosecond
    // inputs keep the second exactly even when the tail rounds.
    let conversion = convert("1700000000000000000", "UTC").unwrap();
    let entry = &conversion.entries()[0];
    assert_eq!(entry.timestamp_s, 1700000000);
    assert_eq!(entry.timestamp_ns, 1700000000000000000);
}

#[test]
fn all_scales_denote_the_same_instant() {
    let conversion = convert("1700000000.5", "UTC").unwrap();
    let entry = &conversion.entries()[0];
    assert_eq!(entry.timestamp_ms, entry.timestamp_s * 1000 + 500);
    assert_eq!(entry.timestamp_us, entry.timestamp_ms * 1000);
    assert_eq!(entry.timestamp_ns, entry.timestamp_us as i128 * 1000);
}

#[test]
fn date_only_input_yields_morning_and_afternoon() {
    let conversion = convert("2024-03-15", "UTC").unwrap();
    let entries = conversion.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, "2024-03-15 08:30:00");
    assert_eq!(entries[1].date, "2024-03-15 15:00:00");
    assert_eq!(entries[0].timestamp_s, 1710491400);
    assert_eq!(entries[1].timestamp_s, 1710514800);
}

#[test]
fn full_datetime_input_yields_one_entry() {
    let conversion = convert("2024-03-15 14:30:00", "UTC").unwrap();
    let entries = conversion.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, "2024-03-15 14:30:00");
    assert_eq!(entries[0].timestamp_s, 1710513000);
}

#[test]
fn datetime_formats_fall_through_in_order() {
    assert_eq!(convert("2024-03-15 14:30", "UTC").unwrap().entries()[0].timestamp_s, 1710513000);
    assert_eq!(convert("2024-03-15 14", "UTC").unwrap().entries()[0].timestamp_s, 1710511200);
}

#[test]
fn caller_timezone_shifts_the_instant() {
    // 14:30 in Chicago (CDT, UTC-5) is 19:30 UTC.
    let conversion = convert("2024-03-15 14:30:00", "America/Chicago").unwrap();
    let entry = &conversion.entries()[0];
    assert_eq!(entry.date, "2024-03-15 14:30:00");
    assert_eq!(entry.timestamp_s, 1710513000 + 5 * 3600);
}

#[test]
fn oversized_input_is_rejected_regardless_of_content() {
    let input = "1".repeat(101);
    assert_eq!(convert(&input, "UTC").unwrap_err(), ConvertError::InvalidInput);
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(convert("", "UTC").unwrap_err(), ConvertError::InvalidInput);
}

#[test]
fn unknown_timezone_is_rejected_for_valid_dates() {
    assert_eq!(convert("2024-03-15", "Mars/Phobos").unwrap_err(), ConvertError::InvalidTimezone);
}

#[test]
fn garbage_input_is_a_format_error() {
    assert_eq!(
        convert("not-a-date-or-number", "UTC").unwrap_err(),
        ConvertError::InvalidFormat
    );
}

#[test]
fn numeric_path_with_caller_timezone_formatting() {
    let converter = Converter::new(
        Arc::new(TzdbProvider::new()),
        ConverterOptions { numeric_uses_caller_tz: true, ..ConverterOptions::default() },
    );
    let conversion = converter.convert("1710509400", "America/Chicago").unwrap();
    assert_eq!(conversion.entries()[0].date, "2024-03-15 08:30:00");
}
