//! Date-string interpretation.
//!
//! Inputs are matched against a fixed, ordered list of shapes. A bare date
//! expands into two synthesized instants (08:30 and 15:00 local) because the
//! service's callers want a working-morning and working-afternoon anchor for
//! the day, not midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    convert::types::{Conversion, ResultEntry},
    timezone::TimezoneProvider,
};

/// Accepted input shapes, tried in order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// "YYYY-MM-DD HH:MM:SS"
    DateTimeSeconds,
    /// "YYYY-MM-DD HH:MM"
    DateTimeMinutes,
    /// "YYYY-MM-DD HH"
    DateHour,
    /// "YYYY-MM-DD"
    DateOnly,
}

const FORMATS: &[DateFormat] = &[
    DateFormat::DateTimeSeconds,
    DateFormat::DateTimeMinutes,
    DateFormat::DateHour,
    DateFormat::DateOnly,
];

/// A successfully parsed input, before localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedStamp {
    Full(NaiveDateTime),
    DateOnly(NaiveDate),
}

impl DateFormat {
    fn parse(self, text: &str) -> Option<ParsedStamp> {
        match self {
            Self::DateTimeSeconds => {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok().map(ParsedStamp::Full)
            },
            Self::DateTimeMinutes => {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").ok().map(ParsedStamp::Full)
            },
            Self::DateHour => parse_date_hour(text),
            Self::DateOnly => {
                NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(ParsedStamp::DateOnly)
            },
        }
    }
}

// chrono cannot build a NaiveDateTime from a date plus a bare hour, so the
// "YYYY-MM-DD HH" shape is matched by hand.
fn parse_date_hour(text: &str) -> Option<ParsedStamp> {
    let (date_part, hour_part) = text.split_once(' ')?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    if hour_part.is_empty() || hour_part.len() > 2 || !hour_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let time = NaiveTime::from_hms_opt(hour_part.parse().ok()?, 0, 0)?;
    Some(ParsedStamp::Full(date.and_time(time)))
}

fn morning() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 30, 0).unwrap()
}

fn afternoon() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 0, 0).unwrap()
}

/// Interpret `text` as a date or datetime string localized to `timezone_id`.
///
/// `None` means no format matched or the timezone could not localize the
/// value; the caller surfaces a format error either way.
pub fn interpret_datetime(
    provider: &dyn TimezoneProvider,
    text: &str,
    timezone_id: &str,
) -> Option<Conversion> {
    let stamp = FORMATS.iter().find_map(|format| format.parse(text))?;
    match stamp {
        ParsedStamp::Full(naive) => {
            let entry = localized_entry(provider, naive, timezone_id)?;
            Some(Conversion::single(entry))
        },
        ParsedStamp::DateOnly(date) => {
            let morning = localized_entry(provider, date.and_time(morning()), timezone_id)?;
            let afternoon = localized_entry(provider, date.and_time(afternoon()), timezone_id)?;
            Some(Conversion::pair(morning, afternoon))
        },
    }
}

fn localized_entry(
    provider: &dyn TimezoneProvider,
    naive: NaiveDateTime,
    timezone_id: &str,
) -> Option<ResultEntry> {
    let instant = provider.localize(naive, timezone_id).ok()?;
    let date = provider.format_local(instant, timezone_id).ok()?;
    Some(ResultEntry::new(date, instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::TzdbProvider;

    fn interpret(text: &str, tz: &str) -> Option<Conversion> {
        interpret_datetime(&TzdbProvider::new(), text, tz)
    }

    #[test]
    fn full_datetime_yields_one_entry() {
        let conversion = interpret("2024-03-15 14:30:00", "UTC").unwrap();
        let entries = conversion.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2024-03-15 14:30:00");
        assert_eq!(entries[0].timestamp_s, 1710513000);
    }

    #[test]
    fn datetime_without_seconds() {
        let conversion = interpret("2024-03-15 14:30", "UTC").unwrap();
        assert_eq!(conversion.entries()[0].date, "2024-03-15 14:30:00");
        assert_eq!(conversion.entries()[0].timestamp_s, 1710513000);
    }

    #[test]
    fn date_with_bare_hour() {
        let conversion = interpret("2024-03-15 14", "UTC").unwrap();
        assert_eq!(conversion.entries()[0].date, "2024-03-15 14:00:00");
        assert_eq!(conversion.entries()[0].timestamp_s, 1710511200);
    }

    #[test]
    fn date_only_expands_to_morning_and_afternoon() {
        let conversion = interpret("2024-03-15", "UTC").unwrap();
        let entries = conversion.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "2024-03-15 08:30:00");
        assert_eq!(entries[1].date, "2024-03-15 15:00:00");
        assert_eq!(entries[0].timestamp_s, 1710491400);
        assert_eq!(entries[1].timestamp_s, 1710514800);
    }

    #[test]
    fn date_only_expansion_respects_timezone() {
        let conversion = interpret("2024-03-15", "America/Chicago").unwrap();
        let entries = conversion.entries();
        // 08:30 CDT is 13:30 UTC.
        assert_eq!(entries[0].date, "2024-03-15 08:30:00");
        assert_eq!(entries[0].timestamp_s, 1710509400);
        assert_eq!(entries[1].timestamp_s, 1710532800);
    }

    #[test]
    fn rejects_unmatched_shapes() {
        assert!(interpret("not-a-date", "UTC").is_none());
        assert!(interpret("2024/03/15", "UTC").is_none());
        assert!(interpret("2024-03-15T14:30:00", "UTC").is_none());
        assert!(interpret("2024-03-15 14:30:00 extra", "UTC").is_none());
        assert!(interpret("2024-03-15 99", "UTC").is_none());
        assert!(interpret("2024-13-01", "UTC").is_none());
    }

    #[test]
    fn nonexistent_local_time_is_not_applicable() {
        // Chicago's 2024 spring-forward gap swallows 02:30.
        assert!(interpret("2024-03-10 02:30:00", "America/Chicago").is_none());
    }

    #[test]
    fn unknown_timezone_is_not_applicable() {
        assert!(interpret("2024-03-15", "Mars/Phobos").is_none());
    }
}
