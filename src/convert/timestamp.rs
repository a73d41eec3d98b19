//! Numeric timestamp interpretation.
//!
//! A bare number is classified by magnitude: values beyond 1e15 are read as
//! nanoseconds since the epoch, beyond 1e12 as microseconds, beyond 1e9 as
//! milliseconds, and anything else as seconds. Checked largest-first, first
//! match wins.

use thiserror::Error;

use crate::core::types::Instant;

/// A parsed number whose instant cannot be represented (non-finite or
/// outside the calendar range). Surfaces as an internal error, never as a
/// fallthrough to the date interpreter.
#[derive(Debug, Error)]
#[error("numeric timestamp {value} is not representable as an instant")]
pub struct UnrepresentableTimestamp {
    pub value: f64,
}

/// Epoch resolution inferred from a value's magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitScale {
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl UnitScale {
    fn classify(value: f64) -> Self {
        if value > 1e15 {
            Self::Nanos
        } else if value > 1e12 {
            Self::Micros
        } else if value > 1e9 {
            Self::Millis
        } else {
            Self::Seconds
        }
    }

    fn to_secs(self, value: f64) -> f64 {
        match self {
            Self::Seconds => value,
            Self::Millis => value / 1e3,
            Self::Micros => value / 1e6,
            Self::Nanos => value / 1e9,
        }
    }
}

/// Interpret `text` as a numeric timestamp.
///
/// `Ok(None)` means the text is not a number at all and the caller should
/// fall through to date parsing.
pub fn interpret_timestamp(text: &str) -> Result<Option<Instant>, UnrepresentableTimestamp> {
    let Ok(value) = text.parse::<f64>() else {
        return Ok(None);
    };
    let secs = UnitScale::classify(value).to_secs(value);
    match Instant::from_float_secs(secs) {
        Some(instant) => Ok(Some(instant)),
        None => Err(UnrepresentableTimestamp { value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> Instant {
        interpret_timestamp(text).unwrap().expect("should match")
    }

    #[test]
    fn plain_seconds_pass_through() {
        assert_eq!(interpret("1700000000").as_secs(), 1700000000);
        assert_eq!(interpret("0").as_secs(), 0);
        assert_eq!(interpret("-86400").as_secs(), -86400);
    }

    #[test]
    fn milliseconds_by_magnitude() {
        let instant = interpret("1700000000000");
        assert_eq!(instant.as_millis(), 1700000000000);
        assert_eq!(instant.as_secs(), 1700000000);
    }

    #[test]
    fn microseconds_by_magnitude() {
        let instant = interpret("1700000000000000");
        assert_eq!(instant.as_micros(), 1700000000000000);
        assert_eq!(instant.as_secs(), 1700000000);
    }

    #[test]
    fn nanoseconds_by_magnitude() {
        let instant = interpret("1700000000000000000");
        assert_eq!(instant.as_secs(), 1700000000);
    }

    #[test]
    fn boundaries_are_exclusive() {
        // Exactly 1e9 is still seconds; just above is milliseconds.
        assert_eq!(interpret("1000000000").as_secs(), 1000000000);
        assert_eq!(interpret("1000000001").as_secs(), 1000000);
    }

    #[test]
    fn fractional_seconds_truncate() {
        let instant = interpret("1700000000.5");
        assert_eq!(instant.as_secs(), 1700000000);
        assert_eq!(instant.as_millis(), 1700000000500);
    }

    #[test]
    fn non_numeric_is_not_applicable() {
        assert!(interpret_timestamp("2024-03-15").unwrap().is_none());
        assert!(interpret_timestamp("not-a-number").unwrap().is_none());
        assert!(interpret_timestamp("").unwrap().is_none());
    }

    #[test]
    fn unrepresentable_values_are_errors() {
        assert!(interpret_timestamp("inf").is_err());
        assert!(interpret_timestamp("NaN").is_err());
        assert!(interpret_timestamp("1e40").is_err());
    }
}
