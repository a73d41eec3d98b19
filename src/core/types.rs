//! Core domain types for the application

use chrono::{DateTime, TimeZone, Utc};

/// Nanoseconds per second
pub const NANOS_PER_SEC: i128 = 1_000_000_000;
/// Nanoseconds per millisecond
pub const NANOS_PER_MILLI: i128 = 1_000_000;
/// Nanoseconds per microsecond
pub const NANOS_PER_MICRO: i128 = 1_000;

/// Seconds beyond which an instant falls outside the representable calendar
/// range (chrono caps out near year ±262,000).
const MAX_INSTANT_SECS: f64 = 8.0e12;

/// An absolute point in time as nanoseconds since the Unix epoch.
///
/// A newtype wrapper around i128 so second/millisecond/microsecond values
/// cannot be confused with each other or with nanoseconds. Unit conversions
/// truncate sub-unit fractions toward zero, so every derived integer scale
/// denotes the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instant(i128);

impl Instant {
    /// Create an instant from raw nanoseconds since the Unix epoch.
    #[inline]
    pub fn from_epoch_nanos(nanos: i128) -> Self {
        Self(nanos)
    }

    /// Create an instant from a fractional seconds value.
    ///
    /// Returns `None` for non-finite values and for values outside the
    /// representable calendar range.
    pub fn from_float_secs(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs.abs() > MAX_INSTANT_SECS {
            return None;
        }
        Some(Self(((secs * NANOS_PER_SEC as f64).trunc()) as i128))
    }

    /// Create an instant from a localized datetime.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let secs = dt.timestamp() as i128;
        let subsec = dt.timestamp_subsec_nanos() as i128;
        Self(secs * NANOS_PER_SEC + subsec)
    }

    /// Raw nanoseconds since the Unix epoch.
    #[inline]
    pub fn as_epoch_nanos(self) -> i128 {
        self.0
    }

    /// Whole seconds since the epoch, fraction truncated toward zero.
    #[inline]
    pub fn as_secs(self) -> i64 {
        (self.0 / NANOS_PER_SEC) as i64
    }

    /// Whole milliseconds since the epoch, fraction truncated toward zero.
    #[inline]
    pub fn as_millis(self) -> i64 {
        (self.0 / NANOS_PER_MILLI) as i64
    }

    /// Whole microseconds since the epoch, fraction truncated toward zero.
    #[inline]
    pub fn as_micros(self) -> i64 {
        (self.0 / NANOS_PER_MICRO) as i64
    }

    /// Reconstruct the UTC datetime, or `None` if the instant falls outside
    /// the calendar range chrono can represent.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0.div_euclid(NANOS_PER_SEC)).ok()?;
        let subsec = self.0.rem_euclid(NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs, subsec)
    }
}
