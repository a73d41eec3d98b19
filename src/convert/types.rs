//! Conversion result types.

use serde::Serialize;

use crate::core::types::Instant;

/// One rendering of an instant: a formatted local datetime plus the same
/// instant at every common integer resolution.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultEntry {
    pub date: String,
    pub timestamp_s: i64,
    pub timestamp_ms: i64,
    pub timestamp_us: i64,
    pub timestamp_ns: i128,
}

impl ResultEntry {
    /// Derive all four integer scales from one instant. Fractions truncate
    /// toward zero, so every field denotes the identical instant.
    pub fn new(date: String, instant: Instant) -> Self {
        Self {
            date,
            timestamp_s: instant.as_secs(),
            timestamp_ms: instant.as_millis(),
            timestamp_us: instant.as_micros(),
            timestamp_ns: instant.as_epoch_nanos(),
        }
    }
}

/// An ordered sequence of result entries. Two entries occur only for
/// date-only input (morning before afternoon); everything else yields one.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Conversion(Vec<ResultEntry>);

impl Conversion {
    pub fn single(entry: ResultEntry) -> Self {
        Self(vec![entry])
    }

    pub fn pair(morning: ResultEntry, afternoon: ResultEntry) -> Self {
        Self(vec![morning, afternoon])
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.0
    }
}
