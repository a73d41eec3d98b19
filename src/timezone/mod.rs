//! Timezone registry capability.
//!
//! The conversion core never touches a timezone database directly; it goes
//! through [`TimezoneProvider`] so the registry can be swapped in tests.
//! [`TzdbProvider`] is the production implementation backed by the IANA
//! database compiled into chrono-tz.

mod error;

pub use error::TimezoneError;

use chrono::{LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::core::types::Instant;

pub type Result<T> = std::result::Result<T, TimezoneError>;

/// Display format shared by every formatted result entry.
pub const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lookup and localization capability over a set of known timezone
/// identifiers.
pub trait TimezoneProvider: Send + Sync {
    /// Whether `id` names a timezone in the registry's known set.
    fn is_valid(&self, id: &str) -> bool;

    /// Interpret a naive local datetime in the given timezone.
    fn localize(&self, naive: NaiveDateTime, id: &str) -> Result<Instant>;

    /// Format an instant as "YYYY-MM-DD HH:MM:SS" local to the given
    /// timezone. Always pairs with the timezone that localized the value.
    fn format_local(&self, instant: Instant, id: &str) -> Result<String>;

    /// Every identifier in the known set.
    fn identifiers(&self) -> &'static [&'static str];
}

static TZ_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()).collect());

/// IANA-database-backed provider.
pub struct TzdbProvider;

impl TzdbProvider {
    pub fn new() -> Self {
        Self
    }

    fn lookup(&self, id: &str) -> Result<Tz> {
        id.parse::<Tz>().map_err(|_| TimezoneError::Unknown(id.to_string()))
    }
}

impl Default for TzdbProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneProvider for TzdbProvider {
    fn is_valid(&self, id: &str) -> bool {
        id.parse::<Tz>().is_ok()
    }

    fn localize(&self, naive: NaiveDateTime, id: &str) -> Result<Instant> {
        let tz = self.lookup(id)?;
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(Instant::from_datetime(&dt)),
            // DST fall-back yields two candidate offsets; take the earlier.
            LocalResult::Ambiguous(earliest, _) => Ok(Instant::from_datetime(&earliest)),
            // Spring-forward gap: the wall-clock time never happened.
            LocalResult::None => Err(TimezoneError::NonexistentLocalTime(id.to_string())),
        }
    }

    fn format_local(&self, instant: Instant, id: &str) -> Result<String> {
        let tz = self.lookup(id)?;
        let utc = instant.to_utc().ok_or(TimezoneError::OutOfRange)?;
        Ok(utc.with_timezone(&tz).format(LOCAL_FORMAT).to_string())
    }

    fn identifiers(&self) -> &'static [&'static str] {
        TZ_NAMES.as_slice()
    }
}
