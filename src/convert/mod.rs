//! Conversion dispatch: input validation, interpreter fallback, error
//! shaping.
//!
//! The dispatcher runs a linear state machine: validate the raw input,
//! check the timezone against the registry, then try the numeric
//! interpreter and fall back to the date-string interpreter. The first
//! interpreter to match wins; neither matching is a format error.

mod datetime;
mod error;
mod timestamp;
mod types;

pub use error::{ConvertError, Result};
pub use types::{Conversion, ResultEntry};

use std::sync::Arc;

use chrono::Local;
use tracing::error;

use crate::{
    core::types::Instant,
    timezone::{LOCAL_FORMAT, TimezoneProvider},
};

/// Dispatcher policy knobs, from the `[convert]` configuration section.
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Inputs longer than this are rejected before interpretation.
    pub max_input_length: usize,
    /// Format numeric-timestamp results in the caller's timezone instead of
    /// the server's local timezone (see DESIGN.md).
    pub numeric_uses_caller_tz: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self { max_input_length: 100, numeric_uses_caller_tz: false }
    }
}

/// Orchestrates the interpreters and enforces the result/error contract.
pub struct Converter {
    provider: Arc<dyn TimezoneProvider>,
    options: ConverterOptions,
}

impl Converter {
    pub fn new(provider: Arc<dyn TimezoneProvider>, options: ConverterOptions) -> Self {
        Self { provider, options }
    }

    /// Convert a raw input string against a timezone identifier.
    ///
    /// Returns one entry for numeric and full-datetime inputs, two for
    /// date-only inputs, or exactly one classified error.
    pub fn convert(&self, raw_input: &str, timezone_id: &str) -> Result<Conversion> {
        if raw_input.is_empty() || raw_input.chars().count() > self.options.max_input_length {
            return Err(ConvertError::InvalidInput);
        }
        if !self.provider.is_valid(timezone_id) {
            return Err(ConvertError::InvalidTimezone);
        }

        match timestamp::interpret_timestamp(raw_input) {
            Ok(Some(instant)) => {
                return self.numeric_entry(instant, timezone_id).map(Conversion::single);
            },
            Ok(None) => {},
            Err(err) => {
                error!(input = raw_input, %err, "numeric interpretation failed");
                return Err(ConvertError::Internal);
            },
        }

        datetime::interpret_datetime(self.provider.as_ref(), raw_input, timezone_id)
            .ok_or(ConvertError::InvalidFormat)
    }

    // The numeric path formats in the server's local timezone unless
    // configured to follow the caller (see DESIGN.md).
    fn numeric_entry(&self, instant: Instant, timezone_id: &str) -> Result<ResultEntry> {
        let date = if self.options.numeric_uses_caller_tz {
            self.provider.format_local(instant, timezone_id).map_err(|err| {
                error!(%err, "failed to format numeric timestamp");
                ConvertError::Internal
            })?
        } else {
            let utc = instant.to_utc().ok_or_else(|| {
                error!("numeric timestamp outside the representable calendar range");
                ConvertError::Internal
            })?;
            utc.with_timezone(&Local).format(LOCAL_FORMAT).to_string()
        };
        Ok(ResultEntry::new(date, instant))
    }
}
