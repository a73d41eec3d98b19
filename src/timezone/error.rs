//! Timezone registry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("unknown timezone: {0}")]
    Unknown(String),

    #[error("local time does not exist in timezone {0}")]
    NonexistentLocalTime(String),

    #[error("instant is outside the representable calendar range")]
    OutOfRange,
}
