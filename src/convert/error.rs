//! Conversion error types.

use thiserror::Error;

/// Terminal outcomes for a conversion call.
///
/// Messages are user-facing; status codes are the HTTP layer's concern.
/// `Internal` detail is logged server-side and never surfaced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid input format or length")]
    InvalidInput,

    #[error("Invalid timezone")]
    InvalidTimezone,

    #[error(
        "Invalid input format. Please enter a timestamp or date in YYYY-MM-DD [HH[:MM[:SS]]] format"
    )]
    InvalidFormat,

    #[error("An internal error occurred")]
    Internal,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
