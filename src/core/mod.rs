//! Core domain modules
pub mod types;

// Re-export common types
pub use types::{Instant, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SEC};
