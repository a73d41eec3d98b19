//! Timebridge - timestamp and date conversion service
//!
//! Timebridge accepts a numeric timestamp at any common resolution or a
//! human-readable date string and returns the instant normalized across
//! seconds, milliseconds, microseconds, and nanoseconds, formatted for a
//! caller-supplied timezone. Inbound requests are gated by a per-client
//! sliding-window rate limiter.

// Core application modules
pub mod config;
pub mod convert;
pub mod core;
pub mod limiter;
pub mod metrics;
pub mod server;
pub mod timezone;
