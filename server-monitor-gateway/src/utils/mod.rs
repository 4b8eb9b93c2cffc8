//! Utility modules.

/// Timestamp serde helpers for envelope metadata.
pub mod datetime;

/// Log sanitization utilities to keep response bodies out of logs.
pub mod log_sanitizer;
