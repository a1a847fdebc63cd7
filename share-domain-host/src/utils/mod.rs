//! Utility modules.

/// Log sanitization utilities to keep share passwords out of logs.
pub mod log_sanitizer;
