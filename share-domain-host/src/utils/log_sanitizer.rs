//! Log sanitization utilities
//!
//! Keeps share passwords out of debug/error logs and truncates large
//! response bodies (note listings carry full note content).

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

const REDACTED: &str = "***";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Replace non-empty `password` / `sharePassword` string values in a JSON
/// value with `***`.
pub fn redact_passwords(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let is_secret = matches!(k.as_str(), "password" | "sharePassword");
                    let v = match v {
                        Value::String(s) if is_secret && !s.is_empty() => {
                            Value::String(REDACTED.to_string())
                        }
                        other => redact_passwords(other),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_passwords).collect()),
        other => other.clone(),
    }
}

/// Redact then truncate a JSON body for logging. Non-JSON text is only truncated.
pub fn sanitize_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => truncate_for_log(&redact_passwords(&value).to_string()),
        Err(_) => truncate_for_log(body),
    }
}
