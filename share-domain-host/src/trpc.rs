//! tRPC wire envelope
//!
//! Blinko serves its API through tRPC with the superjson transformer:
//! inputs travel as `{"json": <input>}` (query string for queries, request
//! body for mutations) and results come back as
//! `{"result": {"data": {"json": <output>}}}`. Errors come back as
//! `{"error": {"json": {"message": ...}}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HostError, Result};
use crate::http_client::HttpUtils;

/// superjson input wrapper
#[derive(Debug, Serialize)]
pub struct TrpcInput<'a, T: Serialize> {
    pub json: &'a T,
}

impl<'a, T: Serialize> TrpcInput<'a, T> {
    pub fn new(json: &'a T) -> Self {
        Self { json }
    }

    /// URL-encoded `input` query parameter for GET procedures
    pub fn to_query(&self, procedure: &str) -> Result<String> {
        let encoded = serde_json::to_string(self).map_err(|e| HostError::SerializationError {
            procedure: procedure.to_string(),
            detail: e.to_string(),
        })?;
        Ok(format!("input={}", urlencoding::encode(&encoded)))
    }
}

#[derive(Debug, Deserialize)]
struct TrpcEnvelope {
    #[serde(default)]
    result: Option<TrpcResult>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TrpcResult {
    #[serde(default)]
    data: Value,
}

/// Decode a tRPC response body into `T`.
///
/// The payload is read from `result.data.json`, or from `result.data` when the
/// host runs without the superjson transformer. A missing payload decodes as
/// JSON `null`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str, procedure: &str) -> Result<T> {
    let envelope: TrpcEnvelope = HttpUtils::parse_json(body, procedure)?;

    if let Some(error) = envelope.error {
        let message = error_message(&error);
        log::warn!("[{procedure}] tRPC error (HTTP {status}): {message}");
        return Err(HostError::ApiError {
            procedure: procedure.to_string(),
            status,
            raw_message: message,
        });
    }

    if !(200..300).contains(&status) {
        return Err(HostError::ApiError {
            procedure: procedure.to_string(),
            status,
            raw_message: "unexpected status without tRPC error".to_string(),
        });
    }

    let data = envelope.result.map(|r| r.data).unwrap_or_default();
    let payload = match data {
        Value::Object(mut obj) if obj.contains_key("json") => {
            obj.remove("json").unwrap_or_default()
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| {
        log::error!("[{procedure}] Unexpected payload shape: {e}");
        HostError::ParseError {
            procedure: procedure.to_string(),
            detail: e.to_string(),
        }
    })
}

fn error_message(error: &Value) -> String {
    let shape = error.get("json").unwrap_or(error);
    shape
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| shape.to_string(), str::to_string)
}
