//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, classifies the HTTP status into a
//! [`HostError`] and logs the exchange with passwords redacted.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::HostError;
use crate::utils::log_sanitizer::{sanitize_body, truncate_for_log};

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `procedure` - tRPC procedure name (for logging and errors)
    /// * `method_name` - "GET" / "POST" (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any status the caller has to
    ///   inspect itself (2xx and tRPC error statuses)
    /// * `Err(HostError)` for transport failures, 401/403, 429 and 502-504
    pub async fn execute_request(
        request_builder: RequestBuilder,
        procedure: &str,
        method_name: &str,
    ) -> Result<(u16, String), HostError> {
        log::debug!("[{procedure}] {method_name}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HostError::Timeout {
                    procedure: procedure.to_string(),
                    detail: e.to_string(),
                }
            } else {
                HostError::NetworkError {
                    procedure: procedure.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{procedure}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{procedure}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(HostError::RateLimited {
                procedure: procedure.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 401 | 403) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{procedure}] Access token rejected (HTTP {status_code})");
            return Err(HostError::Unauthorized {
                procedure: procedure.to_string(),
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{procedure}] Server error (HTTP {status_code})");
            return Err(HostError::NetworkError {
                procedure: procedure.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| HostError::NetworkError {
                procedure: procedure.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{procedure}] Response Body: {}", sanitize_body(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, procedure: &str) -> Result<T, HostError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{procedure}] JSON parse failed: {e}");
            log::error!("[{procedure}] Raw response: {}", sanitize_body(response_text));
            HostError::ParseError {
                procedure: procedure.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request with retries
    ///
    /// Only transient errors (network, timeout, rate limit) are retried, with
    /// exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds).
    /// `max_retries == 0` sends the request exactly once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        procedure: &str,
        method_name: &str,
        max_retries: u32,
    ) -> Result<(u16, String), HostError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, procedure, method_name).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder can only be used once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{procedure}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, procedure, method_name).await;
            };

            match Self::execute_request(req, procedure, method_name).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        procedure,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| HostError::NetworkError {
            procedure: procedure.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

fn is_retryable(error: &HostError) -> bool {
    error.is_expected()
}

/// `Retry-After` (capped at 30s) for rate limits, exponential backoff otherwise
fn retry_delay(error: &HostError, attempt: u32) -> Duration {
    if let HostError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
