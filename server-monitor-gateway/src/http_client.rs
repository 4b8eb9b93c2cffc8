//! Generic HTTP client tools
//!
//! Shared request execution for the gateway: sending, logging, mapping transport
//! failures and decoding the envelope. Requests are sent exactly once.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{Result, TransportError};
use crate::types::Envelope;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `method_name` - request method name, for logs
    /// * `path` - request path, for logs
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String)> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                TransportError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method_name} {path} -> {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                TransportError::Network {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Err(TransportError::Parse)` - the text is not valid JSON for `T`
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            TransportError::Parse {
                detail: e.to_string(),
            }
        })
    }

    /// Decode an envelope, turning non-2xx statuses into [`TransportError::Http`].
    ///
    /// Error responses keep the backend's own wording when the body is an envelope
    /// (`message`, then `reason`); otherwise the truncated body is used.
    pub fn parse_envelope(status_code: u16, response_text: &str) -> Result<Envelope> {
        if (200..300).contains(&status_code) {
            return Self::parse_json(response_text);
        }

        let message = serde_json::from_str::<Envelope>(response_text)
            .ok()
            .and_then(|envelope| envelope.message.or(envelope.reason))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if response_text.trim().is_empty() {
                    "empty response body".to_string()
                } else {
                    truncate_for_log(response_text)
                }
            });

        log::warn!("Backend returned HTTP {status_code}: {message}");
        Err(TransportError::Http {
            status_code,
            message,
        })
    }
}
