use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single failure type of the gateway boundary.
///
/// Every network, deserialization or backend-reported failure surfaces as one of these
/// variants. Consumers that only need a human-readable text should use
/// [`message`](Self::message); the variants exist for logging and tests.
///
/// Operations are single-shot: the gateway never retries, a [`Timeout`](Self::Timeout)
/// or [`Network`](Self::Network) error is terminal for the call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum TransportError {
    /// Connection-level failure (DNS resolution, refused connection, broken body stream).
    #[error("Network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status_code}: {message}")]
    Http {
        /// HTTP status code returned by the backend.
        status_code: u16,
        /// Backend-supplied message (envelope `message`/`reason`), or the truncated body.
        message: String,
    },

    /// The response body was not a valid envelope.
    #[error("Parse error: {detail}")]
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// The envelope parsed but did not carry the payload the operation returns.
    #[error("Unexpected payload: expected '{expected}'")]
    UnexpectedPayload {
        /// Name of the payload key that was expected (`servers` or `server`).
        expected: String,
    },

    /// A request argument was rejected before anything was sent.
    #[error("Invalid argument '{param}': {detail}")]
    InvalidArgument {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl TransportError {
    /// Human-readable text of the failure, as shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Http { status_code, .. } => (400..500).contains(status_code),
            Self::InvalidArgument { .. } => true,
            _ => false,
        }
    }

    pub(crate) fn unexpected_payload(expected: &str) -> Self {
        Self::UnexpectedPayload {
            expected: expected.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, TransportError>`.
pub type Result<T> = std::result::Result<T, TransportError>;
