//! Errors raised while forwarding an event downstream.

use reqwest::StatusCode;
use thiserror::Error;

/// Why an event did not reach the downstream endpoint.
///
/// None of these are ever surfaced to the webhook sender; they end up in the
/// logs only.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("N8N_WEBHOOK_URL env var is missing")]
    NotConfigured,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to downstream endpoint failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("downstream endpoint responded with {0}")]
    Status(StatusCode),
}

impl ForwardError {
    /// Short, stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::NotConfigured => "not_configured",
            ForwardError::Client(_) => "client",
            ForwardError::Request(e) if e.is_timeout() => "timeout",
            ForwardError::Request(e) if e.is_connect() => "connect",
            ForwardError::Request(_) => "request",
            ForwardError::Status(_) => "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ForwardError::NotConfigured.to_string(),
            "N8N_WEBHOOK_URL env var is missing"
        );
        assert_eq!(
            ForwardError::Status(StatusCode::BAD_GATEWAY).to_string(),
            "downstream endpoint responded with 502 Bad Gateway"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(ForwardError::NotConfigured.kind(), "not_configured");
        assert_eq!(ForwardError::Status(StatusCode::NOT_FOUND).kind(), "status");
    }
}
