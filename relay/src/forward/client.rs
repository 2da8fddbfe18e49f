//! Best-effort HTTP forwarder for event payloads.
//!
//! One shared `reqwest::Client` is reused for every forward so connections to
//! the downstream endpoint are pooled across requests. Payloads travel as
//! [`RawValue`]: the bytes Meta sent are the bytes n8n receives.

use std::sync::Arc;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde_json::value::RawValue;
use tokio::task::JoinHandle;
use tracing::{error, info};
use url::Url;

use super::error::ForwardError;

const USER_AGENT: &str = concat!("wa-relay/", env!("CARGO_PKG_VERSION"));

/// Forwards event payloads to the configured downstream endpoint.
///
/// Cheap to clone; clones share the same HTTP client and URL.
#[derive(Clone)]
pub struct Forwarder {
    inner: Arc<ForwarderInner>,
}

struct ForwarderInner {
    client: Client,
    url: Option<Url>,
}

impl Forwarder {
    /// Create a forwarder targeting `url`.
    ///
    /// A `None` URL is allowed: every forward is then dropped and logged.
    pub fn new(url: Option<Url>) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self {
            inner: Arc::new(ForwarderInner { client, url }),
        })
    }

    /// The downstream URL, if configured.
    pub fn url(&self) -> Option<&Url> {
        self.inner.url.as_ref()
    }

    /// POST `payload` as JSON to the downstream endpoint, once.
    ///
    /// Non-2xx responses are reported as [`ForwardError::Status`]. The
    /// response body is never read.
    pub async fn forward(&self, payload: &RawValue) -> Result<StatusCode, ForwardError> {
        let url = self.url().ok_or(ForwardError::NotConfigured)?;

        let response = self
            .inner
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload.get().to_owned())
            .send()
            .await
            .map_err(ForwardError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status));
        }

        Ok(status)
    }

    /// Log and forward `payload` on a detached task.
    ///
    /// The outcome only ever reaches the logs. The returned handle may be
    /// dropped; the task keeps running.
    pub fn spawn_forward(&self, payload: Box<RawValue>) -> JoinHandle<()> {
        let forwarder = self.clone();

        tokio::spawn(async move {
            info!(payload = payload.get(), "webhook_event_received");

            match forwarder.forward(&payload).await {
                Ok(status) => {
                    info!(status_code = status.as_u16(), "webhook_forwarded");
                }
                Err(ForwardError::NotConfigured) => {
                    error!(error = %ForwardError::NotConfigured, "forward_url_not_configured");
                }
                Err(e) => {
                    error!(error = %e, kind = e.kind(), "webhook_forward_failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    fn forwarder_for(server: &MockServer, path: &str) -> Forwarder {
        let url = Url::parse(&format!("{}{}", server.uri(), path)).unwrap();
        Forwarder::new(Some(url)).unwrap()
    }

    #[tokio::test]
    async fn test_forward_posts_json_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/webhook/n8n"))
            .and(matchers::header("content-type", "application/json"))
            .and(matchers::body_string(r#"{"a":1}"#))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forwarder = forwarder_for(&mock_server, "/webhook/n8n");
        let status = forwarder.forward(&raw(r#"{"a":1}"#)).await.unwrap();

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forward_keeps_payload_bytes() {
        let body = r#"{"object":"whatsapp_business_account","a":1.0,"b":1e2,"c":12345678901234567890123}"#;
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::body_string(body))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let payload: Box<RawValue> = serde_json::from_str(body).unwrap();
        let forwarder = forwarder_for(&mock_server, "/");

        assert_eq!(forwarder.forward(&payload).await.unwrap(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_forward_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forwarder = forwarder_for(&mock_server, "/");
        let err = forwarder.forward(&raw("{}")).await.unwrap_err();

        assert!(matches!(err, ForwardError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
    }

    #[tokio::test]
    async fn test_forward_not_configured() {
        let forwarder = Forwarder::new(None).unwrap();

        let err = forwarder.forward(&raw(r#"{"a":1}"#)).await.unwrap_err();
        assert!(matches!(err, ForwardError::NotConfigured));
    }

    #[tokio::test]
    async fn test_forward_connection_refused() {
        // Nothing listens on port 1.
        let url = Url::parse("http://127.0.0.1:1/webhook").unwrap();
        let forwarder = Forwarder::new(Some(url)).unwrap();

        let err = forwarder.forward(&raw(r#"{"a":1}"#)).await.unwrap_err();
        assert!(matches!(err, ForwardError::Request(_)));
    }

    #[tokio::test]
    async fn test_spawn_forward_swallows_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forwarder = forwarder_for(&mock_server, "/");

        // The task itself must complete without panicking.
        forwarder
            .spawn_forward(raw(r#"{"entry":[{"id":"123"}]}"#))
            .await
            .unwrap();

        let unconfigured = Forwarder::new(None).unwrap();
        unconfigured.spawn_forward(raw(r#"{"a":1}"#)).await.unwrap();
    }
}
