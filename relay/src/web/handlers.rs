//! Webhook endpoint handlers.
//!
//! These handlers are designed to be extremely fast - they only:
//! 1. Check the verify token (subscription handshake)
//! 2. Hand event payloads to a background forwarding task
//! 3. Return immediately
//!
//! Meta retries deliveries that are slow or not 200, so nothing here waits on
//! the downstream endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::{info, warn};

use crate::forward::Forwarder;
use crate::web::verify::verify_subscription;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }
}

// =============================================================================
// Landing Page & Health Check
// =============================================================================

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>wa-relay</title>
    <style>
      body { font-family: sans-serif; background: white; }
      section { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); }
    </style>
  </head>
  <body>
    <section>wa-relay is running.</section>
  </body>
</html>
"#;

/// Static landing page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Subscription Verification
// =============================================================================

/// Query parameters of the verification handshake.
#[derive(Debug, Default, Deserialize)]
pub struct VerificationQuery {
    #[serde(default, rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(default, rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(default, rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Webhook verification endpoint (`GET /webhook`).
///
/// Echoes `hub.challenge` as plain text when the mode is `subscribe` and the
/// token matches; anything else is a bare 403.
pub async fn verify_webhook(
    State(state): State<AppState>,
    query: Option<Query<VerificationQuery>>,
) -> Response {
    // A query string that doesn't decode (e.g. repeated keys) can't match.
    let Some(Query(query)) = query else {
        warn!("webhook_verification_invalid_query");
        return StatusCode::FORBIDDEN.into_response();
    };

    if verify_subscription(
        query.mode.as_deref(),
        query.verify_token.as_deref(),
        state.config.verify_token(),
    ) {
        let challenge = query.challenge.unwrap_or_default();
        info!(challenge_length = challenge.len(), "webhook_verified");
        return (StatusCode::OK, challenge).into_response();
    }

    warn!(
        mode = ?query.mode,
        has_token = query.verify_token.is_some(),
        "webhook_verification_rejected"
    );
    StatusCode::FORBIDDEN.into_response()
}

// =============================================================================
// Event Forwarding
// =============================================================================

/// Webhook event endpoint (`POST /webhook`).
///
/// Schedules the forward and acknowledges with an empty 200. The body is
/// parsed as JSON whatever the `Content-Type`; only an empty or unparsable
/// body gets a 400.
pub async fn receive_event(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let payload = match serde_json::from_slice::<Box<RawValue>>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "webhook_event_invalid_json");
            return StatusCode::BAD_REQUEST;
        }
    };

    state.forwarder.spawn_forward(payload);
    StatusCode::OK
}
