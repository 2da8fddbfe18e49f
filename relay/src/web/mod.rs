//! Web server module for the webhook relay.
//!
//! This module provides a thin, fast web server that:
//! - Answers Meta's subscription handshake on `GET /webhook`
//! - Acknowledges events on `POST /webhook` in microseconds
//! - Forwards each event to n8n in the background
//!
//! ## Routes
//!
//! ```text
//! GET  /         → static landing page
//! GET  /health   → {"status":"ok"}
//! GET  /webhook  → challenge echo or 403
//! POST /webhook  → 200, then forward
//! ```

pub mod handlers;
pub mod verify;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, index, receive_event, verify_webhook, AppState, HealthResponse, VerificationQuery,
};
pub use verify::{verify_subscription, SUBSCRIBE_MODE};

/// Build the relay's router with all routes and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/webhook", get(verify_webhook).post(receive_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
