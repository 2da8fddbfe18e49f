//! wa-relay - Thin webhook relay between WhatsApp Cloud and n8n.
//!
//! ## Architecture
//!
//! ```text
//! Meta → GET  /webhook → verify token → echo challenge
//! Meta → POST /webhook → 200 OK
//!                      ↘ background task → POST N8N_WEBHOOK_URL
//! ```
//!
//! Nothing is stored and nothing is retried. A forward that fails is logged
//! and dropped.

pub mod config;
pub mod forward;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use forward::{ForwardError, Forwarder};
pub use web::{router, AppState};
