//! Forwarding module for the downstream automation endpoint.
//!
//! ## Flow
//!
//! ```text
//! POST /webhook → 200 OK to Meta
//!              ↘ spawn_forward() → POST N8N_WEBHOOK_URL (best effort, no retry)
//! ```

pub mod client;
pub mod error;

pub use client::Forwarder;
pub use error::ForwardError;
