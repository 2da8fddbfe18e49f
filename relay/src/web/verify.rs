//! Webhook subscription verification.
//!
//! When a webhook is registered, Meta sends a `GET` with `hub.mode=subscribe`,
//! the verify token configured on their side and a random challenge. The
//! endpoint proves ownership by echoing the challenge, but only if the token
//! matches ours.

use tracing::warn;

/// The only `hub.mode` value accepted.
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Check a subscription request against the configured verify token.
///
/// Returns `false` when no token is configured, so an unconfigured relay
/// never confirms a subscription.
pub fn verify_subscription(mode: Option<&str>, token: Option<&str>, expected: Option<&str>) -> bool {
    let expected = match expected {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!("verify_token_not_configured");
            return false;
        }
    };

    if mode != Some(SUBSCRIBE_MODE) {
        return false;
    }

    match token {
        Some(token) => constant_time_compare(token, expected),
        None => false,
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
