//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! shared with the handlers. Handlers never look at the environment.

use std::env;

use tracing::warn;
use url::Url;

/// Port used when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 3001;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret Meta sends back as `hub.verify_token`
    pub verify_token: Option<String>,

    /// Downstream n8n webhook that receives forwarded events
    pub forward_url: Option<Url>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_port("PORT", DEFAULT_PORT),

            verify_token: parse_secret("VERIFY_TOKEN"),

            forward_url: parse_url("N8N_WEBHOOK_URL"),
        }
    }

    /// The verify token, if one is configured and non-empty.
    pub fn verify_token(&self) -> Option<&str> {
        self.verify_token.as_deref().filter(|t| !t.is_empty())
    }
}

fn parse_port(name: &str, default: u16) -> u16 {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid port, using default");
            default
        }
    }
}

/// Secrets are compared byte-for-byte, so no trimming here.
fn parse_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_url(name: &str) -> Option<Url> {
    let raw = env::var(name).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(env_var = name, scheme = url.scheme(), "Unsupported URL scheme, ignoring");
            None
        }
        Err(e) => {
            warn!(env_var = name, error = %e, "Invalid URL, ignoring");
            None
        }
    }
}
