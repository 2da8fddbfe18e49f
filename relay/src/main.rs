//! wa-relay web server.
//!
//! This binary:
//! - Loads configuration from the environment once
//! - Serves the webhook routes
//! - Shuts down gracefully on SIGINT/SIGTERM

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{router, AppState, Config, Forwarder};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "relay_starting");

    let config = Config::from_env();
    let forwarder =
        Forwarder::new(config.forward_url.clone()).context("Failed to create forwarder")?;

    info!(
        port = config.port,
        verify_token_configured = config.verify_token().is_some(),
        forward_host = ?forwarder.url().and_then(|u| u.host_str()),
        "config_loaded"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    serve(addr, AppState::new(config, forwarder)).await?;

    info!("relay_stopped");
    Ok(())
}

/// JSON lines on stdout, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();
}

async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(address = %addr, "relay_listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("Server error")
}

/// Resolves on the first SIGINT or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// server keeps running on the other one.
async fn wait_for_shutdown() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                warn!(error = %e, "sigint_handler_unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                warn!(error = %e, "sigterm_handler_unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };

    info!(signal = received, "relay_shutting_down");
}
