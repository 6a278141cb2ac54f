//! HTTP Bridge
//!
//! Loopback HTTP API that fans a message out to every configured recipient.
//!
//! - `GET  /`: liveness
//! - `POST /send-text`: `{ "text": "..." }`
//! - `POST /send-file`: `{ "path": "...", "filename": "..."? }`

mod error;
mod handlers;
pub mod media;

pub use error::BridgeError;

use crate::config::{BridgeSettings, Recipient};
use crate::messenger::{self, Messenger, OutboundMessage};
use anyhow::Context;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Service name reported by the liveness endpoint.
pub const SERVICE_NAME: &str = "whatsapp-bridge";

/// Everything a request handler needs: the client handle and the fixed
/// recipient list. Both are read-only for the life of the process.
#[derive(Clone)]
pub struct BridgeContext {
    messenger: Arc<dyn Messenger>,
    recipients: Arc<[Recipient]>,
}

impl BridgeContext {
    pub fn new(messenger: Arc<dyn Messenger>, recipients: Vec<Recipient>) -> Self {
        Self {
            messenger,
            recipients: recipients.into(),
        }
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Send `message` to each recipient in order, awaiting every send.
    ///
    /// Stops at the first failure. Sends that already completed stay sent.
    pub async fn deliver(&self, message: &OutboundMessage) -> messenger::Result<()> {
        for recipient in self.recipients.iter() {
            self.messenger.send(recipient, message).await?;
            tracing::info!("WhatsApp: sent {} to {}", message.kind(), recipient);
        }
        Ok(())
    }
}

/// Build the bridge router around an explicitly constructed context.
pub fn router(ctx: BridgeContext, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/send-text", post(handlers::send_text))
        .route("/send-file", post(handlers::send_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(ctx: BridgeContext, settings: &BridgeSettings) -> anyhow::Result<()> {
    let addr = settings.listen_addr();
    let jids = ctx
        .recipients()
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let app = router(ctx, settings.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Bridge listening on http://{}", addr);
    tracing::info!("Recipient JIDs: {}", jids);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
