//! Messaging Client Abstraction
//!
//! The bridge never speaks the WhatsApp protocol itself. Everything it needs
//! from the underlying client library is captured by [`Messenger`], so the
//! HTTP layer can be driven by the real client or by a test double.

mod error;
mod events;

pub use error::{MessengerError, Result};
pub use events::{ConnectionStatus, SessionEvent, SessionEventSink, TerminalEventSink, render_qr};

use crate::config::Recipient;
use async_trait::async_trait;
use std::path::PathBuf;

/// A local file to be delivered as a document attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Absolute path on the local filesystem.
    pub path: PathBuf,
    pub mime_type: String,
    /// Name shown to the recipient.
    pub file_name: String,
}

/// A message built for one request and sent to every recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Text(String),
    Document(DocumentRef),
}

impl OutboundMessage {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::Text(_) => "text",
            OutboundMessage::Document(_) => "file",
        }
    }
}

/// Send capability exposed by a connected messaging client.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a plain text message.
    async fn send_text(&self, recipient: &Recipient, text: &str) -> Result<()>;

    /// Send a local file as a document attachment.
    async fn send_document(&self, recipient: &Recipient, document: &DocumentRef) -> Result<()>;

    /// Dispatch an [`OutboundMessage`] to the matching send method.
    async fn send(&self, recipient: &Recipient, message: &OutboundMessage) -> Result<()> {
        match message {
            OutboundMessage::Text(text) => self.send_text(recipient, text).await,
            OutboundMessage::Document(document) => self.send_document(recipient, document).await,
        }
    }
}
