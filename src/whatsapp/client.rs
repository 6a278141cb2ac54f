//! WhatsApp Client
//!
//! Builds the whatsapp-rust bot, forwards its lifecycle events to a
//! [`SessionEventSink`], and exposes the connected client as a [`Messenger`].

use crate::config::Recipient;
use crate::messenger::{
    ConnectionStatus, DocumentRef, Messenger, MessengerError, Result, SessionEvent,
    SessionEventSink,
};
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use wacore::download::MediaType;
use wacore::types::events::Event;
use wacore_binary::jid::Jid;
use waproto::whatsapp as wa;
use whatsapp_rust::bot::Bot;
use whatsapp_rust::client::Client;
use whatsapp_rust_sqlite_storage::SqliteStore;
use whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory;
use whatsapp_rust_ureq_http_client::UreqHttpClient;

/// File name of the library's session database inside the auth directory.
const SESSION_DB: &str = "session.db";

/// Handle to a running WhatsApp Web session.
pub struct WhatsAppClient {
    client: Arc<Client>,
}

impl WhatsAppClient {
    /// Open (or create) the session store under `auth_dir`, start the bot in
    /// a background task and return a send handle.
    ///
    /// If a paired session exists it is resumed silently; otherwise the
    /// library emits pairing QR codes which are routed to `sink`.
    pub async fn connect(auth_dir: &Path, sink: Arc<dyn SessionEventSink>) -> anyhow::Result<Self> {
        std::fs::create_dir_all(auth_dir).with_context(|| {
            format!("Failed to create auth directory {}", auth_dir.display())
        })?;

        let db_path = auth_dir.join(SESSION_DB);
        let backend = SqliteStore::new(db_path.to_string_lossy().as_ref())
            .await
            .with_context(|| format!("Failed to open session store {}", db_path.display()))?;

        let event_sink = sink.clone();
        let mut bot = Bot::builder()
            .with_backend(Arc::new(backend))
            .with_transport_factory(TokioWebSocketTransportFactory::new())
            .with_http_client(UreqHttpClient::new())
            .on_event(move |event, _client| {
                let sink = event_sink.clone();
                async move {
                    if let Some(session_event) = session_event(&event) {
                        sink.handle(session_event);
                    }
                }
            })
            .build()
            .await
            .context("Failed to build WhatsApp bot")?;

        let client = bot.client();

        sink.handle(SessionEvent::Connection {
            status: ConnectionStatus::Connecting,
            reason: None,
        });

        let handle = bot
            .run()
            .await
            .context("Failed to start WhatsApp bot")?;

        tokio::spawn(async move {
            if let Err(e) = handle.await {
                tracing::error!("WhatsApp client task error: {:?}", e);
            }
        });

        Ok(Self { client })
    }

    async fn send_message(&self, recipient: &Recipient, message: wa::Message) -> Result<()> {
        let jid = parse_jid(recipient)?;
        let id = self
            .client
            .send_message(jid, message)
            .await
            .map_err(|e| MessengerError::Send(e.to_string()))?;
        tracing::debug!("WhatsApp: message {} accepted for {}", id, recipient);
        Ok(())
    }
}

#[async_trait]
impl Messenger for WhatsAppClient {
    async fn send_text(&self, recipient: &Recipient, text: &str) -> Result<()> {
        let message = wa::Message {
            conversation: Some(text.to_string()),
            ..Default::default()
        };
        self.send_message(recipient, message).await
    }

    async fn send_document(&self, recipient: &Recipient, document: &DocumentRef) -> Result<()> {
        let bytes = tokio::fs::read(&document.path)
            .await
            .map_err(|source| MessengerError::ReadFile {
                path: document.path.clone(),
                source,
            })?;

        let upload = self
            .client
            .upload(bytes, MediaType::Document)
            .await
            .map_err(|e| MessengerError::Upload(e.to_string()))?;

        let doc = wa::message::DocumentMessage {
            url: Some(upload.url),
            direct_path: Some(upload.direct_path),
            media_key: Some(upload.media_key),
            file_enc_sha256: Some(upload.file_enc_sha256),
            file_sha256: Some(upload.file_sha256),
            file_length: Some(upload.file_length),
            mimetype: Some(document.mime_type.clone()),
            file_name: Some(document.file_name.clone()),
            title: Some(document.file_name.clone()),
            ..Default::default()
        };
        let message = wa::Message {
            document_message: Some(Box::new(doc)),
            ..Default::default()
        };
        self.send_message(recipient, message).await
    }
}

fn parse_jid(recipient: &Recipient) -> Result<Jid> {
    recipient
        .as_str()
        .parse::<Jid>()
        .map_err(|e| MessengerError::InvalidRecipient {
            jid: recipient.to_string(),
            reason: e.to_string(),
        })
}

/// Map the library events the bridge cares about; everything else is ignored.
fn session_event(event: &Event) -> Option<SessionEvent> {
    match event {
        Event::PairingQrCode { code, .. } => Some(SessionEvent::QrCode { code: code.clone() }),
        Event::PairSuccess(_) => Some(SessionEvent::CredentialsUpdated),
        Event::Connected(_) => Some(SessionEvent::Connection {
            status: ConnectionStatus::Open,
            reason: None,
        }),
        Event::Disconnected(_) => Some(SessionEvent::Connection {
            status: ConnectionStatus::Closed,
            reason: None,
        }),
        Event::LoggedOut(info) => Some(SessionEvent::Connection {
            status: ConnectionStatus::LoggedOut,
            reason: Some(format!("{:?}", info.reason)),
        }),
        _ => None,
    }
}
