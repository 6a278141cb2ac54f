//! Session lifecycle hooks.
//!
//! The client library owns authentication and persistence. The bridge only
//! observes it: connection transitions are logged, credential updates are
//! acknowledged, and pairing codes are drawn on the operator's terminal.

use qrcode::QrCode;
use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed,
    LoggedOut,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Open => "open",
            ConnectionStatus::Closed => "close",
            ConnectionStatus::LoggedOut => "logged out",
        };
        f.write_str(s)
    }
}

/// Lifecycle signal forwarded from the client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The library stored new credential material.
    CredentialsUpdated,
    Connection {
        status: ConnectionStatus,
        /// Last disconnect reason, when the library reports one.
        reason: Option<String>,
    },
    /// Interactive login required: the operator must scan this code.
    QrCode { code: String },
}

/// Receiver for [`SessionEvent`]s. Called from the client's event task.
pub trait SessionEventSink: Send + Sync {
    fn handle(&self, event: SessionEvent);
}

/// Logs lifecycle events and prints pairing codes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEventSink;

impl SessionEventSink for TerminalEventSink {
    fn handle(&self, event: SessionEvent) {
        match event {
            SessionEvent::CredentialsUpdated => {
                tracing::info!("WhatsApp: credentials updated");
            }
            SessionEvent::Connection { status, reason } => match (status, reason) {
                (ConnectionStatus::Closed | ConnectionStatus::LoggedOut, Some(reason)) => {
                    tracing::warn!("WhatsApp: connection {} ({})", status, reason);
                }
                (ConnectionStatus::Closed | ConnectionStatus::LoggedOut, None) => {
                    tracing::warn!("WhatsApp: connection {}", status);
                }
                (_, _) => {
                    tracing::info!("WhatsApp: connection {}", status);
                }
            },
            SessionEvent::QrCode { code } => {
                tracing::info!("WhatsApp: QR code available (scan with your phone)");
                match render_qr(&code) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        tracing::error!("WhatsApp: failed to render QR code: {}", e);
                        println!("{code}");
                    }
                }
            }
        }
    }
}

/// Render `code` as a compact block-character QR suitable for a terminal.
pub fn render_qr(code: &str) -> Result<String, QrError> {
    let qr = QrCode::new(code.as_bytes())?;
    Ok(qr
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}
