//! WhatsApp Integration
//!
//! Connects to WhatsApp Web through the whatsapp-rust library and offers the
//! session as the bridge's [`Messenger`](crate::messenger::Messenger).
//! Session credentials live in a SQLite store managed by the library.

mod client;

pub use client::WhatsAppClient;
