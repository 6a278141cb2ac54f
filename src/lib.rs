//! WhatsApp Bridge
//!
//! Local HTTP service that lets other processes on the machine send text
//! and files to a fixed list of WhatsApp recipients. Protocol, session and
//! encryption work is left to the whatsapp-rust client library.

pub mod client;
pub mod config;
pub mod messenger;
pub mod server;

#[cfg(feature = "whatsapp")]
pub mod whatsapp;

#[cfg(test)]
mod tests;
