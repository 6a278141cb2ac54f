use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MessengerError>;

/// Failures raised while handing a message to the client library.
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("invalid recipient {jid}: {reason}")]
    InvalidRecipient { jid: String, reason: String },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("media upload failed: {0}")]
    Upload(String),

    #[error("send failed: {0}")]
    Send(String),
}
