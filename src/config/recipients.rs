//! Recipient list loading.
//!
//! The file is read once at startup. Any failure here is fatal for the
//! process; there is no degraded mode without recipients.

use super::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Server part of a personal-account JID.
pub const JID_SERVER: &str = "s.whatsapp.net";

/// On-disk shape of `whatsapp_config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientFile {
    pub recipient_numbers_msisdn: Vec<String>,
}

/// A single WhatsApp address (JID) messages are fanned out to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipient(String);

impl Recipient {
    /// Build a JID from a phone number in international format.
    ///
    /// A leading `+` and surrounding whitespace are dropped. Values that
    /// already carry a server part (`...@s.whatsapp.net`, `...@g.us`) are
    /// taken verbatim.
    pub fn from_msisdn(number: &str) -> Result<Self> {
        let trimmed = number.trim();
        if trimmed.contains('@') {
            return Ok(Self(trimmed.to_string()));
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidNumber(number.to_string()));
        }

        Ok(Self(format!("{digits}@{JID_SERVER}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the recipient file and convert every number to a JID, keeping file order.
pub fn load_recipients(path: &Path) -> Result<Vec<Recipient>> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: RecipientFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let recipients = file
        .recipient_numbers_msisdn
        .iter()
        .map(|n| Recipient::from_msisdn(n))
        .collect::<Result<Vec<_>>>()?;

    if recipients.is_empty() {
        tracing::warn!(
            "Recipient file {} lists no numbers; sends will be no-ops",
            path.display()
        );
    } else {
        tracing::debug!(
            "Loaded {} recipient(s) from {}",
            recipients.len(),
            path.display()
        );
    }

    Ok(recipients)
}
