//! Configuration
//!
//! Two layers: process settings (bind address, file locations) merged from
//! defaults, an optional TOML file and `WA_BRIDGE_*` environment variables,
//! and the JSON recipient list read once at startup.

mod error;
mod recipients;
mod settings;

pub use error::{ConfigError, Result};
pub use recipients::{JID_SERVER, Recipient, RecipientFile, load_recipients};
pub use settings::{BridgeSettings, DEFAULT_BODY_LIMIT, ENV_PREFIX};
