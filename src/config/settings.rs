//! Process settings.
//!
//! Precedence, lowest first: built-in defaults, optional TOML file,
//! `WA_BRIDGE_*` environment variables. Relative paths are resolved
//! against the deployment root passed on the command line.

use super::error::Result;
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `WA_BRIDGE_PORT=3001`.
pub const ENV_PREFIX: &str = "WA_BRIDGE";

/// Maximum accepted request body (25 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeSettings {
    /// Listen address. Loopback only unless explicitly overridden.
    pub host: IpAddr,
    pub port: u16,
    pub recipients_file: PathBuf,
    /// Library-owned session/credential storage.
    pub auth_dir: PathBuf,
    pub body_limit_bytes: usize,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            recipients_file: PathBuf::from("config/whatsapp_config.json"),
            auth_dir: PathBuf::from("whatsapp/auth_info"),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl BridgeSettings {
    /// Load settings from defaults, `file` (if given) and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("host", defaults.host.to_string())?
            .set_default("port", i64::from(defaults.port))?
            .set_default(
                "recipients_file",
                defaults.recipients_file.to_string_lossy().into_owned(),
            )?
            .set_default("auth_dir", defaults.auth_dir.to_string_lossy().into_owned())?
            .set_default("body_limit_bytes", defaults.body_limit_bytes as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn recipients_path(&self, root: &Path) -> PathBuf {
        root.join(&self.recipients_file)
    }

    pub fn auth_path(&self, root: &Path) -> PathBuf {
        root.join(&self.auth_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = BridgeSettings::default();
        assert_eq!(settings.listen_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(settings.body_limit_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "port = 3100").unwrap();
        writeln!(file, "recipients_file = \"/etc/bridge/recipients.json\"").unwrap();
        file.flush().unwrap();

        let settings = BridgeSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.port, 3100);
        assert_eq!(settings.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(
            settings.recipients_path(Path::new("/srv/bridge")),
            PathBuf::from("/etc/bridge/recipients.json")
        );
        assert_eq!(
            settings.auth_path(Path::new("/srv/bridge")),
            PathBuf::from("/srv/bridge/whatsapp/auth_info")
        );
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BridgeSettings::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
