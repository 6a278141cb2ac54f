//! Bridge Client
//!
//! Small HTTP client for a running bridge, used by the `send-text` and
//! `send-file` subcommands so scripts on the same host can hand messages
//! to WhatsApp without speaking HTTP themselves.

use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Address the bridge listens on by default.
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:3000";

const TEXT_TIMEOUT: Duration = Duration::from_secs(10);
const FILE_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to bridge failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bridge answered {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("cannot resolve {path}: {source}")]
    Path {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub struct BridgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the bridge to send `text` to every recipient.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        self.post("/send-text", json!({ "text": text }), TEXT_TIMEOUT)
            .await
    }

    /// Ask the bridge to send a local file. The path is made absolute first
    /// because the bridge resolves relative paths against its own directory.
    pub async fn send_file(&self, path: &Path, filename: Option<&str>) -> Result<()> {
        let absolute = std::path::absolute(path).map_err(|source| ClientError::Path {
            path: path.display().to_string(),
            source,
        })?;

        let mut body = json!({ "path": absolute.to_string_lossy() });
        if let Some(name) = filename {
            body["filename"] = Value::String(name.to_string());
        }

        self.post("/send-file", body, FILE_TIMEOUT).await
    }

    async fn post(&self, route: &str, body: Value, timeout: Duration) -> Result<()> {
        let url = format!("{}{}", self.base_url, route);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Bridge accepted {}", route);
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(text);

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_send_text_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send-text")
            .match_body(Matcher::Json(json!({ "text": "walk-in interview at 10am" })))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = BridgeClient::new(server.url());
        client.send_text("walk-in interview at 10am").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_file_sends_absolute_path() {
        let mut server = mockito::Server::new_async().await;
        let expected = std::path::absolute("downloads/list.pdf").unwrap();
        let mock = server
            .mock("POST", "/send-file")
            .match_body(Matcher::Json(json!({
                "path": expected.to_string_lossy(),
                "filename": "list.pdf",
            })))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = BridgeClient::new(format!("{}/", server.url()));
        client
            .send_file(Path::new("downloads/list.pdf"), Some("list.pdf"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_carries_bridge_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/send-file")
            .with_status(404)
            .with_body(r#"{"error":"file not found"}"#)
            .create_async()
            .await;

        let client = BridgeClient::new(server.url());
        let err = client
            .send_file(Path::new("/nope/missing.pdf"), None)
            .await
            .unwrap_err();
        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "file not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BridgeClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base_url(), DEFAULT_BRIDGE_URL);
    }
}
