//! whatsapp-bridge binary
//!
//! `serve` (the default) runs the bridge; `send-text` and `send-file` talk
//! to a bridge that is already running.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use whatsapp_bridge::client::{BridgeClient, DEFAULT_BRIDGE_URL};
use whatsapp_bridge::config::{BridgeSettings, load_recipients};
use whatsapp_bridge::messenger::Messenger;
use whatsapp_bridge::server::{self, BridgeContext};

#[derive(Debug, Parser)]
#[command(name = "whatsapp-bridge", version, about = "Local HTTP bridge to WhatsApp")]
struct Cli {
    /// Deployment root; relative settings paths are resolved against it
    #[arg(long, global = true, default_value = ".", env = "WA_BRIDGE_ROOT")]
    root: PathBuf,

    /// Optional TOML settings file
    #[arg(long, global = true, env = "WA_BRIDGE_SETTINGS")]
    settings: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to WhatsApp and serve the HTTP bridge
    Serve,

    /// Send a text message through a running bridge
    SendText {
        text: String,

        #[arg(long, default_value = DEFAULT_BRIDGE_URL, env = "WA_BRIDGE_URL")]
        url: String,
    },

    /// Send a local file through a running bridge
    SendFile {
        path: PathBuf,

        /// Name shown to recipients (defaults to the file's base name)
        #[arg(long)]
        filename: Option<String>,

        #[arg(long, default_value = DEFAULT_BRIDGE_URL, env = "WA_BRIDGE_URL")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.root, cli.settings.as_deref()).await,
        Command::SendText { text, url } => {
            BridgeClient::new(url)
                .send_text(&text)
                .await
                .context("send-text failed")?;
            tracing::info!("Text forwarded to bridge");
            Ok(())
        }
        Command::SendFile {
            path,
            filename,
            url,
        } => {
            BridgeClient::new(url)
                .send_file(&path, filename.as_deref())
                .await
                .context("send-file failed")?;
            tracing::info!("File {} forwarded to bridge", path.display());
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "whatsapp_bridge=info,tower_http=info".into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn serve(root: &Path, settings_file: Option<&Path>) -> Result<()> {
    let settings = BridgeSettings::load(settings_file).context("Failed to load settings")?;

    let recipients_path = settings.recipients_path(root);
    let recipients = load_recipients(&recipients_path).with_context(|| {
        format!(
            "Failed to load recipients from {}",
            recipients_path.display()
        )
    })?;

    let messenger = connect_messenger(&settings.auth_path(root)).await?;
    let ctx = BridgeContext::new(messenger, recipients);

    server::serve(ctx, &settings).await
}

#[cfg(feature = "whatsapp")]
async fn connect_messenger(auth_dir: &Path) -> Result<Arc<dyn Messenger>> {
    use whatsapp_bridge::messenger::TerminalEventSink;
    use whatsapp_bridge::whatsapp::WhatsAppClient;

    let client = WhatsAppClient::connect(auth_dir, Arc::new(TerminalEventSink))
        .await
        .context("Failed to start WhatsApp client")?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "whatsapp"))]
async fn connect_messenger(_auth_dir: &Path) -> Result<Arc<dyn Messenger>> {
    Err(anyhow::anyhow!(
        "whatsapp-bridge was built without the `whatsapp` feature"
    ))
}
