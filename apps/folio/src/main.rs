mod config;
mod editor;
mod errors;
mod form;
mod gateway;
mod models;
mod photo;
mod preview;
mod shell;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::HttpGateway;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "folio", version)]
#[command(about = "Build a portfolio profile, save it, and download a generated CV")]
struct Cli {
    /// Backend base URL (overrides FOLIO_BACKEND_URL and FOLIO_ORIGIN)
    #[arg(long)]
    backend_url: Option<String>,

    /// Directory downloaded CVs are written to (overrides FOLIO_DOWNLOAD_DIR)
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.backend_url {
        config.apply_backend_override(&url)?;
    }
    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }

    // Logs go to stderr; stdout belongs to the editor.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    let gateway = HttpGateway::new(&config.backend_url, config.request_timeout)?;
    info!("Backend gateway initialized ({})", gateway.base_url());

    let state = AppState {
        gateway: Arc::new(gateway),
        config,
    };

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(state, stdin, std::io::stdout()).await
}
