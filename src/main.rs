//! realnews server binary
//!
//! Loads the TOML configuration, opens the newsroom and serves the REST API
//! until SIGTERM or Ctrl+C.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use realnews::{Config, Newsroom};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "realnews=info,tower_http=info";

/// Bilingual news site server
#[derive(Parser)]
#[command(name = "realnews")]
#[command(about = "Serve the realnews reader feeds and admin API", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (defaults apply when missing)
    #[arg(short, long, default_value = "realnews.toml")]
    config: PathBuf,

    /// Override the API bind address
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.api.bind_address = bind;
    }
    tracing::info!(config = %cli.config.display(), site = %config.site.name, "starting realnews");

    let config = Arc::new(config);
    let newsroom = Arc::new(Newsroom::new((*config).clone()).await?);

    if config.server.api.swagger_ui {
        tracing::info!(
            "Swagger UI at http://{}/swagger-ui",
            config.server.api.bind_address
        );
    }

    realnews::run_with_shutdown(newsroom, config).await?;
    Ok(())
}
