//! Vacation entitlement server.
//!
//! Loads the YAML configuration, wires an in-memory record store into the
//! HTTP router, and serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vacation_engine::api::{AppState, create_router};
use vacation_engine::config::ConfigLoader;
use vacation_engine::store::InMemoryRecordStore;

#[derive(Parser)]
#[command(name = "vacation-server")]
#[command(about = "Vacation entitlement records with workbook and PDF interchange")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "VACATION_CONFIG", default_value = "./config/vacation.yaml")]
    config: PathBuf,

    /// Overrides the configured bind host
    #[arg(long, env = "VACATION_HOST")]
    host: Option<String>,

    /// Overrides the configured port
    #[arg(short, long, env = "VACATION_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vacation_engine=info,vacation_server=info,tower_http=info".into()
            }),
        )
        .init();

    let args = Args::parse();
    let mut config = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?
        .into_config();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid bind address")?;
    info!(
        sheet_name = %config.roster.sheet_name,
        page_size = config.roster.page_size,
        upload_dir = %config.upload_dir.display(),
        "Configuration loaded"
    );

    let state = AppState::new(config, Arc::new(InMemoryRecordStore::new()));
    let app = create_router(state);

    info!("Vacation server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Vacation server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
