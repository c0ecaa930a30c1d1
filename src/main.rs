// ABOUTME: Entry point for the mockapi binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and serves the mock API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mockapi_server::{AppState, MockConfig, ROUTE_TABLE, create_router};

/// Local mock of the libraries, organizations and access-check API.
#[derive(Debug, Parser)]
#[command(name = "mockapi", version, about)]
struct Cli {
    /// Socket address to bind, overriding MOCKAPI_BIND.
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on, applied on top of the bind address.
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "mockapi=debug,mockapi_server=debug,mockapi_core=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = MockConfig::load(cli.bind.as_deref(), cli.port)?;

    let state = Arc::new(AppState::seeded());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("mock server listening on http://{}", config.bind);
    for (method, path) in ROUTE_TABLE {
        tracing::info!("  {:<6} http://{}{}", method, config.bind, path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("mock server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
