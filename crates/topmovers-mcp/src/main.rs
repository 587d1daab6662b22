use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use topmovers_core::{AlphaVantageClient, MoversSource};
use topmovers_mcp::routes::{self, MCP_PATH};
use topmovers_mcp::{ServerArgs, ServerConfig, ServerError, TopMoversServer, WidgetAssets};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be applied before clap and the log filter read the environment.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "topmovers-server stopped");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_args(ServerArgs::parse())?;

    let widget = Arc::new(WidgetAssets::load(&config.widget_dir));
    let source: Arc<dyn MoversSource> = Arc::new(AlphaVantageClient::new(config.api_key.clone())?);
    let app = routes::router(TopMoversServer::new(source, widget));

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;

    tracing::info!(addr = %config.addr, mcp = MCP_PATH, "topmovers MCP server listening");
    tracing::info!(api_key = %config.api_key.redacted(), "using Alpha Vantage API key");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
