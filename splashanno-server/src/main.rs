mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use splashanno_core::ServerConfig;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ServerConfig::load().context("Failed to load configuration")?;

    if !config.data_file.exists() {
        tracing::warn!(
            path = %config.data_file.display(),
            "Data file does not exist yet; /data will fail until it is written"
        );
    }

    let state = AppState::new(&config);
    let app = routes::app(state, &config.admin_page);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        mode = %config.filter_mode,
        data_file = %config.data_file.display(),
        "splashanno-server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}
