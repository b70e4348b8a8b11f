use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

use readsim_server::cli::create_cli;
use readsim_server::consts::{PKG_NAME, VERSION};
use readsim_server::{AppState, ServerConfig, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = create_cli().get_matches();
    let config = ServerConfig::from_matches(&matches)?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    info!("{} {}", PKG_NAME, VERSION);
    let state = AppState::from_config(&config)?;
    info!(
        "Serving {} ({} sequences) from {}",
        state.index.genome(),
        state.index.len(),
        state.source.location()
    );

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
