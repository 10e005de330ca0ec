use anyhow::{Context, Result};
use douyin_relay::{app_state::AppState, config::Config, logging, routes};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();

    let config = Arc::new(Config::from_env()?);
    let state = AppState::new(config.clone());
    if state.pipeline.log().info_enabled() {
        info!(api_host = config.api_host(), "Douyin relay started");
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
