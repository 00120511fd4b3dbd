use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Level};

use lavajato_backend::{config::Config, create_router, initialize_backend};

/// Heartbeat pings run slower than cache polling.
const HEARTBEAT_MULTIPLIER: u64 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cfg = Config::from_env()?;
    info!(
        "starting lavajato backend (cloud: {}, data dir: {})",
        cfg.db_url.is_some(),
        cfg.data_dir.display()
    );

    let state = initialize_backend(&cfg).await?;

    let _poller = state
        .sync
        .clone()
        .spawn_polling(Duration::from_secs(cfg.poll_secs));
    let _heartbeat = state.heartbeat.clone().spawn(
        Arc::clone(&state.store),
        Duration::from_secs(cfg.poll_secs * HEARTBEAT_MULTIPLIER),
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
    info!("listening on {}", cfg.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
