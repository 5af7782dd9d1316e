use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use farewise_api::{app, app_config::Config, AppState};
use farewise_catalog::FixtureStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farewise_api=debug,farewise_listing=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Farewise API on port {}", config.server.port);

    let store = FixtureStore::seeded().context("Failed to load fare catalog")?;
    let app_state = AppState::new(Arc::new(store), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app(app_state)).await.context("Server error")?;
    Ok(())
}
