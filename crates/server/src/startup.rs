use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::foods::InMemoryFoodStore;

/// Any origin may call the API.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.bind_addr().parse()?)
}

/// Seed the store from the configured directory and wire up the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let store = InMemoryFoodStore::load(Path::new(&cfg.store.seed_dir), &cfg.store.extension).await?;
    let state = AppState::new(Arc::new(store));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, seed_dir = %cfg.store.seed_dir, "starting foods server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
