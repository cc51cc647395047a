mod config;
mod errors;
mod loader;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::render::PageRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SupabaseProfileSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV page v{}", env!("CARGO_PKG_VERSION"));

    let profiles = SupabaseProfileSource::new(
        &config.supabase_url,
        config.supabase_anon_key.clone(),
        config.profile_table.clone(),
        config.fetch_timeout,
    )
    .context("Failed to build profile store client")?;
    info!(
        "Profile store: {} (table '{}')",
        config.supabase_url, config.profile_table
    );

    let renderer = PageRenderer::new().context("Failed to compile page templates")?;
    info!("Assets directory: {}", config.assets_dir.display());

    let state = AppState {
        config: config.clone(),
        profiles: Arc::new(profiles),
        renderer: Arc::new(renderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
