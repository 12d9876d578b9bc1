//! Serein server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use serein_core::ai::{PerplexityProvider, RewriteProvider};
use serein_core::storage::{SqliteStore, TaskStore};
use serein_server::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("serein=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting Serein server...");

    let config = Config::default();

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("Failed to open database at {}", config.database_path))?;
    store
        .initialize()
        .await
        .context("Failed to initialize database schema")?;
    info!(path = %config.database_path, "Database ready");

    let rewriter = PerplexityProvider::from_env();
    if rewriter.is_configured() {
        info!(provider = rewriter.name(), "Rewrite provider configured");
    } else {
        warn!("PERPLEXITY_API_KEY not set - rewrites will use the local fallback");
    }

    let state = AppState {
        store: Arc::new(store),
        rewriter: Arc::new(rewriter),
    };
    let app = build_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
