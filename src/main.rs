use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinemate::api::{create_router, AppState};
use cinemate::catalog::{ensure_asset, Catalog};
use cinemate::config::Config;
use cinemate::services::TmdbProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinemate=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Startup aborted");
            return Err(e);
        }
    };

    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    // Fetch data files that are not on disk yet
    ensure_asset(&http_client, &config.movies_path, config.movies_url.as_deref())
        .await
        .context("Failed to prepare movie table")?;
    ensure_asset(
        &http_client,
        &config.similarity_path,
        config.similarity_url.as_deref(),
    )
    .await
    .context("Failed to prepare similarity matrix")?;

    let catalog = Catalog::load(&config.movies_path, &config.similarity_path)
        .await
        .context("Failed to load catalog")?;

    let provider = TmdbProvider::new(
        http_client,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
    );

    let state = AppState::new(Arc::new(catalog), Arc::new(provider));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
