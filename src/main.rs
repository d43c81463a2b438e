use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_proxy::config::Config;
use blog_proxy::fetcher::Fetcher;
use blog_proxy::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_proxy=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("BLOG_PROXY_CONFIG").unwrap_or_else(|_| "blog-proxy.toml".to_string());
    let mut config = if Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        Config::load(&config_path)?
    } else {
        info!("No configuration at {}, using defaults", config_path);
        Config::default()
    };
    if let Ok(url) = std::env::var("UPSTREAM_URL") {
        config.upstream.url = url;
    }

    let fetcher = Arc::new(Fetcher::new(&config.upstream)?);
    info!(
        "Proxying {} (timeout {}s)",
        fetcher.base_url(),
        config.upstream.timeout_secs
    );

    let state = Arc::new(AppState { fetcher });
    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server starting on http://{}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
