use quotable_search::{
    api::{build_router, AppState},
    backend::SearchBackend,
    config::Config,
    models::{load_authors, load_quotes},
    search::TantivyBackend,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "quotable_search={},tower_http=info",
            config.observability.log_level
        )
        .into()
    });

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Quotable Search v{}", env!("CARGO_PKG_VERSION"));

    // Load seed data
    let quotes = load_quotes(&config.data.quotes_path)?;
    let authors = load_authors(&config.data.authors_path)?;

    // Build the search indexes off the async runtime
    let search_config = config.search.clone();
    let backend = tokio::task::spawn_blocking(move || {
        TantivyBackend::build(&search_config, &quotes, &authors)
    })
    .await??;

    match &config.search.index_path {
        Some(path) => tracing::info!(path = %path.display(), "Search indexes stored on disk"),
        None => tracing::info!("Search indexes held in memory"),
    }

    let backend: Arc<dyn SearchBackend> = Arc::new(backend);
    let app = build_router(AppState::from_backend(backend));

    // Start HTTP server
    let http_addr = config.bind_address();
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Random quote: http://{}/random", http_addr);
    tracing::info!("   Search: http://{}/search/quotes, /search/authors", http_addr);

    axum::serve(http_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
