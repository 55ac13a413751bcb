use backoffice_search::{
    api::{build_router, AppState},
    config::Config,
    search::{SearchCache, SearchHistoryStore, SearchService},
    state::Database,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize tracing; RUST_LOG overrides the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "backoffice_search={level},tower_http={level}",
            level = config.observability.log_level
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        "Starting back-office search service v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Entity collections, populated by the CRUD services
    let db = Database::new();

    // Result cache with its background sweep
    let cache = Arc::new(SearchCache::from_config(&config.cache));
    cache.start();
    tracing::info!(
        ttl_secs = config.cache.ttl_secs,
        max_entries = config.cache.max_entries,
        "Search cache started"
    );

    let history = Arc::new(SearchHistoryStore::new(config.history.clone()));

    let search = Arc::new(SearchService::new(
        db,
        Arc::clone(&cache),
        history,
        config.search.clone(),
    ));

    let app_state = AppState::new(search, config.search.clone());
    let app = build_router(app_state);

    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Quick search: http://{}/api/global-search", http_addr);
    tracing::info!("   Full search:  http://{}/api/global-search/full", http_addr);

    axum::serve(http_listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    cache.stop();
    tracing::info!("Shutting down gracefully...");
    Ok(())
}
