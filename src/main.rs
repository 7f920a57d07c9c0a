use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{routing::get, Router};
use dashmap::DashMap;
use hex_drift_words::{
    config::Config,
    dictionary::{Dictionary, DictionaryApiOracle, OfflineOracle, WordOracle},
    game::WordValidator,
    routes, websocket, AppState,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hex_drift_words=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hex Drift Words server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let validator = Arc::new(build_validator(&config)?);

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        validator,
        sessions: DashMap::new(),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve the display layer's static files
    let frontend_service = ServeDir::new(&config.server.frontend_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire the word oracle named by the config to the fallback list
fn build_validator(config: &Config) -> Result<WordValidator> {
    let oracle: Arc<dyn WordOracle> = if config.dictionary.api_enabled {
        // Create shared HTTP client for reusing connections
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.dictionary.timeout_secs))
            .build()?;
        tracing::info!("Dictionary API enabled at {}", config.dictionary.api_url);
        Arc::new(DictionaryApiOracle::new(
            http_client,
            config.dictionary.api_url.clone(),
        ))
    } else {
        tracing::warn!("Dictionary API disabled; only the fallback word list will be accepted");
        Arc::new(OfflineOracle)
    };

    Ok(WordValidator::new(oracle, Dictionary::fallback()))
}
