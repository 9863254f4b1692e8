pub mod chart;
pub mod forecast_api;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::forecast::ModelRegistry;
use crate::services::QuoteClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub quotes: Arc<QuoteClient>,
}

// FromRef implementations to extract specific state components
impl FromRef<AppState> for Arc<ModelRegistry> {
    fn from_ref(app_state: &AppState) -> Arc<ModelRegistry> {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for Arc<QuoteClient> {
    fn from_ref(app_state: &AppState) -> Arc<QuoteClient> {
        app_state.quotes.clone()
    }
}

/// Start the axum server
pub async fn serve(
    registry: Arc<ModelRegistry>,
    quotes: Arc<QuoteClient>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting aipricecast server");

    let app_state = AppState { registry, quotes };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /forecast/model-status");
    tracing::info!("  GET  /forecast/available-models");
    tracing::info!("  POST /forecast/load-model");
    tracing::info!("  POST /forecast/predict");

    let app = Router::new()
        .route("/health", get(forecast_api::health_handler))
        .route(
            "/forecast/model-status",
            get(forecast_api::model_status_handler),
        )
        .route(
            "/forecast/available-models",
            get(forecast_api::available_models_handler),
        )
        .route(
            "/forecast/load-model",
            post(forecast_api::load_model_handler),
        )
        .route("/forecast/predict", post(forecast_api::predict_handler))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
