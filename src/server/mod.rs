mod error;
pub mod handlers;
mod middleware;
mod types;
mod upload;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::REQUEST_ID_HEADER;
pub use types::{ErrorResponse, HealthResponse, StatusResponse};
pub use upload::{AUDIO_FIELD, extension_of};

use crate::{Result, config::Config, inference::SageMakerClient};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let body_limit = state
        .config
        .upload
        .max_file_size
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);
    let cors = middleware::cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/transcribe",
            post(handlers::transcribe).fallback(handlers::method_not_allowed),
        )
        .route(
            "/status/",
            get(handlers::status_without_id).fallback(handlers::method_not_allowed),
        )
        .route(
            "/status/*id",
            get(handlers::status).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::access_log))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    info!("Inference endpoint: {}", config.inference.endpoint_name);
    info!("AWS region: {}", config.inference.region);
    if let Some(url) = &config.inference.runtime_url {
        info!("Runtime endpoint override: {}", url);
    }

    let client = SageMakerClient::new(&config.inference).await;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let app = router(AppState::new(config, Arc::new(client)));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
