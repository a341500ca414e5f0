use super::{
    error::ApiError,
    types::{HealthResponse, STATUS_NOT_IMPLEMENTED, StatusResponse},
    upload::read_upload,
};
use crate::{
    config::Config,
    inference::InferenceClient,
    relay::{Relay, TranscriptionResponse},
};
use axum::{
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    response::Json,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn InferenceClient>) -> Self {
        let relay = Relay::new(config.inference.endpoint_name.clone(), client);
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        endpoint: state.relay.endpoint_name().to_string(),
    })
}

pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!("Failed to parse multipart form: {}", e);
        ApiError::MalformedRequest
    })?;

    let upload = read_upload(multipart, &state.config.upload)
        .await
        .inspect_err(|e| warn!("Rejected upload: {}", e.message()))?;

    // The cause is logged by the relay; callers only see a generic message
    let response = state
        .relay
        .transcribe(upload)
        .await
        .map_err(|_| ApiError::TranscriptionFailed)?;

    Ok(Json(response))
}

pub async fn status(Path(job_id): Path<String>) -> Result<Json<StatusResponse>, ApiError> {
    if job_id.trim().is_empty() {
        return Err(ApiError::MissingJobId);
    }

    info!("Status requested for job: {}", job_id);
    Ok(Json(StatusResponse {
        job_id,
        status: STATUS_NOT_IMPLEMENTED.to_string(),
        message: "Async processing not yet implemented".to_string(),
    }))
}

pub async fn status_without_id() -> ApiError {
    ApiError::MissingJobId
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
