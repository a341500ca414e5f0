use axum::body::Bytes;
use serde::{Deserialize, Serialize};

pub const OCTET_STREAM: &str = "application/octet-stream";

/// One outbound call to the hosted endpoint.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub endpoint_name: String,
    pub content_type: String,
    pub body: Bytes,
}

impl InferenceRequest {
    pub fn audio(endpoint_name: impl Into<String>, body: Bytes) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            content_type: OCTET_STREAM.to_string(),
            body,
        }
    }
}

/// Reply body produced by the Whisper inference container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub success: bool,
    pub transcription: String,
    #[serde(default)]
    pub metadata: InferenceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceMetadata {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub inference_time_seconds: f64,
    #[serde(default)]
    pub audio_duration_seconds: f64,
}
