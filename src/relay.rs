//! Forwards validated uploads to the inference endpoint and shapes the reply
//! into the client contract.

use crate::{
    Error, Result,
    inference::{InferenceClient, InferenceRequest, InferenceResult},
};
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// One audio file held in memory for the lifetime of a request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

impl Upload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Body returned to callers of `/transcribe` on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<InferenceResult> for TranscriptionResponse {
    fn from(result: InferenceResult) -> Self {
        let language = Some(result.metadata.language).filter(|l| !l.is_empty());
        let duration = Some(result.metadata.audio_duration_seconds).filter(|d| *d != 0.0);

        Self {
            text: result.transcription,
            language,
            duration,
        }
    }
}

pub struct Relay {
    endpoint_name: String,
    client: Arc<dyn InferenceClient>,
}

impl Relay {
    pub fn new(endpoint_name: impl Into<String>, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            client,
        }
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    /// Issues exactly one inference call for the upload.
    pub async fn transcribe(&self, upload: Upload) -> Result<TranscriptionResponse> {
        info!(
            "Processing audio file: {} ({} bytes)",
            upload.filename,
            upload.size()
        );

        let request = InferenceRequest::audio(self.endpoint_name.clone(), upload.data);
        let result = self.client.invoke(request).await.inspect_err(|e| {
            if e.is_transport() {
                error!("Endpoint unreachable for {}: {}", upload.filename, e);
            } else {
                error!("Endpoint invocation failed for {}: {}", upload.filename, e);
            }
        })?;

        if !result.success {
            error!(
                "Endpoint reported an unsuccessful transcription for {}",
                upload.filename
            );
            return Err(Error::inference("transcription failed"));
        }

        info!(
            "Transcription completed for {} (inference {:.2}s, audio {:.2}s)",
            upload.filename,
            result.metadata.inference_time_seconds,
            result.metadata.audio_duration_seconds
        );
        Ok(result.into())
    }
}
