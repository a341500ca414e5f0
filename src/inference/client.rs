use super::types::*;
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use aws_config::{
    BehaviorVersion, ConfigLoader, Region, retry::RetryConfig, timeout::TimeoutConfig,
};
use aws_sdk_sagemakerruntime::{
    Client,
    config::Credentials,
    error::{DisplayErrorContext, SdkError},
    primitives::Blob,
};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn invoke(&self, request: InferenceRequest) -> Result<InferenceResult>;
}

/// Calls the SageMaker runtime `InvokeEndpoint` API with SigV4-signed requests.
///
/// Retries are disabled: one upload maps to exactly one invocation.
pub struct SageMakerClient {
    client: Client,
}

impl SageMakerClient {
    /// Uses the default AWS credential chain (env, profile, container or instance role).
    pub async fn new(config: &InferenceConfig) -> Self {
        let sdk_config = loader(config).load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// Signs with fixed credentials instead of the default chain.
    pub async fn with_credentials(config: &InferenceConfig, credentials: Credentials) -> Self {
        let sdk_config = loader(config).credentials_provider(credentials).load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

fn loader(config: &InferenceConfig) -> ConfigLoader {
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(config.timeout_secs))
        .build();

    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .retry_config(RetryConfig::disabled())
        .timeout_config(timeouts);

    match &config.runtime_url {
        Some(url) => loader.endpoint_url(url.clone()),
        None => loader,
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Error::transport(detail),
        _ => Error::inference(detail),
    }
}

#[async_trait]
impl InferenceClient for SageMakerClient {
    async fn invoke(&self, request: InferenceRequest) -> Result<InferenceResult> {
        debug!(
            "Invoking endpoint {} with {} bytes",
            request.endpoint_name,
            request.body.len()
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(request.endpoint_name)
            .content_type(request.content_type)
            .accept("application/json")
            .body(Blob::new(request.body.to_vec()))
            .send()
            .await
            .map_err(map_sdk_error)?;

        let body: Option<Blob> = output.body.into();
        let body = body.ok_or_else(|| Error::inference("endpoint returned an empty body"))?;
        let result: InferenceResult = serde_json::from_slice(body.as_ref())?;

        debug!(
            "Endpoint replied success={} in {:.2}s",
            result.success, result.metadata.inference_time_seconds
        );
        Ok(result)
    }
}
