mod client;
mod types;

pub use client::{InferenceClient, SageMakerClient};
pub use types::{InferenceMetadata, InferenceRequest, InferenceResult, OCTET_STREAM};
