use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::CONTENT_TYPE},
};
use serde_json::Value;
use std::sync::Arc;
use whisper_relay::{
    config::{Config, InferenceConfig, LogsConfig, ServerConfig, UploadConfig},
    inference::InferenceClient,
    server::{self, AppState},
};

pub const TEST_ENDPOINT: &str = "whisper-test-endpoint";
pub const BOUNDARY: &str = "relay-test-boundary";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        inference: InferenceConfig {
            endpoint_name: TEST_ENDPOINT.to_string(),
            region: "eu-west-1".to_string(),
            runtime_url: None,
            timeout_secs: 5,
        },
        upload: UploadConfig::default(),
    }
}

pub fn create_test_app(config: Config, client: Arc<dyn InferenceClient>) -> Router {
    server::router(AppState::new(config, client))
}

/// One part of a multipart form. `filename` is `None` for plain values.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Build a `/transcribe` request carrying a single audio file
pub fn audio_request(filename: &str, data: &[u8]) -> Request<Body> {
    multipart_request(&[FormPart {
        name: "audio",
        filename: Some(filename),
        data,
    }])
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
