use async_trait::async_trait;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use whisper_relay::{
    Error, Result,
    inference::{InferenceClient, InferenceMetadata, InferenceRequest, InferenceResult},
};

#[derive(Debug, Clone)]
enum Behaviour {
    Reply(InferenceResult),
    /// Transcription is the request body decoded as UTF-8
    Echo,
    Fail(String),
}

/// Stub inference endpoint that counts and records every invocation.
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    behaviour: Behaviour,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::replying(create_inference_result("hello world", "en", 3.5))
    }

    pub fn replying(result: InferenceResult) -> Self {
        Self {
            behaviour: Behaviour::Reply(result),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self {
            behaviour: Behaviour::Echo,
            ..Self::new()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behaviour: Behaviour::Fail(message.to_string()),
            ..Self::new()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn get_requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke(&self, request: InferenceRequest) -> Result<InferenceResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behaviour {
            Behaviour::Reply(result) => Ok(result.clone()),
            Behaviour::Echo => Ok(create_inference_result(
                &String::from_utf8_lossy(&request.body),
                "en",
                1.0,
            )),
            Behaviour::Fail(message) => Err(Error::inference(message.clone())),
        }
    }
}

pub fn create_inference_result(text: &str, language: &str, duration: f64) -> InferenceResult {
    InferenceResult {
        success: true,
        transcription: text.to_string(),
        metadata: InferenceMetadata {
            language: language.to_string(),
            task: "transcribe".to_string(),
            model: "whisper-large-v3".to_string(),
            inference_time_seconds: 0.8,
            audio_duration_seconds: duration,
        },
    }
}

pub fn create_failed_result() -> InferenceResult {
    InferenceResult {
        success: false,
        transcription: String::new(),
        metadata: InferenceMetadata::default(),
    }
}
