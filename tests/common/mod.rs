#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chatbot_gateway::routes::create_router;
use chatbot_gateway::services::generator::{
    GeneratedSequence, GenerationService, GeneratorError, SamplingConfig, TextGenerator,
};
use chatbot_gateway::state::{AppState, SharedState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Call {
    pub prompt: String,
    pub sampling: SamplingConfig,
}

pub enum Behavior {
    Continue,
    Empty,
    Fail,
}

/// Fake generator that records every call and tracks how many run at once.
#[derive(Clone)]
pub struct RecordingGenerator {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    behavior: Arc<Behavior>,
    delay: Duration,
}

impl RecordingGenerator {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            behavior: Arc::new(behavior),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<Vec<GeneratedSequence>, GeneratorError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            sampling: *sampling,
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match *self.behavior {
            Behavior::Continue => Ok(vec![
                GeneratedSequence {
                    generated_text: format!("{prompt} and then the story went on"),
                },
                GeneratedSequence {
                    generated_text: "second candidate".to_string(),
                },
            ]),
            Behavior::Empty => Ok(vec![]),
            Behavior::Fail => Err(GeneratorError::Api {
                status: 503,
                message: "Model gpt2 is currently loading".to_string(),
            }),
        }
    }

    fn model(&self) -> &str {
        "gpt2"
    }
}

pub fn service(generator: RecordingGenerator) -> GenerationService {
    GenerationService::new(Box::new(generator), SamplingConfig::default())
}

pub fn app(generator: RecordingGenerator, max_message_bytes: usize) -> Router {
    app_with_state(generator, max_message_bytes).0
}

pub fn app_with_state(
    generator: RecordingGenerator,
    max_message_bytes: usize,
) -> (Router, SharedState) {
    let state = Arc::new(AppState::new(
        service(generator),
        Duration::from_secs(60),
        max_message_bytes,
    ));
    (create_router().with_state(state.clone()), state)
}
