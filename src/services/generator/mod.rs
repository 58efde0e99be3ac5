//! Text generation seam.
//!
//! The language model itself lives behind [`TextGenerator`]; this crate only
//! decides what prompt and sampling parameters go in and which candidate comes
//! back out. [`GenerationService`] is the single entry point handlers use.

pub mod hf_inference;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

pub use hf_inference::HfInferenceClient;

pub const DEFAULT_MAX_LENGTH: u32 = 50;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: u32 = 50;
pub const DEFAULT_TOP_P: f32 = 0.9;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("generator API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid generator response: {0}")]
    InvalidResponse(String),

    #[error("generator returned no candidates")]
    EmptyResult,
}

/// Decoding parameters passed with every prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Upper bound on generated tokens.
    pub max_length: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
        }
    }
}

/// One candidate continuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSequence {
    pub generated_text: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate candidates for `prompt`. Order is the backend's ranking.
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<Vec<GeneratedSequence>, GeneratorError>;

    /// Model identifier reported by the health check.
    fn model(&self) -> &str;
}

pub struct GenerationService {
    backend: Box<dyn TextGenerator>,
    sampling: SamplingConfig,
    gate: Mutex<()>,
}

impl Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService")
            .field("model", &self.backend.model())
            .field("sampling", &self.sampling)
            .finish()
    }
}

impl GenerationService {
    pub fn new(backend: Box<dyn TextGenerator>, sampling: SamplingConfig) -> Self {
        Self {
            backend,
            sampling,
            gate: Mutex::new(()),
        }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Run one generation and return the first candidate's text.
    ///
    /// Calls are serialized: the backend never sees two prompts at once.
    pub async fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        let span = tracing::info_span!(
            "generate",
            request_id = %Uuid::new_v4(),
            model = self.backend.model(),
            prompt_len = prompt.len()
        );

        self.run(prompt).instrument(span).await
    }

    async fn run(&self, prompt: &str) -> Result<String, GeneratorError> {
        let _guard = self.gate.lock().await;
        tracing::debug!("generator acquired");

        let candidates = self.backend.generate(prompt, &self.sampling).await?;
        tracing::debug!(candidates = candidates.len(), "generation finished");

        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or(GeneratorError::EmptyResult)
    }

    /// Call the backend once so a broken model fails the process at startup.
    pub async fn warm_up(&self) -> Result<(), GeneratorError> {
        let text = self.complete("Hello").await?;
        tracing::info!(
            model = self.backend.model(),
            chars = text.len(),
            "generator warm-up succeeded"
        );
        Ok(())
    }
}
