pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

use config::AppConfig;
use services::generator::{GenerationService, HfInferenceClient, SamplingConfig};

/// Generation service wired to the configured inference endpoint.
pub fn build_generator(config: &AppConfig) -> GenerationService {
    let client = HfInferenceClient::new(
        &config.generator_url,
        &config.model,
        config.api_token.clone(),
    );
    tracing::info!(endpoint = client.endpoint(), "using inference endpoint");

    GenerationService::new(Box::new(client), SamplingConfig::default())
}
