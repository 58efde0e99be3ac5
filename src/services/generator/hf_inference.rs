use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GeneratedSequence, GeneratorError, SamplingConfig, TextGenerator};

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    do_sample: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Client for a Hugging Face style text-generation endpoint
/// (`POST {base}/models/{model}`).
#[derive(Clone)]
pub struct HfInferenceClient {
    client: Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl HfInferenceClient {
    pub fn new(base_url: &str, model: &str, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/models/{}", base_url.trim_end_matches('/'), model),
            model: model.to_string(),
            api_token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn request_body<'a>(prompt: &'a str, sampling: &SamplingConfig) -> InferenceRequest<'a> {
    InferenceRequest {
        inputs: prompt,
        parameters: InferenceParameters {
            max_new_tokens: sampling.max_length,
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            do_sample: true,
        },
        options: InferenceOptions {
            wait_for_model: true,
        },
    }
}

#[async_trait]
impl TextGenerator for HfInferenceClient {
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<Vec<GeneratedSequence>, GeneratorError> {
        let body = request_body(prompt, sampling);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<InferenceErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            tracing::warn!(status = status.as_u16(), %message, "inference request rejected");
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<GeneratedSequence>>()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = HfInferenceClient::new("http://localhost:8080/", "gpt2", None);
        assert_eq!(client.endpoint(), "http://localhost:8080/models/gpt2");
        assert_eq!(client.model(), "gpt2");
    }

    #[test]
    fn request_body_carries_sampling_parameters() {
        let body = request_body("Hello", &SamplingConfig::default());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["inputs"], "Hello");
        assert_eq!(json["parameters"]["max_new_tokens"], 50);
        assert_eq!(json["parameters"]["top_k"], 50);
        assert_eq!(json["parameters"]["do_sample"], true);
        assert!((json["parameters"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((json["parameters"]["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn request_body_follows_sampling_overrides() {
        let sampling = SamplingConfig {
            max_length: 8,
            top_k: 5,
            ..SamplingConfig::default()
        };
        let json = serde_json::to_value(request_body("", &sampling)).unwrap();

        assert_eq!(json["inputs"], "");
        assert_eq!(json["parameters"]["max_new_tokens"], 8);
        assert_eq!(json["parameters"]["top_k"], 5);
    }
}
