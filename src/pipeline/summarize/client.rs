use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::InferenceError;
use crate::config::{GenerationParams, InferenceConfig, SummarizationParams};

/// Remote text model operations used by the summarizer.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Condense one window of document text.
    async fn summarize(&self, text: &str) -> Result<String, InferenceError>;

    /// Free-form generation from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Name of the model producing the final text, for attribution.
    fn generation_model(&self) -> &str;
}

/// Hugging Face Inference API client.
pub struct HuggingFaceClient {
    base_url: String,
    api_key: String,
    summarization: SummarizationParams,
    generation: GenerationParams,
    client: reqwest::Client,
    timeout: Duration,
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(InferenceError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            summarization: config.summarization.clone(),
            generation: config.generation.clone(),
            client,
            timeout: config.timeout,
        })
    }

    async fn post<B, R>(&self, model: &str, body: &B) -> Result<Vec<R>, InferenceError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/models/{}", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    InferenceError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    InferenceError::Timeout(self.timeout.as_secs())
                } else {
                    InferenceError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a, P> {
    inputs: &'a str,
    parameters: P,
}

#[derive(Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct GenerationOutput {
    generated_text: String,
}

fn first_non_empty(texts: impl IntoIterator<Item = String>) -> Result<String, InferenceError> {
    texts
        .into_iter()
        .next()
        .filter(|t| !t.trim().is_empty())
        .ok_or(InferenceError::EmptyResponse)
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: SummarizationParameters {
                max_length: self.summarization.max_length,
                min_length: self.summarization.min_length,
            },
        };
        let outputs: Vec<SummarizationOutput> =
            self.post(&self.summarization.model, &body).await?;
        first_non_empty(outputs.into_iter().map(|o| o.summary_text))
    }

    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.generation.max_new_tokens,
                temperature: self.generation.temperature,
            },
        };
        let outputs: Vec<GenerationOutput> = self.post(&self.generation.model, &body).await?;
        first_non_empty(outputs.into_iter().map(|o| o.generated_text))
    }

    fn generation_model(&self) -> &str {
        &self.generation.model
    }
}

/// Mock inference client for testing. Counts calls.
pub struct MockInferenceClient {
    summary: Option<String>,
    generated: Option<String>,
    calls: AtomicUsize,
}

impl MockInferenceClient {
    pub fn new(summary: &str, generated: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            generated: Some(generated.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails as if the API were unreachable.
    pub fn unreachable() -> Self {
        Self {
            summary: None,
            generated: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Summaries succeed, the final generation fails.
    pub fn failing_generation(summary: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            generated: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, canned: &Option<String>) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned
            .clone()
            .ok_or_else(|| InferenceError::Connection("mock".to_string()))
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn summarize(&self, _text: &str) -> Result<String, InferenceError> {
        self.respond(&self.summary)
    }

    async fn generate(&self, _prompt: &str) -> Result<String, InferenceError> {
        self.respond(&self.generated)
    }

    fn generation_model(&self) -> &str {
        "mock-generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarization_body_shape() {
        let body = InferenceRequest {
            inputs: "text",
            parameters: SummarizationParameters {
                max_length: 150,
                min_length: 30,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inputs": "text", "parameters": {"max_length": 150, "min_length": 30}})
        );
    }

    #[test]
    fn generation_body_shape() {
        let body = InferenceRequest {
            inputs: "prompt",
            parameters: GenerationParameters {
                max_new_tokens: 500,
                temperature: 0.5,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["parameters"]["max_new_tokens"], 500);
        assert_eq!(json["parameters"]["temperature"], 0.5);
    }

    #[test]
    fn parses_api_outputs() {
        let summaries: Vec<SummarizationOutput> =
            serde_json::from_str(r#"[{"summary_text": "Pneumonia treated."}]"#).unwrap();
        assert_eq!(summaries[0].summary_text, "Pneumonia treated.");

        let generated: Vec<GenerationOutput> =
            serde_json::from_str(r#"[{"generated_text": "1. Patient Information"}]"#).unwrap();
        assert_eq!(generated[0].generated_text, "1. Patient Information");
    }

    #[test]
    fn empty_output_is_an_error() {
        assert!(matches!(
            first_non_empty(Vec::<String>::new()),
            Err(InferenceError::EmptyResponse)
        ));
        assert!(matches!(
            first_non_empty(vec!["  ".to_string()]),
            Err(InferenceError::EmptyResponse)
        ));
        assert_eq!(first_non_empty(vec!["ok".to_string()]).unwrap(), "ok");
    }

    #[test]
    fn client_requires_api_key() {
        let config = InferenceConfig::default();
        assert!(matches!(
            HuggingFaceClient::new(&config),
            Err(InferenceError::MissingApiKey)
        ));
    }

    #[test]
    fn client_trims_base_url() {
        let config = InferenceConfig {
            api_key: Some("hf_test".into()),
            base_url: "http://localhost:9/".into(),
            ..InferenceConfig::default()
        };
        let client = HuggingFaceClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
        assert_eq!(client.generation_model(), "google/flan-t5-xl");
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_connection_error() {
        let config = InferenceConfig {
            api_key: Some("hf_test".into()),
            // Port 9 (discard) is closed on test machines.
            base_url: "http://127.0.0.1:9".into(),
            ..InferenceConfig::default()
        };
        let client = HuggingFaceClient::new(&config).unwrap();
        let err = client.summarize("text").await.unwrap_err();
        assert!(matches!(err, InferenceError::Connection(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn mock_counts_calls() {
        let mock = MockInferenceClient::failing_generation("short");
        assert_eq!(mock.summarize("a").await.unwrap(), "short");
        assert!(mock.generate("b").await.is_err());
        assert_eq!(mock.calls(), 2);
    }
}
