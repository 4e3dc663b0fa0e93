use std::sync::Arc;

use futures_util::future::join_all;

use super::breaker::{BreakerStatus, CircuitBreaker};
use super::chunking::split_into_windows;
use super::client::{HuggingFaceClient, InferenceClient};
use super::prompt::build_final_prompt;
use super::InferenceError;
use crate::config::InferenceConfig;
use crate::pipeline::report::PatientInfo;

/// Text produced by a successful remote attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSummary {
    pub text: String,
    pub model: String,
}

pub struct RemoteSummarizer {
    client: Option<Arc<dyn InferenceClient>>,
    breaker: CircuitBreaker,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RemoteSummarizer {
    /// Build from configuration. Without an API key no client is created
    /// and every attempt returns `None` immediately.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let client: Option<Arc<dyn InferenceClient>> = match config.api_key {
            Some(_) => Some(Arc::new(HuggingFaceClient::new(config)?)),
            None => {
                tracing::info!("No inference API key configured, using heuristic extraction only");
                None
            }
        };
        Ok(Self {
            client,
            breaker: CircuitBreaker::new(config.retry_after),
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        })
    }

    pub fn with_client(
        client: Arc<dyn InferenceClient>,
        breaker: CircuitBreaker,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            client: Some(client),
            breaker,
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn disabled() -> Self {
        Self {
            client: None,
            breaker: CircuitBreaker::new(std::time::Duration::from_secs(
                crate::config::DEFAULT_RETRY_AFTER_SECS,
            )),
            chunk_size: crate::config::DEFAULT_CHUNK_SIZE,
            chunk_overlap: crate::config::DEFAULT_CHUNK_OVERLAP,
        }
    }

    /// Whether a remote attempt would currently be made.
    pub fn is_available(&self) -> bool {
        self.client.is_some() && self.breaker.status() != BreakerStatus::Open
    }

    pub fn breaker_status(&self) -> BreakerStatus {
        self.breaker.status()
    }

    /// Attempt a remote summary. `None` means the caller should fall back.
    pub async fn try_summarize(
        &self,
        documents: &[String],
        patient: &PatientInfo,
    ) -> Option<RemoteSummary> {
        let client = self.client.as_ref()?;

        let combined = documents.join("\n\n");
        let windows = split_into_windows(&combined, self.chunk_size, self.chunk_overlap);
        if windows.is_empty() {
            return None;
        }

        if !self.breaker.allow_request() {
            tracing::debug!("Remote inference breaker open, skipping remote attempt");
            return None;
        }

        match run_remote(client.as_ref(), &windows, patient).await {
            Ok(text) => {
                self.breaker.record_success();
                tracing::info!(windows = windows.len(), "Remote summary generated");
                Some(RemoteSummary {
                    text,
                    model: client.generation_model().to_string(),
                })
            }
            Err(e) => {
                self.breaker.record_failure();
                tracing::warn!(error = %e, "Remote summarization failed, falling back to extraction");
                None
            }
        }
    }
}

async fn run_remote(
    client: &dyn InferenceClient,
    windows: &[String],
    patient: &PatientInfo,
) -> Result<String, InferenceError> {
    let summaries = join_all(windows.iter().map(|w| client.summarize(w)))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let prompt = build_final_prompt(patient, &summaries.join(" "));
    client.generate(&prompt).await
}
