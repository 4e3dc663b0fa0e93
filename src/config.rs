//! Process configuration, resolved once at startup from the environment.
//!
//! Request handlers never read environment variables; they receive an
//! `Arc<AppConfig>` through the API context.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Discharge Summary";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3000);
pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_GENERATION_MODEL: &str = "google/flan-t5-xl";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "discharge_summary_lib=info,discharge_summary=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{0}")]
    Inconsistent(String),
}

/// Summarization model parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizationParams {
    pub model: String,
    pub max_length: u32,
    pub min_length: u32,
}

/// Text-generation model parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

/// Everything the remote summarization path needs.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// `None` disables remote attempts entirely.
    pub api_key: Option<String>,
    pub base_url: String,
    pub summarization: SummarizationParams,
    pub generation: GenerationParams,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub timeout: Duration,
    pub retry_after: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_HF_BASE_URL.to_string(),
            summarization: SummarizationParams {
                model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
                max_length: 150,
                min_length: 30,
            },
            generation: GenerationParams {
                model: DEFAULT_GENERATION_MODEL.to_string(),
                max_new_tokens: 500,
                temperature: 0.7,
            },
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_after: Duration::from_secs(DEFAULT_RETRY_AFTER_SECS),
        }
    }
}

impl InferenceConfig {
    /// Reject parameter combinations the remote path cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summarization.min_length > self.summarization.max_length {
            return Err(ConfigError::Inconsistent(format!(
                "SUMMARY_MIN_LENGTH ({}) exceeds SUMMARY_MAX_LENGTH ({})",
                self.summarization.min_length, self.summarization.max_length
            )));
        }
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::Inconsistent(format!(
                "CHUNK_OVERLAP ({}) must be smaller than a non-zero CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::Inconsistent(format!(
                "GENERATION_TEMPERATURE ({}) must be within 0.0..=2.0",
                self.generation.temperature
            )));
        }
        if self.timeout.is_zero() || self.retry_after.is_zero() {
            return Err(ConfigError::Inconsistent(
                "REMOTE_TIMEOUT_SECS and REMOTE_RETRY_AFTER_SECS must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub inference: InferenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment (plus an optional `.env` file).
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. `from_env` delegates here so
    /// tests never touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = InferenceConfig::default();

        let bind_addr = parse_or(&lookup, "DISCHARGE_BIND_ADDR", || DEFAULT_BIND_ADDR)?;

        let api_key = lookup("HUGGINGFACE_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let inference = InferenceConfig {
            api_key,
            base_url: lookup("HUGGINGFACE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            summarization: SummarizationParams {
                model: lookup("SUMMARIZATION_MODEL").unwrap_or(defaults.summarization.model),
                max_length: parse_or(&lookup, "SUMMARY_MAX_LENGTH", || {
                    defaults.summarization.max_length
                })?,
                min_length: parse_or(&lookup, "SUMMARY_MIN_LENGTH", || {
                    defaults.summarization.min_length
                })?,
            },
            generation: GenerationParams {
                model: lookup("GENERATION_MODEL").unwrap_or(defaults.generation.model),
                max_new_tokens: parse_or(&lookup, "GENERATION_MAX_NEW_TOKENS", || {
                    defaults.generation.max_new_tokens
                })?,
                temperature: parse_or(&lookup, "GENERATION_TEMPERATURE", || {
                    defaults.generation.temperature
                })?,
            },
            chunk_size: parse_or(&lookup, "CHUNK_SIZE", || defaults.chunk_size)?,
            chunk_overlap: parse_or(&lookup, "CHUNK_OVERLAP", || defaults.chunk_overlap)?,
            timeout: Duration::from_secs(parse_or(&lookup, "REMOTE_TIMEOUT_SECS", || {
                DEFAULT_TIMEOUT_SECS
            })?),
            retry_after: Duration::from_secs(parse_or(&lookup, "REMOTE_RETRY_AFTER_SECS", || {
                DEFAULT_RETRY_AFTER_SECS
            })?),
        };
        inference.validate()?;

        Ok(Self {
            bind_addr,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", || DEFAULT_MAX_UPLOAD_BYTES)?,
            inference,
        })
    }
}

fn parse_or<F, T, D>(lookup: &F, var: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> T,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var,
            value: raw,
        }),
        None => Ok(default()),
    }
}
