//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::pipeline::processor::DischargeProcessor;
use crate::pipeline::summarize::InferenceError;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub processor: Arc<DischargeProcessor>,
}

impl ApiContext {
    pub fn new(config: AppConfig, processor: DischargeProcessor) -> Self {
        Self {
            config: Arc::new(config),
            processor: Arc::new(processor),
        }
    }

    /// Build the processor described by `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, InferenceError> {
        let processor = DischargeProcessor::from_config(&config.inference)?;
        Ok(Self::new(config, processor))
    }
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// HTML report fragment.
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub remote_available: bool,
}
