//! Remote summarization through a hosted text model.
//!
//! Documents are concatenated, cut into overlapping windows, summarized
//! window by window, then rewritten into a discharge summary by a
//! generation model. The attempt is guarded by a [`CircuitBreaker`] and
//! never fails the request: any error yields `None` and the caller falls
//! back to heuristic extraction.

pub mod breaker;
pub mod chunking;
pub mod client;
pub mod prompt;
pub mod remote;

pub use breaker::*;
pub use chunking::*;
pub use client::*;
pub use prompt::*;
pub use remote::*;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Inference API unreachable at {0}")]
    Connection(String),

    #[error("Inference request timed out after {0}s")]
    Timeout(u64),

    #[error("Inference API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Inference API returned no text")]
    EmptyResponse,

    #[error("No inference API key configured")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
