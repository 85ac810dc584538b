//! Error types for the Extractor

use thiserror::Error;

/// Errors raised while setting up the rule-based extractor.
///
/// Extraction itself never fails; degraded paths are recorded on the IR.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors from the LLM composition path
#[derive(Error, Debug)]
pub enum ComposeError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The provider answered with nothing
    #[error("Empty response from LLM")]
    EmptyResponse,

    /// Fence-stripped reply is not a JSON object
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// LLM call exceeded the configured timeout
    #[error("LLM call timed out")]
    Timeout,

    /// Prompt template could not be loaded
    #[error("Prompt template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ComposeError {
    fn from(e: serde_json::Error) -> Self {
        ComposeError::MalformedResponse(e.to_string())
    }
}
