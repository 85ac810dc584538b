//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow service error
    #[error("Service error: {0}")]
    Service(#[from] signflow_sdk::ServiceError),

    /// AI composition error
    #[error("Composition error: {0}")]
    Compose(#[from] signflow_extractor::ComposeError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] signflow_llm::LlmError),

    /// The workflow lifecycle did not complete
    #[error("Workflow failed: {0}")]
    Workflow(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// No bearer token supplied
    #[error("No bearer token. Pass --token or set SIGNFLOW_TOKEN.")]
    MissingToken,
}
