//! Tools that start from requirement text

use crate::config::ServerConfig;
use crate::error::McpError;
use crate::tools::orchestrator;
use serde::Deserialize;
use signflow_extractor::AiComposer;
use signflow_llm::GeminiProvider;
use signflow_sdk::WorkflowOutcome;

/// Parameters for the text-driven tools
#[derive(Debug, Deserialize)]
pub struct RequirementParams {
    /// Free-text workflow requirement
    pub requirement: String,
    /// Bearer token for the workflow service
    pub bearer_token: String,
}

/// Handle `create_workflow_from_text`: rule-based extraction, then the full lifecycle
pub async fn handle_from_text(
    config: &ServerConfig,
    params: RequirementParams,
) -> Result<WorkflowOutcome, McpError> {
    let orchestrator = orchestrator(config, &params.bearer_token)?;
    Ok(orchestrator.create_from_text(&params.requirement).await)
}

/// Handle `create_workflow_from_natural_language`: Gemini composes the body
pub async fn handle_from_natural_language(
    config: &ServerConfig,
    params: RequirementParams,
) -> Result<WorkflowOutcome, McpError> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| McpError::Config("GEMINI_API_KEY is not set".to_string()))?;
    let provider = GeminiProvider::new(config.gemini.clone(), api_key)
        .map_err(|e| McpError::Config(e.to_string()))?;
    let composer = AiComposer::new(provider, config.composer.clone())
        .map_err(|e| McpError::Config(e.to_string()))?;

    let orchestrator = orchestrator(config, &params.bearer_token)?;
    Ok(orchestrator
        .create_from_text_with_ai(&params.requirement, &composer)
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_natural_language_needs_api_key() {
        let config = ServerConfig::default();
        let params = RequirementParams {
            requirement: "2 documents A and B".to_string(),
            bearer_token: "t".to_string(),
        };
        let err = handle_from_natural_language(&config, params)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
