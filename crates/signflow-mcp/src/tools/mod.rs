//! MCP tool implementations

mod lifecycle;
mod preview;
mod text;

pub use lifecycle::{
    handle_create_and_approve, handle_create_workflow, handle_update_and_approve,
    CreateAndApproveParams, CreateWorkflowParams, UpdateAndApproveParams,
};
pub use preview::{handle_preview, PreviewParams, PreviewResult};
pub use text::{handle_from_natural_language, handle_from_text, RequirementParams};

use crate::config::ServerConfig;
use crate::error::McpError;
use crate::protocol::ToolDefinition;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use signflow_extractor::Extractor;
use signflow_payload::PayloadBuilder;
use signflow_sdk::{Orchestrator, WorkflowClient};

/// Decode tool arguments, reporting shape errors as invalid params
pub(crate) fn parse_params<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Orchestrator over an HTTP client authenticated with `bearer_token`
pub(crate) fn orchestrator(
    config: &ServerConfig,
    bearer_token: &str,
) -> Result<Orchestrator<WorkflowClient>, McpError> {
    if bearer_token.trim().is_empty() {
        return Err(McpError::InvalidParams("bearer_token is empty".to_string()));
    }
    let client = WorkflowClient::new(config.client.clone(), bearer_token)
        .map_err(|e| McpError::Config(e.to_string()))?;
    Ok(Orchestrator::new(client)
        .with_extractor(extractor(config)?)
        .with_builder(builder(config)?))
}

pub(crate) fn extractor(config: &ServerConfig) -> Result<Extractor, McpError> {
    Extractor::new(config.extractor.clone()).map_err(|e| McpError::Config(e.to_string()))
}

pub(crate) fn builder(config: &ServerConfig) -> Result<PayloadBuilder, McpError> {
    PayloadBuilder::new(config.payload.clone()).map_err(|e| McpError::Config(e.to_string()))
}

fn bearer_token_schema() -> Value {
    json!({"type": "string", "description": "Bearer token for the workflow service"})
}

fn workflow_json_schema() -> Value {
    json!({
        "type": "object",
        "description": "Complete request body with dynamicProperties and workflowData"
    })
}

/// Definitions for the `tools/list` response
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "create_workflow".to_string(),
            description: "CREATE → UPDATE → APPROVE with a complete request body".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "workflow_json": workflow_json_schema(),
                    "bearer_token": bearer_token_schema()
                },
                "required": ["workflow_json", "bearer_token"]
            }),
        },
        ToolDefinition {
            name: "update_and_approve".to_string(),
            description: "UPDATE → APPROVE an existing draft".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "workflow_id": {"type": "string", "description": "Draft workflow id"},
                    "workflow_version": {"type": "string", "description": "Draft version"},
                    "workflow_json": workflow_json_schema(),
                    "bearer_token": bearer_token_schema()
                },
                "required": ["workflow_id", "workflow_version", "workflow_json", "bearer_token"]
            }),
        },
        ToolDefinition {
            name: "create_and_approve".to_string(),
            description: "CREATE → APPROVE, skipping the update so the template defaults apply"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"bearer_token": bearer_token_schema()},
                "required": ["bearer_token"]
            }),
        },
        ToolDefinition {
            name: "create_workflow_from_text".to_string(),
            description: "Extract documents and signers from text with the rule-based \
                          extractor, then CREATE → UPDATE → APPROVE"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirement": {"type": "string", "description": "e.g. \"Create workflow with 2 documents A and B\""},
                    "bearer_token": bearer_token_schema()
                },
                "required": ["requirement", "bearer_token"]
            }),
        },
        ToolDefinition {
            name: "create_workflow_from_natural_language".to_string(),
            description: "Have Gemini compose the request body from text, then \
                          CREATE → UPDATE → APPROVE"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirement": {"type": "string", "description": "Natural-language workflow requirement"},
                    "bearer_token": bearer_token_schema()
                },
                "required": ["requirement", "bearer_token"]
            }),
        },
        ToolDefinition {
            name: "preview_workflow".to_string(),
            description: "Extract and build the request body without calling the service"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirement": {"type": "string", "description": "Workflow requirement text"}
                },
                "required": ["requirement"]
            }),
        },
    ]
}
