//! Lifecycle tools that take a finished request body or none at all

use crate::config::ServerConfig;
use crate::error::McpError;
use crate::tools::orchestrator;
use serde::Deserialize;
use serde_json::Value;
use signflow_sdk::WorkflowOutcome;

/// Parameters for `create_workflow`
#[derive(Debug, Deserialize)]
pub struct CreateWorkflowParams {
    /// Complete request body
    pub workflow_json: Value,
    /// Bearer token for the workflow service
    pub bearer_token: String,
}

/// Parameters for `update_and_approve`
#[derive(Debug, Deserialize)]
pub struct UpdateAndApproveParams {
    /// Existing draft id
    pub workflow_id: String,
    /// Existing draft version
    pub workflow_version: String,
    /// Complete request body
    pub workflow_json: Value,
    /// Bearer token for the workflow service
    pub bearer_token: String,
}

/// Parameters for `create_and_approve`
#[derive(Debug, Deserialize)]
pub struct CreateAndApproveParams {
    /// Bearer token for the workflow service
    pub bearer_token: String,
}

/// Handle `create_workflow`: CREATE → UPDATE → APPROVE
pub async fn handle_create_workflow(
    config: &ServerConfig,
    params: CreateWorkflowParams,
) -> Result<WorkflowOutcome, McpError> {
    let orchestrator = orchestrator(config, &params.bearer_token)?;
    Ok(orchestrator.create_workflow(params.workflow_json).await)
}

/// Handle `update_and_approve`: UPDATE → APPROVE
pub async fn handle_update_and_approve(
    config: &ServerConfig,
    params: UpdateAndApproveParams,
) -> Result<WorkflowOutcome, McpError> {
    let orchestrator = orchestrator(config, &params.bearer_token)?;
    Ok(orchestrator
        .update_and_approve(
            &params.workflow_id,
            &params.workflow_version,
            params.workflow_json,
        )
        .await)
}

/// Handle `create_and_approve`: CREATE → APPROVE
pub async fn handle_create_and_approve(
    config: &ServerConfig,
    params: CreateAndApproveParams,
) -> Result<WorkflowOutcome, McpError> {
    let orchestrator = orchestrator(config, &params.bearer_token)?;
    Ok(orchestrator.create_and_approve().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::parse_params;
    use serde_json::json;

    #[test]
    fn test_update_params_deserialize() {
        let params: UpdateAndApproveParams = parse_params(json!({
            "workflow_id": "wf-1",
            "workflow_version": "0.2",
            "workflow_json": {"workflowData": {}},
            "bearer_token": "t"
        }))
        .unwrap();
        assert_eq!(params.workflow_id, "wf-1");
        assert_eq!(params.workflow_version, "0.2");
    }

    #[test]
    fn test_missing_token_is_invalid_params() {
        let err = parse_params::<CreateWorkflowParams>(json!({"workflow_json": {}})).unwrap_err();
        assert_eq!(err.error_code(), -32602);
    }
}
