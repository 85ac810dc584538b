//! `preview_workflow`: extraction and body assembly without remote calls

use crate::config::ServerConfig;
use crate::error::McpError;
use crate::tools::{builder, extractor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signflow_domain::WorkflowIr;

/// Parameters for `preview_workflow`
#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Free-text workflow requirement
    pub requirement: String,
}

/// What would be submitted for a requirement
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    /// Extraction output
    pub ir: WorkflowIr,
    /// Request body that would be sent with the update
    pub payload: Value,
    /// Document blocks in the body
    pub documents: usize,
    /// Invitee cards in the body
    pub invitees: usize,
    /// Signer-document references
    pub assignments: usize,
    /// Degraded extraction paths, as text
    pub warnings: Vec<String>,
}

/// Handle `preview_workflow`
pub fn handle_preview(
    config: &ServerConfig,
    params: PreviewParams,
) -> Result<PreviewResult, McpError> {
    let ir = extractor(config)?.extract(&params.requirement);
    let payload = builder(config)?.build(&ir);

    Ok(PreviewResult {
        documents: payload.document_count(),
        invitees: payload.invitee_count(),
        assignments: payload.assignment_count(),
        warnings: ir.fallbacks.iter().map(ToString::to_string).collect(),
        payload: payload.to_value()?,
        ir,
    })
}
