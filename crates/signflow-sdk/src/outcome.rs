//! Result record shared by every orchestrator flow

use crate::error::WorkflowStep;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signflow_domain::ExtractionFallback;
use std::fmt;

/// Status reported once a draft has been approved
pub const STATUS_PUBLISHED: &str = "PUBLISHED";

/// Which orchestrator flow produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Extractor and payload builder, then create, update, approve
    Text,
    /// LLM-composed body, then create, update, approve
    Ai,
    /// Caller-supplied body, then create, update, approve
    Payload,
    /// Update and approve an existing draft
    UpdateAndApprove,
    /// Create and approve with template defaults
    Express,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flow::Text => "text",
            Flow::Ai => "ai",
            Flow::Payload => "payload",
            Flow::UpdateAndApprove => "update_and_approve",
            Flow::Express => "express",
        };
        f.write_str(name)
    }
}

/// Success or failure of one orchestrator call
///
/// Failures after the create step still carry the draft's id and version so
/// the caller can inspect or resume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    /// Every step of the flow succeeded
    pub success: bool,
    /// Flow that ran
    pub flow: Flow,
    /// Draft id, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// Draft version, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_version: Option<String>,
    /// `PUBLISHED` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Step that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_failed: Option<WorkflowStep>,
    /// Human-readable failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time of the whole call
    pub processing_time_ms: u64,
    /// Document blocks in the body
    pub documents_created: usize,
    /// Invitee cards in the body
    pub invitees_created: usize,
    /// Model that composed the body (AI flow only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Degraded extraction paths taken (text flow only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extraction_fallbacks: Vec<ExtractionFallback>,
    /// The submitted body, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl WorkflowOutcome {
    /// Empty outcome for `flow`, not yet successful
    pub(crate) fn started(flow: Flow) -> Self {
        Self {
            success: false,
            flow,
            workflow_id: None,
            workflow_version: None,
            status: None,
            step_failed: None,
            error: None,
            processing_time_ms: 0,
            documents_created: 0,
            invitees_created: 0,
            model: None,
            extraction_fallbacks: Vec::new(),
            payload: None,
        }
    }

    /// Whether the remote draft exists (create succeeded or was not needed)
    pub fn has_draft(&self) -> bool {
        self.workflow_id.is_some()
    }
}

/// Document and invitee counts of a request body
pub(crate) fn body_counts(payload: &Value) -> (usize, usize) {
    let data = &payload["workflowData"];
    let documents = data["documents"].as_array().map_or(0, Vec::len);
    let invitees = data["invitees"]["inviteeCards"]
        .as_array()
        .map_or(0, Vec::len);
    (documents, invitees)
}
