//! Error types for the workflow service client.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle step a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStep {
    /// Producing the request body (extractor, builder or LLM)
    Compose,
    /// Creating the draft
    Create,
    /// Populating the draft
    Update,
    /// Approving (publishing) the draft
    Approve,
}

impl WorkflowStep {
    /// Wire name of the step
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Compose => "COMPOSE",
            WorkflowStep::Create => "CREATE",
            WorkflowStep::Update => "UPDATE",
            WorkflowStep::Approve => "APPROVE",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service did not answer within the request timeout
    #[error("{step}: request timeout, the service took too long to respond")]
    Timeout {
        /// Step that timed out
        step: WorkflowStep,
    },

    /// The service could not be reached
    #[error("{step}: connection error: {message}")]
    Connection {
        /// Step that failed
        step: WorkflowStep,
        /// Transport detail
        message: String,
    },

    /// The service answered with a non-success status
    #[error("{step}: HTTP {status} - {body}")]
    Rejected {
        /// Step that was rejected
        step: WorkflowStep,
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// A success response whose body could not be understood
    #[error("{step}: invalid response: {message}")]
    InvalidResponse {
        /// Step that failed
        step: WorkflowStep,
        /// What was wrong with the body
        message: String,
    },

    /// Any other request failure
    #[error("{step}: request failed: {message}")]
    Request {
        /// Step that failed
        step: WorkflowStep,
        /// Error detail
        message: String,
    },

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Classify a transport error raised during `step`
    pub fn from_reqwest(step: WorkflowStep, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ServiceError::Timeout { step }
        } else if e.is_connect() {
            ServiceError::Connection {
                step,
                message: e.to_string(),
            }
        } else if e.is_decode() {
            ServiceError::InvalidResponse {
                step,
                message: e.to_string(),
            }
        } else {
            ServiceError::Request {
                step,
                message: e.to_string(),
            }
        }
    }

    /// Step the error belongs to, if any
    pub fn step(&self) -> Option<WorkflowStep> {
        match self {
            ServiceError::Timeout { step }
            | ServiceError::Connection { step, .. }
            | ServiceError::Rejected { step, .. }
            | ServiceError::InvalidResponse { step, .. }
            | ServiceError::Request { step, .. } => Some(*step),
            ServiceError::Config(_) => None,
        }
    }
}
