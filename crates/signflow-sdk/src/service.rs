//! The three remote lifecycle operations

use crate::error::{ServiceError, WorkflowStep};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A freshly created draft workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Workflow id
    pub id: String,
    /// Draft version
    pub version: String,
    /// Display name
    pub name: String,
}

impl Draft {
    /// Read a draft from a create response.
    ///
    /// The draft may sit at the top level or under `data`, and `version` may
    /// be a string or a number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if `id` or `version` is missing.
    pub fn from_response(body: &Value) -> Result<Self, ServiceError> {
        let draft = body.get("data").filter(|d| d.is_object()).unwrap_or(body);

        let id = scalar(draft.get("id")).ok_or_else(|| missing("id"))?;
        let version = scalar(draft.get("version")).ok_or_else(|| missing("version"))?;
        let name = scalar(draft.get("name")).unwrap_or_default();

        Ok(Self { id, version, name })
    }
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn missing(field: &str) -> ServiceError {
    ServiceError::InvalidResponse {
        step: WorkflowStep::Create,
        message: format!("create response has no '{}'", field),
    }
}

/// Remote workflow service
///
/// Implemented over HTTP by [`WorkflowClient`](crate::WorkflowClient); tests
/// substitute an in-memory implementation.
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Create a draft from the configured template
    async fn create_draft(&self) -> Result<Draft, ServiceError>;

    /// Replace the draft's content with `payload`
    async fn update_draft(&self, id: &str, version: &str, payload: &Value)
        -> Result<(), ServiceError>;

    /// Approve the draft, publishing it
    async fn approve(&self, id: &str, version: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_at_top_level() {
        let draft =
            Draft::from_response(&json!({"id": "wf-1", "version": "0.2", "name": "n"})).unwrap();
        assert_eq!(
            draft,
            Draft {
                id: "wf-1".into(),
                version: "0.2".into(),
                name: "n".into()
            }
        );
    }

    #[test]
    fn test_draft_nested_with_numeric_version() {
        let draft =
            Draft::from_response(&json!({"status": 200, "data": {"id": "wf-2", "version": 3}}))
                .unwrap();
        assert_eq!(draft.id, "wf-2");
        assert_eq!(draft.version, "3");
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_draft_without_id_is_invalid() {
        let err = Draft::from_response(&json!({"data": {"version": "1"}})).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidResponse {
                step: WorkflowStep::Create,
                ..
            }
        ));
    }
}
