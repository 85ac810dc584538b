//! HTTP implementation of [`WorkflowService`].

use crate::config::ClientConfig;
use crate::error::{ServiceError, WorkflowStep};
use crate::service::{Draft, WorkflowService};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Response;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Body of the create-draft request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDraftRequest<'a> {
    name: String,
    workflow_template_id: &'a str,
    workflow_template_version: &'a str,
    version_description: &'a str,
}

/// Body of the approve request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveRequest<'a> {
    workflow_id: &'a str,
    version: &'a str,
}

/// Workflow service client authenticated with a bearer token
///
/// No request is ever retried.
pub struct WorkflowClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl WorkflowClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Config` if the configuration is invalid, the
    /// token is empty or not a valid header value, or the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig, bearer_token: &str) -> Result<Self, ServiceError> {
        config.validate().map_err(ServiceError::Config)?;
        let token = bearer_token.trim();
        if token.is_empty() {
            return Err(ServiceError::Config("bearer token is empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ServiceError::Config(format!("Invalid bearer token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn draft_name(&self) -> String {
        format!(
            "{}_{}",
            self.config.draft_name_prefix,
            chrono::Utc::now().timestamp()
        )
    }
}

/// Pass success responses through, turn anything else into `Rejected`
async fn check(step: WorkflowStep, response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ServiceError::Rejected {
        step,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl WorkflowService for WorkflowClient {
    async fn create_draft(&self) -> Result<Draft, ServiceError> {
        let step = WorkflowStep::Create;
        let request = CreateDraftRequest {
            name: self.draft_name(),
            workflow_template_id: &self.config.template_id,
            workflow_template_version: &self.config.template_version,
            version_description: &self.config.version_description,
        };
        debug!("Creating draft '{}'", request.name);

        let response = self
            .http
            .post(self.config.workflow_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(step, e))?;
        let body: Value = check(step, response)
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(step, e))?;

        let draft = Draft::from_response(&body)?;
        info!("Draft created: {} (v{})", draft.id, draft.version);
        Ok(draft)
    }

    async fn update_draft(
        &self,
        id: &str,
        version: &str,
        payload: &Value,
    ) -> Result<(), ServiceError> {
        let step = WorkflowStep::Update;
        let url = format!("{}/{}/{}", self.config.workflow_url(), id, version);
        debug!("Updating draft {} (v{})", id, version);

        let response = self
            .http
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(step, e))?;
        check(step, response).await?;
        info!("Draft {} updated", id);
        Ok(())
    }

    async fn approve(&self, id: &str, version: &str) -> Result<(), ServiceError> {
        let step = WorkflowStep::Approve;
        let url = format!("{}/approve", self.config.workflow_url());
        debug!("Approving draft {} (v{})", id, version);

        let response = self
            .http
            .patch(url)
            .json(&ApproveRequest {
                workflow_id: id,
                version,
            })
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(step, e))?;
        check(step, response).await?;
        info!("Draft {} approved", id);
        Ok(())
    }
}
