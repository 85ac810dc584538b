//! Drives the create → update → approve lifecycle
//!
//! Every flow returns a [`WorkflowOutcome`]; no error crosses the
//! orchestrator boundary. There is no retry and no rollback: a failure after
//! the create step leaves the draft in place and reports its id and version.

use crate::error::WorkflowStep;
use crate::outcome::{body_counts, Flow, WorkflowOutcome, STATUS_PUBLISHED};
use crate::service::{Draft, WorkflowService};
use serde_json::Value;
use signflow_domain::traits::LlmProvider;
use signflow_extractor::{AiComposer, Extractor};
use signflow_payload::PayloadBuilder;
use std::fmt::Display;
use std::time::Instant;
use tracing::{error, info};

/// Bookkeeping for one orchestrator call
struct Run {
    outcome: WorkflowOutcome,
    start: Instant,
}

impl Run {
    fn new(flow: Flow) -> Self {
        Self {
            outcome: WorkflowOutcome::started(flow),
            start: Instant::now(),
        }
    }

    fn count(&mut self, payload: &Value) {
        let (documents, invitees) = body_counts(payload);
        self.outcome.documents_created = documents;
        self.outcome.invitees_created = invitees;
    }

    fn draft(&mut self, id: &str, version: &str) {
        self.outcome.workflow_id = Some(id.to_string());
        self.outcome.workflow_version = Some(version.to_string());
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn fail(mut self, step: WorkflowStep, err: impl Display) -> WorkflowOutcome {
        let message = err.to_string();
        error!("Workflow {} failed at {}: {}", self.outcome.flow, step, message);
        self.outcome.step_failed = Some(step);
        self.outcome.error = Some(message);
        self.outcome.processing_time_ms = self.elapsed_ms();
        self.outcome
    }

    fn succeed(mut self, payload: Option<Value>) -> WorkflowOutcome {
        self.outcome.success = true;
        self.outcome.status = Some(STATUS_PUBLISHED.to_string());
        self.outcome.payload = payload;
        self.outcome.processing_time_ms = self.elapsed_ms();
        info!(
            "Workflow {} published in {}ms ({} documents, {} invitees)",
            self.outcome.workflow_id.as_deref().unwrap_or("?"),
            self.outcome.processing_time_ms,
            self.outcome.documents_created,
            self.outcome.invitees_created
        );
        self.outcome
    }
}

/// Runs the workflow lifecycle against a [`WorkflowService`]
pub struct Orchestrator<S> {
    service: S,
    extractor: Extractor,
    builder: PayloadBuilder,
}

impl<S: WorkflowService> Orchestrator<S> {
    /// Orchestrator with the default extractor and payload builder
    pub fn new(service: S) -> Self {
        Self {
            service,
            extractor: Extractor::default(),
            builder: PayloadBuilder::default(),
        }
    }

    /// Replace the extractor
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the payload builder
    pub fn with_builder(mut self, builder: PayloadBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// The underlying service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Extractor → payload builder → create → update → approve
    pub async fn create_from_text(&self, text: &str) -> WorkflowOutcome {
        let mut run = Run::new(Flow::Text);
        info!("Creating workflow from text ({} chars)", text.len());

        let ir = self.extractor.extract(text);
        run.outcome.extraction_fallbacks = ir.fallbacks.clone();

        match self.builder.build(&ir).to_value() {
            Ok(payload) => self.full_lifecycle(run, payload).await,
            Err(e) => run.fail(
                WorkflowStep::Compose,
                format!("Failed to serialize request body: {}", e),
            ),
        }
    }

    /// LLM composition → create → update → approve
    pub async fn create_from_text_with_ai<L>(
        &self,
        text: &str,
        composer: &AiComposer<L>,
    ) -> WorkflowOutcome
    where
        L: LlmProvider + Send + Sync + 'static,
        L::Error: Display,
    {
        let mut run = Run::new(Flow::Ai);
        run.outcome.model = Some(composer.model_name().to_string());
        info!("Composing workflow with {}", composer.model_name());

        match composer.compose(text).await {
            Ok(payload) => self.full_lifecycle(run, payload).await,
            Err(e) => run.fail(WorkflowStep::Compose, e),
        }
    }

    /// Create → update → approve with a caller-supplied body
    pub async fn create_workflow(&self, payload: Value) -> WorkflowOutcome {
        let run = Run::new(Flow::Payload);
        if !payload.is_object() {
            return run.fail(WorkflowStep::Compose, "Request body must be a JSON object");
        }
        self.full_lifecycle(run, payload).await
    }

    /// Update → approve on an existing draft
    pub async fn update_and_approve(
        &self,
        workflow_id: &str,
        version: &str,
        payload: Value,
    ) -> WorkflowOutcome {
        let mut run = Run::new(Flow::UpdateAndApprove);
        if workflow_id.trim().is_empty() || version.trim().is_empty() {
            return run.fail(
                WorkflowStep::Update,
                "workflow id and version are required",
            );
        }
        run.draft(workflow_id, version);
        if !payload.is_object() {
            return run.fail(WorkflowStep::Compose, "Request body must be a JSON object");
        }
        run.count(&payload);
        self.update_then_approve(run, workflow_id, version, payload)
            .await
    }

    /// Create → approve, keeping the template's defaults
    pub async fn create_and_approve(&self) -> WorkflowOutcome {
        let (run, draft) = match self.create(Run::new(Flow::Express)).await {
            Ok(created) => created,
            Err(outcome) => return outcome,
        };
        if let Err(e) = self.service.approve(&draft.id, &draft.version).await {
            return run.fail(WorkflowStep::Approve, e);
        }
        run.succeed(None)
    }

    async fn full_lifecycle(&self, mut run: Run, payload: Value) -> WorkflowOutcome {
        run.count(&payload);
        let (run, draft) = match self.create(run).await {
            Ok(created) => created,
            Err(outcome) => return outcome,
        };
        self.update_then_approve(run, &draft.id, &draft.version, payload)
            .await
    }

    async fn create(&self, mut run: Run) -> Result<(Run, Draft), WorkflowOutcome> {
        match self.service.create_draft().await {
            Ok(draft) => {
                run.draft(&draft.id, &draft.version);
                Ok((run, draft))
            }
            Err(e) => Err(run.fail(WorkflowStep::Create, e)),
        }
    }

    async fn update_then_approve(
        &self,
        run: Run,
        workflow_id: &str,
        version: &str,
        payload: Value,
    ) -> WorkflowOutcome {
        if let Err(e) = self
            .service
            .update_draft(workflow_id, version, &payload)
            .await
        {
            return run.fail(WorkflowStep::Update, e);
        }
        if let Err(e) = self.service.approve(workflow_id, version).await {
            return run.fail(WorkflowStep::Approve, e);
        }
        run.succeed(Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use async_trait::async_trait;
    use serde_json::json;
    use signflow_domain::ExtractionFallback;
    use signflow_extractor::ComposerConfig;
    use signflow_llm::MockProvider;
    use std::sync::Mutex;

    /// In-memory service recording every call
    #[derive(Default)]
    struct RecordingService {
        calls: Mutex<Vec<String>>,
        fail_at: Option<WorkflowStep>,
        updated: Mutex<Option<Value>>,
    }

    impl RecordingService {
        fn failing_at(step: WorkflowStep) -> Self {
            Self {
                fail_at: Some(step),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String, step: WorkflowStep) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(call);
            if self.fail_at == Some(step) {
                return Err(ServiceError::Rejected {
                    step,
                    status: 500,
                    body: "internal".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl WorkflowService for RecordingService {
        async fn create_draft(&self) -> Result<Draft, ServiceError> {
            self.record("create".to_string(), WorkflowStep::Create)?;
            Ok(Draft {
                id: "wf-1".to_string(),
                version: "0.1".to_string(),
                name: "draft".to_string(),
            })
        }

        async fn update_draft(
            &self,
            id: &str,
            version: &str,
            payload: &Value,
        ) -> Result<(), ServiceError> {
            self.record(format!("update {id} {version}"), WorkflowStep::Update)?;
            *self.updated.lock().unwrap() = Some(payload.clone());
            Ok(())
        }

        async fn approve(&self, id: &str, version: &str) -> Result<(), ServiceError> {
            self.record(format!("approve {id} {version}"), WorkflowStep::Approve)
        }
    }

    fn composer(response: &str) -> AiComposer<MockProvider> {
        AiComposer::new(MockProvider::new(response), ComposerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_text_flow_runs_all_three_steps() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator
            .create_from_text("Create workflow with 2 documents A and B")
            .await;

        assert!(outcome.success, "{:?}", outcome.error);
        assert_eq!(outcome.status.as_deref(), Some("PUBLISHED"));
        assert_eq!(outcome.workflow_id.as_deref(), Some("wf-1"));
        assert_eq!(outcome.documents_created, 2);
        assert_eq!(outcome.invitees_created, 2);
        assert_eq!(
            orchestrator.service().calls(),
            vec!["create", "update wf-1 0.1", "approve wf-1 0.1"]
        );
        assert!(outcome
            .extraction_fallbacks
            .contains(&ExtractionFallback::PlaceholderSigners));
        assert_eq!(
            orchestrator.service().updated.lock().unwrap().as_ref(),
            outcome.payload.as_ref()
        );
    }

    #[tokio::test]
    async fn test_update_failure_keeps_draft_ids() {
        let orchestrator = Orchestrator::new(RecordingService::failing_at(WorkflowStep::Update));
        let outcome = orchestrator
            .create_from_text("documents: Lease. signers: Tenant, Owner")
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.step_failed, Some(WorkflowStep::Update));
        assert_eq!(outcome.workflow_id.as_deref(), Some("wf-1"));
        assert_eq!(outcome.workflow_version.as_deref(), Some("0.1"));
        assert!(outcome.error.unwrap().contains("HTTP 500"));
        assert!(outcome.payload.is_none());
        assert_eq!(orchestrator.service().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_create_failure_has_no_ids() {
        let orchestrator = Orchestrator::new(RecordingService::failing_at(WorkflowStep::Create));
        let outcome = orchestrator.create_workflow(json!({"workflowData": {}})).await;
        assert_eq!(outcome.step_failed, Some(WorkflowStep::Create));
        assert!(!outcome.has_draft());
        assert_eq!(outcome.flow, Flow::Payload);
    }

    #[tokio::test]
    async fn test_non_object_body_is_rejected_before_remote_calls() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator.create_workflow(json!([1, 2])).await;
        assert_eq!(outcome.step_failed, Some(WorkflowStep::Compose));
        assert!(orchestrator.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_approve_skips_create() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator
            .update_and_approve("wf-9", "2", json!({"workflowData": {"documents": [{}]}}))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.documents_created, 1);
        assert_eq!(
            orchestrator.service().calls(),
            vec!["update wf-9 2", "approve wf-9 2"]
        );
    }

    #[tokio::test]
    async fn test_update_and_approve_requires_ids() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator.update_and_approve("", "1", json!({})).await;
        assert_eq!(outcome.step_failed, Some(WorkflowStep::Update));
        assert!(orchestrator.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_express_flow() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator.create_and_approve().await;
        assert!(outcome.success);
        assert!(outcome.payload.is_none());
        assert_eq!(
            orchestrator.service().calls(),
            vec!["create", "approve wf-1 0.1"]
        );
    }

    #[tokio::test]
    async fn test_express_approve_failure() {
        let orchestrator =
            Orchestrator::new(RecordingService::failing_at(WorkflowStep::Approve));
        let outcome = orchestrator.create_and_approve().await;
        assert_eq!(outcome.step_failed, Some(WorkflowStep::Approve));
        assert_eq!(outcome.workflow_id.as_deref(), Some("wf-1"));
    }

    #[tokio::test]
    async fn test_ai_flow_submits_composed_body() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let composer = composer(
            "```json\n{\"workflowData\": {\"documents\": [{}], \"invitees\": {\"inviteeCards\": [{}, {}]}}}\n```",
        );
        let outcome = orchestrator
            .create_from_text_with_ai("anything", &composer)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.flow, Flow::Ai);
        assert_eq!(outcome.model.as_deref(), Some("mock"));
        assert_eq!((outcome.documents_created, outcome.invitees_created), (1, 2));
    }

    #[tokio::test]
    async fn test_ai_flow_malformed_reply_fails_at_compose() {
        let orchestrator = Orchestrator::new(RecordingService::default());
        let outcome = orchestrator
            .create_from_text_with_ai("anything", &composer("not json at all"))
            .await;

        assert_eq!(outcome.step_failed, Some(WorkflowStep::Compose));
        assert!(orchestrator.service().calls().is_empty());
    }
}
