//! Submit and create commands against a mock gateway

use serde_json::json;
use signflow_cli::cli::{CreateArgs, SubmitArgs, TextArgs};
use signflow_cli::commands::{execute_create, execute_submit};
use signflow_cli::config::OutputFormat;
use signflow_cli::{CliError, Formatter, Profile};
use std::io::Write;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WORKFLOW_PATH: &str = "/workflow-manager/v1/workflow";

fn profile(server: &MockServer) -> Profile {
    Profile {
        gateway_url: server.uri(),
        template_id: "tpl-cli".to_string(),
        ..Profile::default()
    }
}

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[tokio::test]
async fn test_submit_body_file_runs_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WORKFLOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "wf-cli", "version": "1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{WORKFLOW_PATH}/wf-cli/1")))
        .and(body_partial_json(json!({"workflowData": {"name": "from file"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{WORKFLOW_PATH}/approve")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut body = tempfile::NamedTempFile::new().unwrap();
    write!(body, r#"{{"dynamicProperties": {{}}, "workflowData": {{"name": "from file"}}}}"#).unwrap();

    let args = SubmitArgs {
        file: Some(body.path().to_path_buf()),
        workflow_id: None,
        version: None,
        skip_update: false,
    };
    execute_submit(args, &profile(&server), Some("token"), &formatter())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_reports_failed_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WORKFLOW_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let args = CreateArgs {
        input: TextArgs {
            text: Some("Create workflow with 2 documents A and B".to_string()),
            file: None,
        },
        ai: false,
    };
    let err = execute_create(args, &profile(&server), Some("token"), None, &formatter())
        .await
        .unwrap_err();

    match err {
        CliError::Workflow(message) => assert!(message.contains("CREATE")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_create_with_ai_needs_key() {
    let server = MockServer::start().await;
    let args = CreateArgs {
        input: TextArgs {
            text: Some("2 documents A and B".to_string()),
            file: None,
        },
        ai: true,
    };
    let err = execute_create(args, &profile(&server), Some("token"), None, &formatter())
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}
