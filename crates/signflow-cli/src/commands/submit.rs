//! Submit command implementation.

use crate::cli::SubmitArgs;
use crate::commands::{orchestrator, report};
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde_json::Value;

/// Execute the submit command.
pub async fn execute_submit(
    args: SubmitArgs,
    profile: &Profile,
    token: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let orchestrator = orchestrator(profile, token)?;

    if args.skip_update {
        let outcome = orchestrator.create_and_approve().await;
        return report(&outcome, formatter);
    }

    let path = args
        .file
        .ok_or_else(|| CliError::InvalidInput("a request body file is required".to_string()))?;
    let body: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    let outcome = match (args.workflow_id, args.version) {
        (Some(id), Some(version)) => orchestrator.update_and_approve(&id, &version, body).await,
        _ => orchestrator.create_workflow(body).await,
    };
    report(&outcome, formatter)
}
