//! Command implementations.

pub mod build;
pub mod create;
pub mod parse;
pub mod profile;
pub mod submit;

pub use self::build::execute_build;
pub use self::create::execute_create;
pub use self::parse::execute_parse;
pub use self::profile::execute_profile;
pub use self::submit::execute_submit;

use crate::cli::TextArgs;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use signflow_extractor::{Extractor, ExtractorConfig};
use signflow_payload::PayloadBuilder;
use signflow_sdk::{Orchestrator, WorkflowClient, WorkflowOutcome};
use std::io::Read;

/// Requirement text from the positional argument, `--file`, or stdin for `-`.
pub(crate) fn read_text(args: &TextArgs) -> Result<String> {
    let text = match (&args.file, args.text.as_deref()) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some("-")) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (None, Some(text)) => text.to_string(),
        (None, None) => String::new(),
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("requirement text is empty".to_string()));
    }
    Ok(text)
}

pub(crate) fn extractor() -> Result<Extractor> {
    Extractor::new(ExtractorConfig::default()).map_err(|e| CliError::Config(e.to_string()))
}

pub(crate) fn builder(profile: &Profile) -> Result<PayloadBuilder> {
    PayloadBuilder::new(profile.payload_config()).map_err(|e| CliError::Config(e.to_string()))
}

/// Orchestrator over the profile's gateway
pub(crate) fn orchestrator(
    profile: &Profile,
    token: Option<&str>,
) -> Result<Orchestrator<WorkflowClient>> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or(CliError::MissingToken)?;
    let client = WorkflowClient::new(profile.client_config(), token)?;
    Ok(Orchestrator::new(client)
        .with_extractor(extractor()?)
        .with_builder(builder(profile)?))
}

/// Print an outcome; a failed lifecycle becomes an error after printing.
pub(crate) fn report(outcome: &WorkflowOutcome, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_outcome(outcome)?);
    if outcome.success {
        return Ok(());
    }
    let step = outcome
        .step_failed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    Err(CliError::Workflow(format!("step {} failed", step)))
}
