//! Create command implementation.

use crate::cli::CreateArgs;
use crate::commands::{orchestrator, read_text, report};
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use signflow_extractor::{AiComposer, ComposerConfig};
use signflow_llm::GeminiProvider;
use tracing::info;

/// Execute the create command.
pub async fn execute_create(
    args: CreateArgs,
    profile: &Profile,
    token: Option<&str>,
    gemini_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_text(&args.input)?;
    let orchestrator = orchestrator(profile, token)?;

    let outcome = if args.ai {
        let key = gemini_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config("--ai needs --gemini-key or GEMINI_API_KEY".to_string())
            })?;
        let provider = GeminiProvider::new(profile.gemini_config(), key)?;
        let composer = AiComposer::new(provider, ComposerConfig::default())?;
        info!("Composing with {}", composer.model_name());
        orchestrator.create_from_text_with_ai(&text, &composer).await
    } else {
        orchestrator.create_from_text(&text).await
    };

    report(&outcome, formatter)
}
