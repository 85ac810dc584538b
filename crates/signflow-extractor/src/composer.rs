//! LLM composition path: requirement text straight to a request body

use crate::config::ComposerConfig;
use crate::error::ComposeError;
use crate::parser::parse_composed_payload;
use crate::prompt::PromptBuilder;
use serde_json::Value;
use signflow_domain::traits::LlmProvider;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// Asks an LLM for a complete request body, bypassing the rule-based extractor
pub struct AiComposer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    prompt: PromptBuilder,
    config: ComposerConfig,
}

impl<L> AiComposer<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new composer
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the configured
    /// prompt template cannot be loaded.
    pub fn new(llm_provider: L, config: ComposerConfig) -> Result<Self, ComposeError> {
        config.validate().map_err(ComposeError::Config)?;
        let prompt = match &config.prompt_template_path {
            Some(path) => PromptBuilder::from_file(path)?,
            None => PromptBuilder::default(),
        };
        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            prompt,
            config,
        })
    }

    /// Name of the backing model
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Compose a request body for `requirement`
    ///
    /// # Errors
    ///
    /// - `Timeout` if the LLM does not answer in time
    /// - `Llm` if the provider fails
    /// - `EmptyResponse` if the reply is blank
    /// - `MalformedResponse` if the fence-stripped reply is not a JSON object
    pub async fn compose(&self, requirement: &str) -> Result<Value, ComposeError> {
        let start = Instant::now();
        let prompt = self.prompt.build(requirement);
        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.config.llm_timeout(), self.call_llm(prompt))
            .await
            .map_err(|_| ComposeError::Timeout)??;

        if response.trim().is_empty() {
            return Err(ComposeError::EmptyResponse);
        }
        debug!("LLM response length: {} chars", response.len());

        let payload = parse_composed_payload(&response)?;
        info!(
            "Composed request body with {} in {}ms",
            self.model_name(),
            start.elapsed().as_millis()
        );
        Ok(payload)
    }

    async fn call_llm(&self, prompt: String) -> Result<String, ComposeError> {
        let llm = Arc::clone(&self.llm_provider);

        // LlmProvider is synchronous
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| ComposeError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ComposeError::Llm(format!("Task join error: {}", e)))?
    }
}
