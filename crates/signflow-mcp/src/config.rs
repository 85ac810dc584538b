//! Server configuration: a TOML file plus environment overrides

use crate::error::McpError;
use serde::{Deserialize, Serialize};
use signflow_extractor::{ComposerConfig, ExtractorConfig};
use signflow_llm::GeminiConfig;
use signflow_payload::PayloadConfig;
use signflow_sdk::ClientConfig;
use std::path::Path;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_VAR: &str = "SIGNFLOW_MCP_CONFIG";

/// Everything the tools need except the per-call bearer token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Workflow service connection
    pub client: ClientConfig,
    /// Rule-based extraction
    pub extractor: ExtractorConfig,
    /// Request-body assembly
    pub payload: PayloadConfig,
    /// Gemini model settings
    pub gemini: GeminiConfig,
    /// AI composition path
    pub composer: ComposerConfig,
    /// Gemini API key, only ever taken from the environment
    #[serde(skip)]
    pub gemini_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, McpError> {
        toml::from_str(toml_str)
            .map_err(|e| McpError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, McpError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Config file named by `SIGNFLOW_MCP_CONFIG` (if any), then the process
    /// environment on top
    pub fn from_env() -> Result<Self, McpError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables
    ///
    /// `SIGNFLOW_BASE_URL`, `SIGNFLOW_TEMPLATE_ID`, `SIGNFLOW_TEMPLATE_VERSION`,
    /// `SIGNFLOW_EMAIL_DOMAIN`, `GEMINI_MODEL`, `GEMINI_API_KEY`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("SIGNFLOW_BASE_URL") {
            self.client.base_url = v;
        }
        if let Some(v) = var("SIGNFLOW_TEMPLATE_ID") {
            self.client.template_id = v;
        }
        if let Some(v) = var("SIGNFLOW_TEMPLATE_VERSION") {
            self.client.template_version = v;
        }
        if let Some(v) = var("SIGNFLOW_EMAIL_DOMAIN") {
            self.payload.placeholder_email_domain = v;
        }
        if let Some(v) = var("GEMINI_MODEL") {
            self.gemini.model = v;
        }
        if let Some(v) = var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(v);
        }
    }

    /// Validate the local (non-remote) sections
    ///
    /// The client section is checked when a remote tool is called, so
    /// `preview_workflow` works without a template id.
    pub fn validate(&self) -> Result<(), McpError> {
        self.extractor.validate().map_err(McpError::Config)?;
        self.payload.validate().map_err(McpError::Config)?;
        self.gemini.validate().map_err(McpError::Config)?;
        self.composer.validate().map_err(McpError::Config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SIGNFLOW_TEMPLATE_ID", "tpl-9"),
            ("SIGNFLOW_BASE_URL", "http://localhost:9999"),
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", " "),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.client.template_id, "tpl-9");
        assert_eq!(config.client.base_url, "http://localhost:9999");
        assert_eq!(config.gemini_api_key.as_deref(), Some("k"));
        assert_eq!(config.gemini.model, GeminiConfig::default().model);
    }

    #[test]
    fn test_load_sections_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[client]\ntemplate_id = \"tpl-file\"\n\n[payload]\nplaceholder_email_domain = \"corp.test\""
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.client.template_id, "tpl-file");
        assert_eq!(config.payload.placeholder_email_domain, "corp.test");
        assert_eq!(config.extractor, ExtractorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_section_fails_validation() {
        let config = ServerConfig::from_toml("[payload]\nplaceholder_email_domain = \"\"").unwrap();
        assert!(matches!(config.validate(), Err(McpError::Config(_))));
    }
}
