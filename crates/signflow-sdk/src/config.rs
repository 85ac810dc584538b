//! Workflow service client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default gateway base URL
pub const DEFAULT_BASE_URL: &str = "https://preprod-gateway.leegality.com";

/// Connection settings for the workflow service
///
/// `template_id` has no usable default and must be set before the config
/// validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway base URL
    pub base_url: String,

    /// Workflow template the draft is created from
    pub template_id: String,

    /// Version of that template
    pub template_version: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Draft names are `<prefix>_<unix seconds>`
    pub draft_name_prefix: String,

    /// `versionDescription` sent with the create request
    pub version_description: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            template_id: String::new(),
            template_version: "0.1".to_string(),
            timeout_secs: 120,
            draft_name_prefix: "NLP_Workflow".to_string(),
            version_description: "Created via natural-language workflow builder".to_string(),
        }
    }
}

impl ClientConfig {
    /// Config for `base_url` and `template_id`, defaults elsewhere
    pub fn new(base_url: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            template_id: template_id.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!("base_url must be an http(s) URL, got '{}'", base));
        }
        if self.template_id.trim().is_empty() {
            return Err("template_id must be set".to_string());
        }
        if self.template_version.trim().is_empty() {
            return Err("template_version must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.draft_name_prefix.trim().is_empty() {
            return Err("draft_name_prefix must not be empty".to_string());
        }
        Ok(())
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base}/workflow-manager/v1/workflow`
    pub fn workflow_url(&self) -> String {
        format!(
            "{}/workflow-manager/v1/workflow",
            self.base_url.trim().trim_end_matches('/')
        )
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_template_id() {
        assert!(ClientConfig::default().validate().is_err());
        assert!(ClientConfig::new(DEFAULT_BASE_URL, "tpl-1").validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = ClientConfig::new("https://gw.test", "tpl");
        let bad = [
            ClientConfig {
                base_url: "gw.test".into(),
                ..base.clone()
            },
            ClientConfig {
                timeout_secs: 0,
                ..base.clone()
            },
            ClientConfig {
                template_version: " ".into(),
                ..base.clone()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_workflow_url_trims_slash() {
        let config = ClientConfig::new("https://gw.test/", "tpl");
        assert_eq!(
            config.workflow_url(),
            "https://gw.test/workflow-manager/v1/workflow"
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClientConfig::from_toml("template_id = \"abc\"").unwrap();
        assert_eq!(config.template_id, "abc");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        let again = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, again);
    }
}
