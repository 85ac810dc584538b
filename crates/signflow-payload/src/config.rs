//! Configuration for the PayloadBuilder

use serde::{Deserialize, Serialize};

/// Configuration for the PayloadBuilder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Domain of the `placeholder<N>@<domain>` address given to signers without an e-mail
    pub placeholder_email_domain: String,

    /// Pack title prefix; the build timestamp is appended
    pub pack_name_prefix: String,

    /// `versionDescription` sent with the update request
    pub version_description: String,

    /// chrono format string for the timestamp in the pack title
    pub pack_timestamp_format: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            placeholder_email_domain: "example.com".to_string(),
            pack_name_prefix: "NLP Generated Workflow".to_string(),
            version_description: "Updated with AI-generated configuration".to_string(),
            pack_timestamp_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl PayloadConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let domain = self.placeholder_email_domain.trim();
        if domain.is_empty() {
            return Err("placeholder_email_domain must not be empty".to_string());
        }
        if domain.contains('@') || domain.contains(char::is_whitespace) || !domain.contains('.') {
            return Err(format!(
                "placeholder_email_domain '{}' is not a valid domain",
                domain
            ));
        }
        if self.pack_name_prefix.trim().is_empty() {
            return Err("pack_name_prefix must not be empty".to_string());
        }
        if self.pack_timestamp_format.trim().is_empty() {
            return Err("pack_timestamp_format must not be empty".to_string());
        }
        Ok(())
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
