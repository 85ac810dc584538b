//! Configuration management for the CLI.
//!
//! Profiles hold gateway and template settings only. Bearer tokens and API
//! keys come from flags or the environment and are never written to disk.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use signflow_llm::GeminiConfig;
use signflow_payload::PayloadConfig;
use signflow_sdk::{ClientConfig, DEFAULT_BASE_URL};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Gateway profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Gateway base URL
    pub gateway_url: String,

    /// Workflow template id
    #[serde(default)]
    pub template_id: String,

    /// Workflow template version
    #[serde(default = "default_template_version")]
    pub template_version: String,

    /// Gemini model override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,

    /// Domain for placeholder e-mail addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_domain: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// Workflow client settings for this profile
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            template_version: self.template_version.clone(),
            ..ClientConfig::new(self.gateway_url.clone(), self.template_id.clone())
        }
    }

    /// Payload settings for this profile
    pub fn payload_config(&self) -> PayloadConfig {
        let mut config = PayloadConfig::default();
        if let Some(domain) = &self.placeholder_domain {
            config.placeholder_email_domain = domain.clone();
        }
        config
    }

    /// Gemini settings for this profile
    pub fn gemini_config(&self) -> GeminiConfig {
        let mut config = GeminiConfig::default();
        if let Some(model) = &self.gemini_model {
            config.model = model.clone();
        }
        config
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_BASE_URL.to_string(),
            template_id: String::new(),
            template_version: default_template_version(),
            gemini_model: None,
            placeholder_domain: None,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".signflow").join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from `path`, or defaults bound to `path` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn active_profile(&self) -> Result<&Profile> {
        self.profile(&self.active_profile)
    }

    /// Get a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", name)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Delete a profile other than the active one.
    pub fn remove_profile(&mut self, name: &str) -> Result<Profile> {
        if name == self.active_profile {
            return Err(CliError::NotPermitted(format!(
                "Cannot delete active profile '{}'",
                name
            )));
        }
        self.profiles
            .remove(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' does not exist", name)))
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(default_profile(), Profile::default());

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_template_version() -> String {
    "0.1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        let profile = config.active_profile().unwrap();
        assert_eq!(profile.gateway_url, DEFAULT_BASE_URL);
        assert!(profile.template_id.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "prod".to_string(),
            Profile {
                gateway_url: "https://gateway.example.com".to_string(),
                template_id: "tpl-1".to_string(),
                placeholder_domain: Some("corp.test".to_string()),
                ..Profile::default()
            },
        );
        config.switch_profile("prod".to_string()).unwrap();
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "prod");
        assert_eq!(reloaded.profiles.len(), 2);
        assert_eq!(reloaded.active_profile().unwrap().template_id, "tpl-1");

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("token"));
        assert!(!written.contains("gemini_model"));
    }

    #[test]
    fn test_switch_to_missing_profile() {
        let mut config = Config::default();
        assert!(config.switch_profile("missing".to_string()).is_err());
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_cannot_remove_active_profile() {
        let mut config = Config::default();
        config.set_profile("staging".to_string(), Profile::default());

        assert!(matches!(
            config.remove_profile("default"),
            Err(CliError::NotPermitted(_))
        ));
        assert!(config.remove_profile("staging").is_ok());
        assert!(config.remove_profile("staging").is_err());
    }

    #[test]
    fn test_profile_derived_configs() {
        let profile = Profile {
            gateway_url: "http://localhost:8080".to_string(),
            template_id: "tpl-9".to_string(),
            template_version: "2.0".to_string(),
            gemini_model: Some("gemini-test".to_string()),
            placeholder_domain: Some("corp.test".to_string()),
        };

        let client = profile.client_config();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.template_id, "tpl-9");
        assert_eq!(client.template_version, "2.0");
        assert!(client.validate().is_ok());

        assert_eq!(profile.payload_config().placeholder_email_domain, "corp.test");
        assert_eq!(profile.gemini_config().model, "gemini-test");
    }
}
