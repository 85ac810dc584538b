//! Configuration for the Extractor and the LLM composer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the rule-based Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters); longer input is truncated
    pub max_text_length: usize,

    /// How many isolated capital letters the letter fallback keeps
    pub max_letter_documents: usize,

    /// Document name used when nothing is recognized
    pub placeholder_document: String,

    /// Signer labels used when nothing is recognized
    pub placeholder_signers: Vec<String>,

    /// First names recognized by the simple signer scan
    pub known_names: Vec<String>,

    /// Role words recognized by the simple signer scan
    pub role_words: Vec<String>,

    /// Tokens dropped while splitting entity lists
    pub stop_words: Vec<String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_letter_documents == 0 {
            return Err("max_letter_documents must be greater than 0".to_string());
        }
        if self.placeholder_document.trim().is_empty() {
            return Err("placeholder_document must not be empty".to_string());
        }
        if self.placeholder_signers.is_empty() {
            return Err("placeholder_signers must name at least one signer".to_string());
        }
        if self.placeholder_signers.iter().any(|s| s.trim().is_empty()) {
            return Err("placeholder_signers must not contain blank names".to_string());
        }
        Ok(())
    }

    /// Whether `word` (already lower-cased) is a stop word
    pub(crate) fn is_stop_word(&self, word: &str) -> bool {
        word.is_empty() || self.stop_words.iter().any(|w| w == word)
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            max_text_length: 20_000,
            max_letter_documents: 5,
            placeholder_document: "Document 1".to_string(),
            placeholder_signers: words(&["Signer 1", "Signer 2"]),
            known_names: words(&[
                "alice", "bob", "charlie", "david", "john", "jane", "ronit", "sid", "ritik",
                "priya", "rahul", "amit",
            ]),
            role_words: words(&[
                "signer",
                "signatory",
                "customer",
                "bank",
                "client",
                "manager",
                "subordinate",
            ]),
            stop_words: words(&["the", "with", "for", "in", "on", "at", "to"]),
        }
    }
}

/// Configuration for the LLM composition path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Prompt template file containing `{USER_INPUT}`; built-in template if unset
    pub prompt_template_path: Option<PathBuf>,

    /// Maximum time for one LLM call (seconds)
    pub llm_timeout_secs: u64,
}

impl ComposerConfig {
    /// Get the LLM timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            prompt_template_path: None,
            llm_timeout_secs: 180,
        }
    }
}
