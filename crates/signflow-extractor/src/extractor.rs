//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::documents::extract_documents;
use crate::emails::{collect_bindings, find_emails};
use crate::error::ExtractorError;
use crate::signers::extract_signers;
use crate::text::{truncate_chars, Text};
use signflow_domain::{ExtractionFallback, SignatureMethod, SignerSource, WorkflowIr};
use tracing::{debug, info, warn};

/// Turns free text into a [`WorkflowIr`] using ordered string-matching rules
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns `ExtractorError::Config` if the configuration is invalid.
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract documents, signers and e-mail bindings from `raw`.
    ///
    /// Never fails. Missing cues fall back to placeholders and the degraded
    /// paths taken are listed in [`WorkflowIr::fallbacks`].
    pub fn extract(&self, raw: &str) -> WorkflowIr {
        let mut fallbacks = Vec::new();

        let original_chars = raw.chars().count();
        let raw = if original_chars > self.config.max_text_length {
            warn!(
                "Input of {} chars exceeds limit {}, truncating",
                original_chars, self.config.max_text_length
            );
            fallbacks.push(ExtractionFallback::TruncatedInput { original_chars });
            truncate_chars(raw, self.config.max_text_length)
        } else {
            raw
        };

        let text = Text::new(raw);
        let default_method = SignatureMethod::document_default(raw);

        let (documents, document_rule) = extract_documents(&text, &self.config);
        fallbacks.extend(document_rule.fallback());
        debug!("Documents via {:?}: {:?}", document_rule, documents);

        let (mut signers, signer_rule) = extract_signers(&text, &self.config, default_method);
        fallbacks.extend(signer_rule.fallback());
        let signer_source = signer_rule.source();
        debug!("Signers via {:?}: {} found", signer_rule, signers.len());

        let emails = find_emails(raw);
        let email_assignments =
            collect_bindings(&text.lower, signer_source != SignerSource::SignerClause);

        for (index, signer) in signers.iter_mut().enumerate() {
            if let Some(email) = email_assignments.resolve(index, &signer.name) {
                signer.email = email.to_string();
            }
        }

        let first_email_fallback = signer_source.allows_first_email_fallback()
            && !email_assignments.has_position(0);
        if first_email_fallback {
            if let (Some(first), Some(email)) = (signers.first_mut(), emails.first()) {
                if !first.has_email() {
                    debug!("Assigning first e-mail literal to {}", first.name);
                    first.email = email.clone();
                }
            }
        }

        info!(
            "Extracted {} documents and {} signers ({} fallbacks)",
            documents.len(),
            signers.len(),
            fallbacks.len()
        );

        WorkflowIr {
            documents,
            signers,
            email_assignments,
            emails,
            default_method,
            document_source: document_rule.source(),
            signer_source,
            fallbacks,
        }
    }
}
