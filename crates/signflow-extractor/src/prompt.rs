//! LLM prompt for composing a workflow request body directly from text

use crate::error::ComposeError;
use std::path::Path;

/// Marker replaced by the user's requirement text
pub const USER_INPUT_MARKER: &str = "{USER_INPUT}";

/// Builds the composition prompt from a template
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            template: COMPOSE_TEMPLATE.to_string(),
        }
    }
}

impl PromptBuilder {
    /// Use a custom template
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Template` if the template lacks `{USER_INPUT}`.
    pub fn new(template: impl Into<String>) -> Result<Self, ComposeError> {
        let template = template.into();
        if !template.contains(USER_INPUT_MARKER) {
            return Err(ComposeError::Template(format!(
                "template does not contain {}",
                USER_INPUT_MARKER
            )));
        }
        Ok(Self { template })
    }

    /// Load a template from a file
    pub fn from_file(path: &Path) -> Result<Self, ComposeError> {
        let template = std::fs::read_to_string(path).map_err(|e| {
            ComposeError::Template(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::new(template)
    }

    /// Build the complete prompt
    pub fn build(&self, requirement: &str) -> String {
        self.template.replace(USER_INPUT_MARKER, requirement.trim())
    }
}

const COMPOSE_TEMPLATE: &str = r#"You configure document-signing workflows.

Read the requirement below and answer with ONE JSON object and nothing else.
The object is the body of a workflow update request and has this shape:

{
  "dynamicProperties": { ... field descriptors keyed by "<path>#p" ... },
  "workflowData": {
    "documents": [
      {"id": "<uuid>", "documentName": "<name>", "subDocuments": [],
       "stamps": {"mergedDocumentStamp": true,
                  "stampSeries": {"stampSeriesEnabled": false, "seriesConfig": [{}]}}}
    ],
    "invitees": {
      "inviteeCards": [
        {"id": "<uuid>",
         "inviteeCard": {
           "id": "<uuid>",
           "inviteeType": "signer",
           "inviteeSigningLevel": <1-based order>,
           "inviteeDetails": [{"id": "<uuid>", "inviteeLabel": "<name>", "inviteeEmail": "<email>"}],
           "inviteeSettings": {"securityOptions": {"twoFa": false, "oneFa": true, "faceCapture": true}},
           "combinations": [
             {"id": "<uuid>",
              "assignedDocuments": [{"documentReference": "/documents/<document id>", "role": "signer", "id": "<uuid>"}],
              "combinationSettings": {"esignTypes": { ... }}}
           ]}}
      ]
    },
    "pack": {"packName": "<title>"}
  },
  "versionDescription": "<short description>",
  "rules": []
}

Rules:
- Every signer is assigned every document.
- esignTypes per signer:
  - standard: {"virtualEsign": {"virtualEsignEnabled": true, "virtualEsignConfig": {}}}
  - aadhaar: {"aadharEsign": {"aadharEsignEnabled": true, "addharEsignConfig": {"aadhaarOtp": true}}}
  - dsc: {"dscToken": {"enableDscToken": true, "dscTokenConfig": {}}}
  - multiple: all three of the above plus {"docSign": {"enableDocSigner": true}}
- Use the signing order stated in the requirement, otherwise the order signers are mentioned.
- Leave inviteeEmail empty when no address is given for a signer.
- Every "id" is a fresh UUID.

Requirement:
{USER_INPUT}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_substitutes_input() {
        let prompt = PromptBuilder::default().build("  two documents, one signer  ");
        assert!(prompt.ends_with("two documents, one signer\n"));
        assert!(!prompt.contains(USER_INPUT_MARKER));
    }

    #[test]
    fn test_custom_template_requires_marker() {
        assert!(matches!(
            PromptBuilder::new("no marker here"),
            Err(ComposeError::Template(_))
        ));
        let builder = PromptBuilder::new("Q: {USER_INPUT}").unwrap();
        assert_eq!(builder.build("hello"), "Q: hello");
    }

    #[test]
    fn test_template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Requirement => {USER_INPUT}").unwrap();
        let builder = PromptBuilder::from_file(file.path()).unwrap();
        assert_eq!(builder.build("x"), "Requirement => x");
    }

    #[test]
    fn test_missing_template_file() {
        let result = PromptBuilder::from_file(Path::new("/nonexistent/prompt.md"));
        assert!(matches!(result, Err(ComposeError::Template(_))));
    }
}
