//! Intermediate representation produced by the extractor

use crate::signer::{SignatureMethod, Signer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to a signer used as an e-mail binding key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignerRef {
    /// Zero-based position in the signer list
    Position(usize),

    /// Lower-cased signer name
    Name(String),
}

impl SignerRef {
    /// Build a name reference, lower-casing the name
    pub fn name(name: &str) -> Self {
        SignerRef::Name(name.trim().to_lowercase())
    }
}

/// Explicit e-mail bindings found in the raw text
///
/// Built once during extraction. Later bindings for the same key replace
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAssignments {
    by_position: BTreeMap<usize, String>,
    by_name: BTreeMap<String, String>,
}

impl EmailAssignments {
    /// Create an empty binding table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an address to a signer reference, replacing any previous binding
    pub fn bind(&mut self, target: SignerRef, email: impl Into<String>) {
        match target {
            SignerRef::Position(index) => {
                self.by_position.insert(index, email.into());
            }
            SignerRef::Name(name) => {
                self.by_name.insert(name, email.into());
            }
        }
    }

    /// Look up a binding
    pub fn get(&self, target: &SignerRef) -> Option<&str> {
        match target {
            SignerRef::Position(index) => self.by_position.get(index),
            SignerRef::Name(name) => self.by_name.get(name),
        }
        .map(String::as_str)
    }

    /// Resolve the address for the signer at `index` named `name`.
    ///
    /// Position bindings take precedence over name bindings.
    pub fn resolve(&self, index: usize, name: &str) -> Option<&str> {
        self.get(&SignerRef::Position(index))
            .or_else(|| self.get(&SignerRef::name(name)))
    }

    /// Whether a binding exists for the given position
    pub fn has_position(&self, index: usize) -> bool {
        self.by_position.contains_key(&index)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.by_position.len() + self.by_name.len()
    }

    /// Whether no bindings exist
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which extraction rule produced the document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    /// `documents: X, Y, Z`
    DocumentsColon,
    /// `documents X and Y`
    DocumentsWord,
    /// `with X and Y documents`
    WithDocuments,
    /// Isolated capital letters anywhere in the text
    SingleLetters,
    /// Nothing recognized
    Placeholder,
}

/// Which extraction rule produced the signer list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerSource {
    /// Parsed from a `signers:` clause with per-signer annotations
    SignerClause,
    /// Known first names and role words found in the text
    KnownNames,
    /// Nothing recognized
    Placeholder,
}

impl SignerSource {
    /// Whether the first globally-found e-mail may be given to the first signer.
    ///
    /// Only the simple paths qualify; when a signer clause was parsed the
    /// caller already stated per-signer details.
    pub fn allows_first_email_fallback(&self) -> bool {
        !matches!(self, SignerSource::SignerClause)
    }
}

/// A degraded-but-valid extraction path that was taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ExtractionFallback {
    /// Document names were guessed from isolated capital letters
    DocumentsFromLetters,
    /// No document cue at all, a placeholder name was used
    PlaceholderDocument,
    /// Signers were guessed from known names and role words
    SignersFromKnownNames,
    /// No signer cue at all, placeholder signers were used
    PlaceholderSigners,
    /// Input exceeded the configured maximum and was truncated
    TruncatedInput {
        /// Original length in characters
        original_chars: usize,
    },
}

impl fmt::Display for ExtractionFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFallback::DocumentsFromLetters => {
                write!(f, "documents guessed from single capital letters")
            }
            ExtractionFallback::PlaceholderDocument => write!(f, "no documents recognized"),
            ExtractionFallback::SignersFromKnownNames => {
                write!(f, "signers guessed from known names and roles")
            }
            ExtractionFallback::PlaceholderSigners => write!(f, "no signers recognized"),
            ExtractionFallback::TruncatedInput { original_chars } => {
                write!(f, "input truncated ({} chars)", original_chars)
            }
        }
    }
}

/// Normalized extraction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowIr {
    /// Document names in order; never empty
    pub documents: Vec<String>,

    /// Signers in signing order
    pub signers: Vec<Signer>,

    /// Explicit e-mail bindings
    pub email_assignments: EmailAssignments,

    /// Every e-mail literal found in the raw text, in order of appearance
    pub emails: Vec<String>,

    /// Whole-text default method used by the simple signer paths
    pub default_method: SignatureMethod,

    /// Rule that produced `documents`
    pub document_source: DocumentSource,

    /// Rule that produced `signers`
    pub signer_source: SignerSource,

    /// Degraded paths taken during extraction
    pub fallbacks: Vec<ExtractionFallback>,
}

impl WorkflowIr {
    /// Number of signer-document pairs the payload will wire up
    pub fn combination_count(&self) -> usize {
        self.documents.len() * self.signers.len()
    }

    /// Whether any fallback path was taken
    pub fn is_degraded(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_binding_replaces_earlier() {
        let mut assignments = EmailAssignments::new();
        assignments.bind(SignerRef::Position(0), "a@b.com");
        assignments.bind(SignerRef::Position(0), "c@d.com");
        assert_eq!(assignments.get(&SignerRef::Position(0)), Some("c@d.com"));
        assert_eq!(assignments.len(), 1);
    }

    #[test]
    fn test_position_beats_name() {
        let mut assignments = EmailAssignments::new();
        assignments.bind(SignerRef::name("Ronit"), "ronit@x.com");
        assignments.bind(SignerRef::Position(0), "first@x.com");

        assert_eq!(assignments.resolve(0, "Ronit"), Some("first@x.com"));
        assert_eq!(assignments.resolve(3, "RONIT"), Some("ronit@x.com"));
        assert_eq!(assignments.resolve(1, "Sid"), None);
    }

    #[test]
    fn test_first_email_fallback_only_for_simple_paths() {
        assert!(!SignerSource::SignerClause.allows_first_email_fallback());
        assert!(SignerSource::KnownNames.allows_first_email_fallback());
        assert!(SignerSource::Placeholder.allows_first_email_fallback());
    }

    #[test]
    fn test_assignments_serialize_with_string_keys() {
        let mut assignments = EmailAssignments::new();
        assignments.bind(SignerRef::Position(1), "b@c.com");
        let json = serde_json::to_value(&assignments).unwrap();
        assert_eq!(json["by_position"]["1"], "b@c.com");
    }
}
