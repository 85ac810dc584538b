//! Signer module - one invitee of a signing workflow

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity-verification method attached to a signer
///
/// `Multiple` widens the usual one-to-one selection: the signer is offered
/// every method at once instead of a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureMethod {
    /// Plain electronic signature
    #[default]
    Standard,

    /// Aadhaar OTP based eSign
    Aadhaar,

    /// Digital signature certificate token
    Dsc,

    /// Every method offered simultaneously
    Multiple,
}

impl SignatureMethod {
    /// All methods in declaration order
    pub const ALL: [SignatureMethod; 4] = [
        SignatureMethod::Standard,
        SignatureMethod::Aadhaar,
        SignatureMethod::Dsc,
        SignatureMethod::Multiple,
    ];

    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::Standard => "standard",
            SignatureMethod::Aadhaar => "aadhaar",
            SignatureMethod::Dsc => "dsc",
            SignatureMethod::Multiple => "multiple",
        }
    }

    /// Classify a free-text annotation such as `"aadhaar eSign"` or `"DSC"`.
    ///
    /// Case-insensitive substring match. Both spellings of Aadhaar are
    /// accepted. Anything unrecognized is `Standard`.
    ///
    /// # Examples
    ///
    /// ```
    /// use signflow_domain::SignatureMethod;
    ///
    /// assert_eq!(SignatureMethod::from_annotation("Aadhar eSign"), SignatureMethod::Aadhaar);
    /// assert_eq!(SignatureMethod::from_annotation("multiple sign types"), SignatureMethod::Multiple);
    /// assert_eq!(SignatureMethod::from_annotation("wet ink"), SignatureMethod::Standard);
    /// ```
    pub fn from_annotation(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("aadhaar") || lower.contains("aadhar") {
            SignatureMethod::Aadhaar
        } else if lower.contains("dsc") {
            SignatureMethod::Dsc
        } else if lower.contains("multiple") {
            SignatureMethod::Multiple
        } else {
            SignatureMethod::Standard
        }
    }

    /// Document-wide default derived from a whole-text keyword scan.
    ///
    /// Unlike [`from_annotation`](Self::from_annotation) this never yields
    /// `Multiple`.
    pub fn document_default(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("aadhaar") || lower.contains("aadhar") {
            SignatureMethod::Aadhaar
        } else if lower.contains("dsc") {
            SignatureMethod::Dsc
        } else {
            SignatureMethod::Standard
        }
    }

    /// Parse an exact method name (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(SignatureMethod::Standard),
            "aadhaar" | "aadhar" => Some(SignatureMethod::Aadhaar),
            "dsc" => Some(SignatureMethod::Dsc),
            "multiple" => Some(SignatureMethod::Multiple),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignatureMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid signature method: {}", s))
    }
}

/// A signer as understood by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    /// Display label, title-cased, numeric prefixes stripped
    pub name: String,

    /// Signature method offered to this signer
    pub signature_method: SignatureMethod,

    /// Bound e-mail address, empty when none was given
    pub email: String,

    /// 1-based signing order
    pub signing_level: u32,
}

impl Signer {
    /// Create a signer with no e-mail bound
    pub fn new(name: impl Into<String>, signature_method: SignatureMethod, signing_level: u32) -> Self {
        Self {
            name: name.into(),
            signature_method,
            email: String::new(),
            signing_level,
        }
    }

    /// Whether an e-mail address is bound
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_priority() {
        // aadhaar wins over dsc when both appear
        assert_eq!(
            SignatureMethod::from_annotation("aadhaar or dsc"),
            SignatureMethod::Aadhaar
        );
        assert_eq!(SignatureMethod::from_annotation("DSC token"), SignatureMethod::Dsc);
        assert_eq!(SignatureMethod::from_annotation(""), SignatureMethod::Standard);
    }

    #[test]
    fn test_document_default_never_multiple() {
        assert_eq!(
            SignatureMethod::document_default("multiple sign types"),
            SignatureMethod::Standard
        );
        assert_eq!(
            SignatureMethod::document_default("All signers use Aadhaar"),
            SignatureMethod::Aadhaar
        );
    }

    #[test]
    fn test_parse_round_trip() {
        for method in SignatureMethod::ALL {
            assert_eq!(method.as_str().parse::<SignatureMethod>().unwrap(), method);
        }
        assert!("wet-ink".parse::<SignatureMethod>().is_err());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(SignatureMethod::default(), SignatureMethod::Standard);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&SignatureMethod::Dsc).unwrap();
        assert_eq!(json, "\"dsc\"");
    }

    #[test]
    fn test_new_signer_has_no_email() {
        let signer = Signer::new("Customer", SignatureMethod::Dsc, 2);
        assert!(!signer.has_email());
        assert_eq!(signer.signing_level, 2);
    }
}
