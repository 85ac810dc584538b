//! Signer extraction rules

use crate::config::ExtractorConfig;
use crate::text::{
    collapse_whitespace, sentence_span, split_outside_parens, strip_leading_number, title_case,
    Text,
};
use regex::Regex;
use signflow_domain::{ExtractionFallback, SignatureMethod, Signer, SignerSource};
use std::sync::LazyLock;

static LEVEL_OVERRIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:level|order)\s*[:#]?\s*(\d+)").expect("level pattern is valid")
});

/// Label given to a clause segment whose name cleans down to nothing
const UNNAMED_SIGNER: &str = "Signer";

/// One rule in the signer chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerRule {
    /// `signers: Name (annotation), Name (annotation)` up to the end of the sentence
    SignerClause,
    /// Known first names and role words, in order of first appearance
    KnownNames,
    /// Configured placeholder signers
    Placeholder,
}

impl SignerRule {
    /// Evaluation order
    pub const CHAIN: [SignerRule; 3] = [
        SignerRule::SignerClause,
        SignerRule::KnownNames,
        SignerRule::Placeholder,
    ];

    /// Source tag recorded on the IR
    pub fn source(&self) -> SignerSource {
        match self {
            SignerRule::SignerClause => SignerSource::SignerClause,
            SignerRule::KnownNames => SignerSource::KnownNames,
            SignerRule::Placeholder => SignerSource::Placeholder,
        }
    }

    /// Fallback recorded when this rule wins
    pub fn fallback(&self) -> Option<ExtractionFallback> {
        match self {
            SignerRule::SignerClause => None,
            SignerRule::KnownNames => Some(ExtractionFallback::SignersFromKnownNames),
            SignerRule::Placeholder => Some(ExtractionFallback::PlaceholderSigners),
        }
    }

    pub(crate) fn apply(
        &self,
        text: &Text<'_>,
        config: &ExtractorConfig,
        default_method: SignatureMethod,
    ) -> Vec<Signer> {
        match self {
            SignerRule::SignerClause => signer_clause(text),
            SignerRule::KnownNames => known_names(text, config, default_method),
            SignerRule::Placeholder => numbered(&config.placeholder_signers, default_method),
        }
    }
}

/// Run the chain and return the first non-empty result with its rule.
pub(crate) fn extract_signers(
    text: &Text<'_>,
    config: &ExtractorConfig,
    default_method: SignatureMethod,
) -> (Vec<Signer>, SignerRule) {
    for rule in SignerRule::CHAIN {
        let signers = rule.apply(text, config, default_method);
        if !signers.is_empty() {
            return (signers, rule);
        }
    }
    (
        numbered(&config.placeholder_signers, default_method),
        SignerRule::Placeholder,
    )
}

fn numbered(names: &[String], method: SignatureMethod) -> Vec<Signer> {
    names
        .iter()
        .zip(1u32..)
        .map(|(name, level)| Signer::new(name.clone(), method, level))
        .collect()
}

fn signer_clause(text: &Text<'_>) -> Vec<Signer> {
    const CUE: &str = "signers:";
    text.lower
        .find(CUE)
        .map(|idx| parse_signer_clause(sentence_span(&text.lower[idx + CUE.len()..])))
        .unwrap_or_default()
}

/// Parse the body of a `signers:` clause.
///
/// Segments are separated by commas, or by semicolons when no comma is
/// present; separators inside parentheses do not split. Each segment is
/// `name` or `name (annotation)`. The annotation selects the signature
/// method and may carry a `level N` / `order N` override for the signing
/// level; otherwise the level is the signer's 1-based position.
pub fn parse_signer_clause(clause: &str) -> Vec<Signer> {
    let separator = if split_outside_parens(clause, ',').len() > 1 {
        ','
    } else {
        ';'
    };

    let mut signers = Vec::new();
    for segment in split_outside_parens(clause, separator) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (name_part, annotation) = split_annotation(segment);
        let method = annotation
            .map(SignatureMethod::from_annotation)
            .unwrap_or_default();
        let position = signers.len() as u32 + 1;
        let level = annotation.and_then(level_override).unwrap_or(position);

        signers.push(Signer::new(clean_signer_name(name_part), method, level));
    }
    signers
}

/// Split `"name (annotation) trailing"` into name and annotation text.
fn split_annotation(segment: &str) -> (&str, Option<&str>) {
    let Some(open) = segment.find('(') else {
        return (segment, None);
    };
    let inner = &segment[open + 1..];
    match inner.find(')') {
        Some(close) => (&segment[..open], Some(&inner[..close])),
        None => (segment, None),
    }
}

fn level_override(annotation: &str) -> Option<u32> {
    LEVEL_OVERRIDE
        .captures(annotation)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|level| *level > 0)
}

/// Strip a leading number, collapse whitespace and title-case; blank becomes `"Signer"`.
pub fn clean_signer_name(raw: &str) -> String {
    let cleaned = collapse_whitespace(
        strip_leading_number(raw.trim()).trim_matches(|c: char| matches!(c, ':' | '-' | '.')),
    );
    if cleaned.is_empty() {
        UNNAMED_SIGNER.to_string()
    } else {
        title_case(&cleaned)
    }
}

fn known_names(
    text: &Text<'_>,
    config: &ExtractorConfig,
    default_method: SignatureMethod,
) -> Vec<Signer> {
    let mut found: Vec<&str> = Vec::new();
    for word in text.lower.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let known = config
            .known_names
            .iter()
            .chain(&config.role_words)
            .find(|entry| matches_word(entry, word));
        if let Some(entry) = known {
            if !found.contains(&entry.as_str()) {
                found.push(entry);
            }
        }
    }

    found
        .into_iter()
        .zip(1u32..)
        .map(|(word, level)| Signer::new(title_case(word), default_method, level))
        .collect()
}

/// Whole-word match that also accepts a plural (`customers`, `signatories`).
fn matches_word(entry: &str, word: &str) -> bool {
    word == entry
        || word.strip_suffix('s') == Some(entry)
        || word
            .strip_suffix("ies")
            .is_some_and(|stem| entry.strip_suffix('y') == Some(stem))
}
