//! Document-name extraction rules

use crate::config::ExtractorConfig;
use crate::text::{sentence_span, split_entities, Text};
use regex::Regex;
use signflow_domain::{DocumentSource, ExtractionFallback};
use std::sync::LazyLock;

static DOCUMENTS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdocuments\b").expect("documents pattern is valid"));

static WITH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwith\b").expect("with pattern is valid"));

static SINGLE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]\b").expect("single letter pattern is valid"));

/// One rule in the document-name chain.
///
/// Rules run in [`DocumentRule::CHAIN`] order; the first one that yields a
/// non-empty list wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRule {
    /// `documents: X, Y and Z` up to the end of the sentence
    DocumentsColon,
    /// `documents X and Y` (bare word, no colon) up to the end of the sentence
    DocumentsWord,
    /// `with X and Y documents`, or the list after the cue in the same sentence
    WithDocuments,
    /// Isolated capital letters anywhere in the original text
    SingleLetters,
    /// Configured placeholder name
    Placeholder,
}

impl DocumentRule {
    /// Evaluation order
    pub const CHAIN: [DocumentRule; 5] = [
        DocumentRule::DocumentsColon,
        DocumentRule::DocumentsWord,
        DocumentRule::WithDocuments,
        DocumentRule::SingleLetters,
        DocumentRule::Placeholder,
    ];

    /// Source tag recorded on the IR
    pub fn source(&self) -> DocumentSource {
        match self {
            DocumentRule::DocumentsColon => DocumentSource::DocumentsColon,
            DocumentRule::DocumentsWord => DocumentSource::DocumentsWord,
            DocumentRule::WithDocuments => DocumentSource::WithDocuments,
            DocumentRule::SingleLetters => DocumentSource::SingleLetters,
            DocumentRule::Placeholder => DocumentSource::Placeholder,
        }
    }

    /// Fallback recorded when this rule wins
    pub fn fallback(&self) -> Option<ExtractionFallback> {
        match self {
            DocumentRule::SingleLetters => Some(ExtractionFallback::DocumentsFromLetters),
            DocumentRule::Placeholder => Some(ExtractionFallback::PlaceholderDocument),
            _ => None,
        }
    }

    pub(crate) fn apply(&self, text: &Text<'_>, config: &ExtractorConfig) -> Vec<String> {
        match self {
            DocumentRule::DocumentsColon => documents_colon(text, config),
            DocumentRule::DocumentsWord => documents_word(text, config),
            DocumentRule::WithDocuments => with_documents(text, config),
            DocumentRule::SingleLetters => single_letters(text, config),
            DocumentRule::Placeholder => vec![config.placeholder_document.clone()],
        }
    }
}

/// Run the chain and return the first non-empty result with its rule.
pub(crate) fn extract_documents(
    text: &Text<'_>,
    config: &ExtractorConfig,
) -> (Vec<String>, DocumentRule) {
    for rule in DocumentRule::CHAIN {
        let documents = rule.apply(text, config);
        if !documents.is_empty() {
            return (documents, rule);
        }
    }
    (
        vec![config.placeholder_document.clone()],
        DocumentRule::Placeholder,
    )
}

fn documents_colon(text: &Text<'_>, config: &ExtractorConfig) -> Vec<String> {
    const CUE: &str = "documents:";
    text.lower
        .find(CUE)
        .map(|idx| split_entities(sentence_span(&text.lower[idx + CUE.len()..]), config))
        .unwrap_or_default()
}

fn documents_word(text: &Text<'_>, config: &ExtractorConfig) -> Vec<String> {
    for found in DOCUMENTS_WORD.find_iter(&text.lower) {
        let rest = &text.lower[found.end()..];
        if rest.starts_with(':') {
            continue;
        }
        let documents = list_after_cue(sentence_span(rest), config);
        if !documents.is_empty() {
            return documents;
        }
    }
    Vec::new()
}

fn with_documents(text: &Text<'_>, config: &ExtractorConfig) -> Vec<String> {
    for with in WITH_WORD.find_iter(&text.lower) {
        let rest = &text.lower[with.end()..];
        if !DOCUMENTS_WORD.is_match(rest) {
            continue;
        }
        let span = sentence_span(rest);
        let documents = match DOCUMENTS_WORD.find(span) {
            // "with X and Y documents": the list sits before the cue word
            Some(cue) => {
                let before = split_entities(&span[..cue.start()], config);
                if before.is_empty() {
                    list_after_cue(&span[cue.end()..], config)
                } else {
                    before
                }
            }
            None => list_after_cue(span, config),
        };
        if !documents.is_empty() {
            return documents;
        }
    }
    Vec::new()
}

/// Entities in the phrase following a cue word.
///
/// Leading stop words are skipped (`for the nda and lease`), and a colon
/// inside the phrase introduces the list (`to sign: nda and lease`).
fn list_after_cue(span: &str, config: &ExtractorConfig) -> Vec<String> {
    let mut rest = span.trim_start();
    while let Some(word) = rest.split_whitespace().next() {
        if !config.is_stop_word(word) {
            break;
        }
        rest = rest[word.len()..].trim_start();
    }
    if let Some((_, list)) = rest.split_once(':') {
        rest = list;
    }
    split_entities(rest, config)
}

fn single_letters(text: &Text<'_>, config: &ExtractorConfig) -> Vec<String> {
    let mut letters: Vec<String> = Vec::new();
    for found in SINGLE_LETTER.find_iter(text.original) {
        if letters.len() >= config.max_letter_documents {
            break;
        }
        let letter = found.as_str().to_string();
        if !letters.contains(&letter) {
            letters.push(letter);
        }
    }
    letters
}
