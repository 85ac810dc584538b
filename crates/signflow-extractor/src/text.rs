//! Low-level text helpers shared by the extraction rules

use crate::config::ExtractorConfig;

/// Input text in both original and lower-cased form.
///
/// Cue words are located in `lower`; byte offsets line up with `original`
/// only for ASCII input, so rules never slice `original` with offsets taken
/// from `lower`.
pub(crate) struct Text<'a> {
    pub original: &'a str,
    pub lower: String,
}

impl<'a> Text<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            lower: original.to_lowercase(),
        }
    }
}

/// Prefix of `text` up to the first sentence terminator.
///
/// Terminators are `!`, `?`, a newline, or a `.` that is followed by
/// whitespace or ends the text. A dot inside a token (`v1.2`, `a.b@c.com`)
/// does not end the sentence.
pub(crate) fn sentence_span(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '!' | '?' | '\n' => return &text[..idx],
            '.' => match chars.peek() {
                None => return &text[..idx],
                Some((_, next)) if next.is_whitespace() => return &text[..idx],
                _ => {}
            },
            _ => {}
        }
    }
    text
}

/// Title-case each word: first letter upper, the rest lower.
///
/// A letter starts a word when it follows whitespace, a hyphen, a slash or
/// an opening parenthesis. Digits and apostrophes do not start words, so
/// `2nd` and `director's` keep their lower-case tail.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || matches!(ch, '-' | '/' | '(');
    }
    out
}

/// Drop a leading run of digits and the whitespace after it (`"4 Signers"` -> `"Signers"`).
pub(crate) fn strip_leading_number(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start()
}

/// Collapse internal whitespace runs into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Separators between entities, in priority order
const ENTITY_SEPARATORS: [&str; 5] = [" and ", " or ", ", ", " & ", ","];

/// Split a list phrase such as `"a, b, c"` into cleaned entity names.
///
/// Only the first separator present (in priority order) splits the phrase.
/// Each token is trimmed of whitespace and list punctuation. Stop words and
/// empty tokens are dropped. A lone letter is upper-cased. A quoted token
/// keeps its inner text, title-cased. Anything else loses a leading number
/// and is kept, title-cased, only when more than one character remains.
pub(crate) fn split_entities(phrase: &str, config: &ExtractorConfig) -> Vec<String> {
    let tokens: Vec<&str> = match ENTITY_SEPARATORS.iter().find(|sep| phrase.contains(*sep)) {
        Some(separator) => phrase.split(separator).collect(),
        None => vec![phrase],
    };

    tokens
        .into_iter()
        .filter_map(|token| clean_entity(token, config))
        .collect()
}

fn clean_entity(token: &str, config: &ExtractorConfig) -> Option<String> {
    let token = token
        .trim()
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':'))
        .trim();
    if config.is_stop_word(&token.to_lowercase()) {
        return None;
    }

    let mut chars = token.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        return only
            .is_alphabetic()
            .then(|| only.to_uppercase().collect::<String>());
    }

    if token.contains('"') || token.contains('\'') {
        let inner = token.trim_matches(|c: char| c == '"' || c == '\'').trim();
        return (!inner.is_empty()).then(|| title_case(&collapse_whitespace(inner)));
    }

    let cleaned = strip_leading_number(token);
    if cleaned.chars().count() > 1 && !config.is_stop_word(&cleaned.to_lowercase()) {
        Some(title_case(&collapse_whitespace(cleaned)))
    } else {
        None
    }
}

/// Split on `separator`, ignoring separators inside parentheses.
pub(crate) fn split_outside_parens(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_span_stops_at_terminators() {
        assert_eq!(sentence_span(" a, b. Then c"), " a, b");
        assert_eq!(sentence_span(" a and b"), " a and b");
        assert_eq!(sentence_span(" a!b"), " a");
        assert_eq!(sentence_span(" a\nb"), " a");
        assert_eq!(sentence_span(" a."), " a");
    }

    #[test]
    fn test_sentence_span_keeps_inner_dots() {
        assert_eq!(sentence_span(" policy v1.2 and annex."), " policy v1.2 and annex");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sanction letter"), "Sanction Letter");
        assert_eq!(title_case("BANK signatory"), "Bank Signatory");
        assert_eq!(title_case("non-disclosure agreement"), "Non-Disclosure Agreement");
        assert_eq!(title_case("director's report"), "Director's Report");
    }

    #[test]
    fn test_strip_leading_number() {
        assert_eq!(strip_leading_number("3 sanction letter"), "sanction letter");
        assert_eq!(strip_leading_number("12annex"), "annex");
        assert_eq!(strip_leading_number("annex 2"), "annex 2");
    }

    #[test]
    fn test_split_entities_basic() {
        let config = ExtractorConfig::default();
        assert_eq!(
            split_entities(" sanction letter, loan agreement, bank guarantee", &config),
            vec!["Sanction Letter", "Loan Agreement", "Bank Guarantee"]
        );
        assert_eq!(split_entities(" a and b", &config), vec!["A", "B"]);
        assert_eq!(split_entities("x & y & z", &config), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_split_entities_uses_first_separator_only() {
        let config = ExtractorConfig::default();
        assert_eq!(split_entities("x & y or z", &config), vec!["X & Y", "Z"]);
    }

    #[test]
    fn test_split_entities_drops_stop_words_and_noise() {
        let config = ExtractorConfig::default();
        assert_eq!(split_entities("the, nda, 7", &config), vec!["Nda"]);
        assert!(split_entities("  ,  ", &config).is_empty());
    }

    #[test]
    fn test_split_entities_quoted() {
        let config = ExtractorConfig::default();
        assert_eq!(
            split_entities("\"offer letter\" and 'nda'", &config),
            vec!["Offer Letter", "Nda"]
        );
    }

    #[test]
    fn test_split_outside_parens() {
        let parts = split_outside_parens("a (x, y), b, c", ',');
        assert_eq!(parts, vec!["a (x, y)", " b", " c"]);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
