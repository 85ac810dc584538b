//! Parse LLM output into a request body

use crate::error::ComposeError;
use serde_json::Value;

/// Parse an LLM reply into a JSON object, stripping markdown code fences.
pub fn parse_composed_payload(response: &str) -> Result<Value, ComposeError> {
    let json_str = strip_code_fences(response);
    if json_str.is_empty() {
        return Err(ComposeError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(json_str)?;
    if !value.is_object() {
        return Err(ComposeError::MalformedResponse(
            "Expected a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// Remove a surrounding ```` ```json ... ``` ```` fence if present.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fenced_json() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fences("```json {\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_passthrough() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_object() {
        let value = parse_composed_payload("```json\n{\"workflowData\": {}}\n```").unwrap();
        assert!(value.get("workflowData").is_some());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = parse_composed_payload("```json\n{not json\n```");
        assert!(matches!(result, Err(ComposeError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let result = parse_composed_payload("[1, 2]");
        assert!(matches!(result, Err(ComposeError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_empty_fence() {
        let result = parse_composed_payload("```json\n```");
        assert!(matches!(result, Err(ComposeError::EmptyResponse)));
    }
}
