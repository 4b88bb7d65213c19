//! JSON extraction from free-form LLM responses.
//!
//! Reviewer models rarely answer with clean JSON: the payload usually arrives
//! wrapped in prose, markdown code fences, or trailing commentary. This module
//! locates the payload and deserializes it into the caller's expected shape.
//!
//! # Extraction Strategies
//!
//! Candidate spans are tried in a fixed priority order; the first one that
//! parses wins:
//! 1. The entire trimmed input (already-clean JSON)
//! 2. The first ```json code fence
//! 3. The first generic code fence (any language tag, or none)
//! 4. The span from the first '{' to the last '}' in the text
//!
//! The brace scan is deliberately not a balanced-bracket walk: the span runs
//! from the outermost first `{` to the outermost last `}`, verbatim. Inputs
//! with multiple independent brace-delimited regions (`{a} ... {b}`) combine
//! into one span and fail to parse. Known limitation, kept for compatibility.
//!
//! # Example
//!
//! ```
//! use specforge::utils::json_extraction::extract_json;
//!
//! let response = r#"Here is the result: {"name": "example", "value": 42}"#;
//! let json: serde_json::Value = extract_json(response).unwrap();
//! assert_eq!(json["value"], 42);
//! ```

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error type for JSON extraction failures.
#[derive(Debug, Error)]
pub enum JsonExtractionError {
    /// No `{`..`}` span exists anywhere in the input.
    #[error("No JSON object found in response")]
    NotFound,

    /// A candidate span was located but the parser rejected it.
    #[error("Malformed JSON content: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Extracts a JSON payload of type `T` from an LLM response.
///
/// Each strategy is tried in priority order and the first candidate span that
/// deserializes into `T` wins. The typed parse is the only validation
/// performed — callers needing guarantees beyond "this span deserialized"
/// must check the returned value themselves.
///
/// # Errors
///
/// Returns [`JsonExtractionError::NotFound`] when the input contains no
/// `{`..`}` span at all, and [`JsonExtractionError::Malformed`] when a
/// candidate span was found but none of the candidates parsed.
pub fn extract_json<T: DeserializeOwned>(content: &str) -> Result<T, JsonExtractionError> {
    let trimmed = content.trim();

    let candidates = [
        (!trimmed.is_empty()).then_some(trimmed),
        json_code_block(trimmed),
        generic_code_block(trimmed),
        brace_span(trimmed),
    ];

    let mut last_error = None;
    for candidate in candidates.into_iter().flatten() {
        match serde_json::from_str(candidate.trim()) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(err) if brace_span(trimmed).is_some() => Err(JsonExtractionError::Malformed(err)),
        _ => Err(JsonExtractionError::NotFound),
    }
}

/// Content of the first ```json code fence, if any.
fn json_code_block(content: &str) -> Option<&str> {
    let re = Regex::new(r"```json\s*\n?([\s\S]*?)\n?```").ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Content of the first generic code fence (any language tag, or none).
fn generic_code_block(content: &str) -> Option<&str> {
    let re = Regex::new(r"```(?:\w+)?\s*\n?([\s\S]*?)\n?```").ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Span from the first '{' to the last '}' in the text, inclusive.
///
/// Not balanced-bracket matching; see the module docs.
fn brace_span(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{json, Value};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
        count: u32,
    }

    #[test]
    fn test_direct_json_object() {
        let input = r#"{"name": "example", "count": 5}"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "example");
        assert_eq!(payload.count, 5);
    }

    #[test]
    fn test_direct_json_with_surrounding_whitespace() {
        let input = "  \n\t {\"name\": \"padded\", \"count\": 1} \n ";
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "padded");
    }

    #[test]
    fn test_direct_json_array() {
        let input = "[1, 2, 3]";
        let values: Vec<u32> = extract_json(input).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_json_code_fence_with_prose() {
        let input = r#"Here is the response:
```json
{"name": "fenced", "count": 2}
```
Hope this helps!"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "fenced");
        assert_eq!(payload.count, 2);
    }

    #[test]
    fn test_generic_code_fence() {
        let input = r#"Response:
```
{"name": "generic", "count": 3}
```"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "generic");
    }

    #[test]
    fn test_generic_code_fence_with_trailing_prose() {
        let input = "```\n{\"name\": \"tail\", \"count\": 9}\n```\nThat's everything.";
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "tail");
    }

    #[test]
    fn test_fence_wins_over_embedded_braces() {
        // The fence candidate is tried before the brace scan, so the stray
        // object in the prose never gets a chance.
        let input = r#"Ignore this: {"name": "wrong", "count": 0}
```json
{"name": "right", "count": 7}
```"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "right");
    }

    #[test]
    fn test_only_first_fence_considered() {
        let input = r#"```json
{"name": "first", "count": 1}
```
Some commentary.
```json
{"name": "second", "count": 2}
```"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "first");
    }

    #[test]
    fn test_embedded_json_in_prose() {
        let input = r#"After analysis, here is the result: {"name": "embedded", "count": 4} — that's all."#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "embedded");
        assert_eq!(payload.count, 4);
    }

    #[test]
    fn test_braces_inside_string_literals() {
        let input = r#"Result: {"name": "a {brace} inside", "count": 8} done"#;
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "a {brace} inside");
    }

    #[test]
    fn test_nested_multiline_structure_round_trips() {
        let input = r#"The verdict follows.
```json
{
  "items": [
    {"id": 1, "tags": ["a", "b"]},
    {"id": 2, "tags": []}
  ],
  "total": 2
}
```"#;
        let value: Value = extract_json(input).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["items"][0]["tags"], json!(["a", "b"]));
        assert_eq!(value["total"], 2);
    }

    #[test]
    fn test_two_objects_combine_into_invalid_span() {
        // First-{-to-last-} takes the outermost pair, so two independent
        // objects form one unparseable span.
        let input = r#"{"name": "a", "count": 1} and {"name": "b", "count": 2}"#;
        let result: Result<Value, _> = extract_json(input);
        assert!(matches!(result, Err(JsonExtractionError::Malformed(_))));
    }

    #[test]
    fn test_valid_json_of_wrong_shape_is_malformed() {
        let input = r#"{"unexpected": true}"#;
        let result: Result<Payload, _> = extract_json(input);
        assert!(matches!(result, Err(JsonExtractionError::Malformed(_))));
    }

    #[test]
    fn test_no_braces_is_not_found() {
        let input = "No JSON here at all";
        let result: Result<Value, _> = extract_json(input);
        let err = result.unwrap_err();
        assert!(matches!(err, JsonExtractionError::NotFound));
        assert!(err.to_string().contains("No JSON object found"));
    }

    #[test]
    fn test_empty_input_fails() {
        let result: Result<Value, _> = extract_json("");
        assert!(result.is_err());
    }

    #[test]
    fn test_whitespace_only_input_fails() {
        let result: Result<Value, _> = extract_json("   \n\t  ");
        assert!(matches!(result, Err(JsonExtractionError::NotFound)));
    }

    #[test]
    fn test_unclosed_brace_is_not_found() {
        // A lone '{' never forms a first/last pair.
        let input = r#"Partial: {"name": "oops"#;
        let result: Result<Value, _> = extract_json(input);
        assert!(matches!(result, Err(JsonExtractionError::NotFound)));
    }

    #[test]
    fn test_reversed_braces_are_not_found() {
        let input = "} nothing opens before this {";
        let result: Result<Value, _> = extract_json(input);
        assert!(matches!(result, Err(JsonExtractionError::NotFound)));
    }

    #[test]
    fn test_malformed_candidate_reports_parse_failure() {
        let input = r#"Verdict: {"name": "broken", "count": }"#;
        let result: Result<Value, _> = extract_json(input);
        let err = result.unwrap_err();
        assert!(matches!(err, JsonExtractionError::Malformed(_)));
        assert!(err.to_string().contains("Malformed JSON content"));
    }

    #[test]
    fn test_fenced_content_is_trimmed() {
        let input = "```json\n\n   {\"name\": \"spaced\", \"count\": 6}   \n\n```";
        let payload: Payload = extract_json(input).unwrap();
        assert_eq!(payload.name, "spaced");
    }
}
