//! Layered normalization of loosely-typed tool payloads.
//!
//! Host frameworks hand tools payloads that may be plain strings, JSON
//! objects, JSON-in-JSON under a `query` wrapper key, or single-quoted
//! pseudo-JSON. Each entry point here attempts a fixed priority order of
//! strategies and returns the first success as a typed value.

use std::sync::OnceLock;

use proto::ToolFailure;
use regex::Regex;
use serde_json::{Map, Value};

/// Error returned when the code-generation payload cannot be normalized.
pub const CODE_INPUT_ERROR: &str = "Input must be a JSON string with 'test_case', \
     'start_page_url', and optionally 'relevant_html_content_to_test' fields, or a 'query' \
     key containing such a JSON string.";

/// Error returned when the test-plan payload cannot be normalized.
pub const PLAN_INPUT_ERROR: &str = "Input must be a JSON string with 'test_name', \
     'application_url', and 'test_cases' fields, or a 'query' key containing such a JSON object.";

/// Normalized payload for the code-generation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    /// Test case description to generate a script for.
    pub test_case: String,
    /// URL the generated script starts from.
    pub start_page_url: String,
    /// Optional HTML context included verbatim in the prompt.
    pub relevant_html: Option<String>,
}

/// Renders host args as the raw string payload the normalizer works on.
pub fn raw_payload(args: &Value) -> String {
    match args {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replaces single quotes with double quotes so pseudo-JSON parses.
pub fn normalize_quotes(input: &str) -> String {
    input.replace('\'', "\"")
}

/// Clips text to at most `max_chars` code points.
pub fn clip_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Splits model output into trimmed, non-empty lines.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deterministic filesystem-safe token: non-alphanumeric runs collapse to a
/// single underscore, leading/trailing underscores are trimmed, result is
/// lower-case. Idempotent.
pub fn slugify(text: &str) -> String {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    let runs = RUNS.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid pattern"));
    runs.replace_all(text, "_").trim_matches('_').to_lowercase()
}

/// First `http(s)://` substring in the input, if any.
pub fn extract_url(input: &str) -> Option<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    let url = URL.get_or_init(|| Regex::new(r"https?://\S+").expect("valid pattern"));
    url.find(input).map(|m| m.as_str().to_string())
}

/// First `{...}` substring of the input, if any.
fn extract_braced(input: &str) -> Option<&str> {
    let start = input.find('{')?;
    let end = input[start..].find('}')? + start;
    Some(&input[start..=end])
}

/// Resolves a URL candidate from a loose analyzer payload.
///
/// The braced substring (or, absent braces, the whole payload) is parsed as
/// pseudo-JSON. A successful parse yields the `query` field if present and
/// otherwise the trimmed payload verbatim; only a failed parse falls back to
/// the first URL-pattern match, then to the trimmed payload.
pub fn resolve_url_query(raw: &str) -> String {
    let parsed = match extract_braced(raw) {
        Some(braced) => serde_json::from_str::<Value>(&normalize_quotes(braced)),
        None => serde_json::from_str::<Value>(&normalize_quotes(raw.trim())),
    };
    match parsed {
        Ok(value) => match value.get("query") {
            Some(Value::String(query)) => query.trim().to_string(),
            _ => raw.trim().to_string(),
        },
        Err(_) => extract_url(raw).unwrap_or_else(|| raw.trim().to_string()),
    }
}

/// Normalizes the code-generation payload.
///
/// The payload must parse as (pseudo-)JSON; a `query` key holding a
/// JSON-encoded string is reparsed as the real payload. Missing or empty
/// `test_case`/`start_page_url` is rejected before any model call.
pub fn parse_code_request(raw: &str) -> Result<CodeRequest, ToolFailure> {
    let parsed: Value = serde_json::from_str(&normalize_quotes(raw))
        .map_err(|_| ToolFailure::invalid_input(CODE_INPUT_ERROR))?;
    let outer = parsed
        .as_object()
        .ok_or_else(|| ToolFailure::invalid_input(CODE_INPUT_ERROR))?;

    let data: Map<String, Value> = match outer.get("query") {
        Some(Value::String(inner)) => {
            let reparsed: Value = serde_json::from_str(&normalize_quotes(inner))
                .map_err(|_| ToolFailure::invalid_input(CODE_INPUT_ERROR))?;
            reparsed
                .as_object()
                .cloned()
                .ok_or_else(|| ToolFailure::invalid_input(CODE_INPUT_ERROR))?
        }
        _ => outer.clone(),
    };

    let field = |key: &str| -> Option<String> {
        data.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    };

    let (Some(test_case), Some(start_page_url)) = (field("test_case"), field("start_page_url"))
    else {
        return Err(ToolFailure::invalid_input(
            "Both 'test_case' and 'start_page_url' must be provided.",
        ));
    };

    Ok(CodeRequest {
        test_case,
        start_page_url,
        relevant_html: field("relevant_html_content_to_test"),
    })
}

/// Normalizes the test-plan payload into a mapping.
///
/// Accepts a direct mapping, a (pseudo-)JSON string, or a `query` wrapper
/// whose value is a mapping or a JSON-encoded string.
pub fn parse_plan_request(args: &Value) -> Result<Map<String, Value>, ToolFailure> {
    let parsed: Value = match args {
        Value::Object(map) => Value::Object(map.clone()),
        Value::String(raw) => serde_json::from_str(&normalize_quotes(raw))
            .map_err(|_| ToolFailure::invalid_input(PLAN_INPUT_ERROR))?,
        _ => {
            return Err(ToolFailure::invalid_input(
                "Input must be a JSON string or dict.",
            ));
        }
    };

    let unwrapped = match parsed.get("query") {
        Some(Value::Object(inner)) => Value::Object(inner.clone()),
        Some(Value::String(inner)) => serde_json::from_str(&normalize_quotes(inner))
            .map_err(|_| ToolFailure::invalid_input(PLAN_INPUT_ERROR))?,
        _ => parsed,
    };

    match unwrapped {
        Value::Object(map) => Ok(map),
        _ => Err(ToolFailure::invalid_input(
            "Parsed input is not a dictionary.",
        )),
    }
}
