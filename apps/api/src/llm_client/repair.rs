//! Tolerant parsing for schema-free completion output.
//!
//! Completion responses are *expected* to be JSON but routinely arrive wrapped in
//! prose, code fences, or not as JSON at all. Parsing is an ordered chain of small
//! parsers; each returns `Some(value)` or `None` ("no match") and the first match wins.
//!
//! The coercion helpers below are the single place where model-shaped values are
//! flattened into the uniform string shapes the scan result exposes.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// A single step in a tolerant-parse chain.
pub type Parser = fn(&str) -> Option<Value>;

/// Strict decode, then embedded-fragment scan.
pub const STRUCTURED_PARSERS: [Parser; 2] = [parse_strict, parse_fragment];

/// Leftmost `{` or `[`, greedy to the last matching closer.
static FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}|\[.*\]").expect("fragment pattern is a valid regex")
});

/// Runs `chain` in order and returns the first parsed value.
pub fn parse_with(raw: &str, chain: &[Parser]) -> Option<Value> {
    chain.iter().find_map(|parser| parser(raw))
}

/// Convenience for the structured chain used by summarization and rewriting.
pub fn parse_structured(raw: &str) -> Option<Value> {
    parse_with(raw, &STRUCTURED_PARSERS)
}

/// Decodes the whole response as JSON after stripping markdown code fences.
pub fn parse_strict(raw: &str) -> Option<Value> {
    serde_json::from_str(strip_json_fences(raw)).ok()
}

/// Decodes the first embedded `{...}` or `[...]` fragment.
pub fn parse_fragment(raw: &str) -> Option<Value> {
    let fragment = FRAGMENT_RE.find(raw)?;
    serde_json::from_str(fragment.as_str()).ok()
}

/// Last-resort fallback: treats the raw text as a comma-separated list.
pub fn parse_comma_list(raw: &str) -> Option<Value> {
    let items = split_commas(raw);
    if items.is_empty() {
        None
    } else {
        Some(Value::Array(items.into_iter().map(Value::String).collect()))
    }
}

pub fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Flattens any model-shaped value into a sequence of non-blank strings.
///
/// - arrays are flattened recursively
/// - objects are serialized to compact JSON
/// - strings are first tried as JSON; otherwise split into lines
/// - numbers and booleans are stringified, `null` yields nothing
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    push_flattened(value, &mut out);
    out
}

fn push_flattened(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => items.iter().for_each(|item| push_flattened(item, out)),
        Value::Object(_) => out.push(value.to_string()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(inner @ (Value::Array(_) | Value::Object(_))) => push_flattened(&inner, out),
            _ => out.extend(
                s.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            ),
        },
        Value::Bool(_) | Value::Number(_) => out.push(value.to_string()),
    }
}

/// Coerces a value expected to be a single block of text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(_) => coerce_string_list(value).join("\n"),
        other => other.to_string(),
    }
}
