//! JSON extraction from model text.
//!
//! Models asked for JSON without schema enforcement often wrap it in a
//! markdown code fence or surround it with prose. These helpers recover the
//! JSON value in those cases.

use serde_json::Value as JsonValue;

/// Where recovered JSON was found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSource {
    /// Inside a markdown code fence.
    CodeFence,
    /// Embedded in surrounding prose.
    Embedded,
}

impl JsonSource {
    /// Short human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            JsonSource::CodeFence => "markdown code fence",
            JsonSource::Embedded => "surrounding text",
        }
    }
}

/// JSON value recovered from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedJson {
    /// The parsed value.
    pub value: JsonValue,
    /// Where it was found.
    pub source: JsonSource,
}

/// Recover a JSON object or array from text that may contain markdown or
/// prose.
///
/// Code fences are tried first (a ```` ```json ```` fence before an
/// unlabelled one), then the earliest balanced `{...}` or `[...]` span that
/// parses. Returns `None` if nothing parses.
///
/// # Example
///
/// ```rust
/// use strata_ai_output::parser::{extract_json_from_text, JsonSource};
///
/// let text = "Here you go:\n```json\n{\"title\": \"Inception\"}\n```";
/// let found = extract_json_from_text(text).unwrap();
/// assert_eq!(found.value["title"], "Inception");
/// assert_eq!(found.source, JsonSource::CodeFence);
/// ```
#[must_use]
pub fn extract_json_from_text(text: &str) -> Option<ExtractedJson> {
    let text = text.trim();

    if let Some(value) = extract_from_markdown_json(text).or_else(|| extract_from_markdown_plain(text))
    {
        return Some(ExtractedJson {
            value,
            source: JsonSource::CodeFence,
        });
    }

    find_embedded_json(text).map(|value| ExtractedJson {
        value,
        source: JsonSource::Embedded,
    })
}

/// Extract JSON from a ```` ```json ... ``` ```` block.
fn extract_from_markdown_json(text: &str) -> Option<JsonValue> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let marker = "```json";

    let mut from = 0;
    while let Some(found) = lower[from..].find(marker) {
        let content_start = from + found + marker.len();
        let rest = &text[content_start..];
        if let Some(end) = rest.find("```") {
            if let Ok(value) = serde_json::from_str(rest[..end].trim()) {
                return Some(value);
            }
        }
        from = content_start;
    }
    None
}

/// Extract JSON from a ```` ``` ... ``` ```` block with any or no language tag.
fn extract_from_markdown_plain(text: &str) -> Option<JsonValue> {
    let start = text.find("```")?;
    let rest = &text[start + 3..];

    // Skip the language identifier line.
    let content_start = rest.find('\n').map(|i| i + 1).unwrap_or(0);
    let rest = &rest[content_start..];

    let end = rest.find("```")?;
    serde_json::from_str(rest[..end].trim()).ok()
}

/// The earliest-starting balanced `{...}` or `[...]` span that parses.
///
/// Single pass: open brackets go on a stack and a span is parsed only when
/// its bracket closes. Quotes are tracked only inside a span, so prose
/// apostrophes and quotes before the JSON do not matter.
fn find_embedded_json(text: &str) -> Option<JsonValue> {
    let mut opens: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;
    // A parsed span inside a bracket that is still open.
    let mut nested: Option<(usize, JsonValue)> = None;

    for (i, c) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' if !opens.is_empty() => in_string = !in_string,
            '{' | '[' if !in_string => opens.push(i),
            '}' | ']' if !in_string => {
                let Some(start) = opens.pop() else {
                    continue;
                };
                if nested.as_ref().is_some_and(|(found, _)| *found < start) {
                    continue;
                }

                let parsed = serde_json::from_str::<JsonValue>(&text[start..=i]).ok();
                if opens.is_empty() {
                    if let Some(value) = parsed {
                        return Some(value);
                    }
                    if let Some((_, value)) = nested {
                        return Some(value);
                    }
                } else if let Some(value) = parsed {
                    nested = Some((start, value));
                }
            }
            _ => {}
        }
    }

    nested.map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extract_markdown_json_block() {
        let text = r#"Here is the result:
```json
{"name": "test", "value": 42}
```
Done!"#;
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value, json!({"name": "test", "value": 42}));
        assert_eq!(found.source, JsonSource::CodeFence);
    }

    #[test]
    fn test_extract_markdown_uppercase_tag() {
        let text = "```JSON\n{\"k\": 1}\n```";
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"k": 1}));
    }

    #[test]
    fn test_extract_markdown_plain_block() {
        let text = "```\n{\"key\": \"value\"}\n```";
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value, json!({"key": "value"}));
        assert_eq!(found.source, JsonSource::CodeFence);
    }

    #[test]
    fn test_extract_embedded_object() {
        let text = r#"The answer is {"x": 1, "y": 2} and that's it."#;
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value, json!({"x": 1, "y": 2}));
        assert_eq!(found.source, JsonSource::Embedded);
    }

    #[test]
    fn test_extract_embedded_array_of_objects() {
        let text = r#"Items: [{"a": 1}, {"a": 2}] are listed."#;
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value, json!([{"a": 1}, {"a": 2}]));
    }

    #[test]
    fn test_skips_brackets_that_are_not_json() {
        let text = r#"[note] the result: {"ok": true}"#;
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"ok": true}));
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"Result: {"code": "if (x) { return y; }", "valid": true}"#;
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value["valid"], true);
    }

    #[test]
    fn test_escaped_quotes() {
        let text = r#"say {"message": "He said \"hello\""}"#;
        let found = extract_json_from_text(text).unwrap();
        assert_eq!(found.value["message"], "He said \"hello\"");
    }

    #[test]
    fn test_first_of_multiple_objects() {
        let text = r#"First: {"a": 1}, Second: {"b": 2}"#;
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"a": 1}));
    }

    #[test]
    fn test_no_json() {
        assert!(extract_json_from_text("This is just plain text.").is_none());
        assert!(extract_json_from_text("{\"title\": \"Incep").is_none());
        assert!(extract_json_from_text("}}]] {").is_none());
        assert!(extract_json_from_text("").is_none());
    }

    #[test]
    fn test_non_ascii_text_does_not_panic() {
        let text = "Ünïcödé İ ```json\n{\"a\": \"é\"}\n```";
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"a": "é"}));
    }

    #[test]
    fn test_object_inside_unclosed_bracket() {
        let text = r#"[draft {"a": {"b": 1}} and {"c": 2}"#;
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_object_inside_bracket_that_is_not_json() {
        let text = r#"(see [note: {"ok": true}]) then [1, 2]"#;
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"ok": true}));
    }

    #[test]
    fn test_quotes_in_prose_before_json() {
        let text = r#"The "answer" isn't simple: {"x": "y"}"#;
        assert_eq!(extract_json_from_text(text).unwrap().value, json!({"x": "y"}));
    }

    #[test]
    fn test_bracket_flood_is_linear() {
        let started = std::time::Instant::now();
        assert!(extract_json_from_text(&"{".repeat(100_000)).is_none());
        assert!(extract_json_from_text(&"[a ".repeat(40_000)).is_none());
        assert!(extract_json_from_text(&"[a]".repeat(40_000)).is_none());
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}
