//! Robust JSON extraction from AI provider output.
//!
//! Providers are asked for bare JSON but routinely wrap it in prose or
//! markdown code fences. Three stages are attempted in order until one
//! parses: the full string, the first fenced code block, then a
//! brace-balanced substring. Only when all three fail does extraction
//! error out, carrying the raw payload for diagnostics.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// The AI responded, but no JSON object could be recovered by any stage.
#[derive(Debug, Error)]
#[error("no JSON object could be extracted from AI response: {raw:?}")]
pub struct MalformedTranslationError {
    /// The raw provider output, kept verbatim for later diagnosis.
    pub raw: String,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence regex must compile")
    })
}

/// Extract a JSON object from raw AI output.
///
/// Stage 1: parse the whole (trimmed) string.
/// Stage 2: parse the contents of the first ``` code fence.
/// Stage 3: parse the brace-balanced substring starting at the first `{`.
pub fn extract_json(content: &str) -> Result<Value, MalformedTranslationError> {
    let trimmed = content.trim();

    if let Some(value) = parse_object(trimmed) {
        return Ok(value);
    }

    if let Some(captures) = fence_regex().captures(content) {
        if let Some(block) = captures.get(1) {
            if let Some(value) = parse_object(block.as_str().trim()) {
                return Ok(value);
            }
        }
    }

    if let Some(candidate) = balanced_object(content) {
        if let Some(value) = parse_object(candidate) {
            return Ok(value);
        }
    }

    Err(MalformedTranslationError {
        raw: content.to_owned(),
    })
}

/// Extract the `"translation"` field from a JSON object embedded in raw AI
/// output. A parseable object without that field is still malformed from the
/// caller's point of view.
pub fn extract_translation(content: &str) -> Result<String, MalformedTranslationError> {
    let value = extract_json(content)?;

    match value.get("translation").and_then(Value::as_str) {
        Some(translation) if !translation.trim().is_empty() => {
            Ok(translation.trim().to_owned())
        }
        _ => Err(MalformedTranslationError {
            raw: content.to_owned(),
        }),
    }
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}

/// Return the substring from the first `{` to its matching `}`.
///
/// Counts nested brace pairs and skips braces inside JSON string literals,
/// so nested objects and brace characters in translated text do not
/// truncate the extraction early.
fn balanced_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let bytes = content.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Stage 1: direct parse ====================

    #[test]
    fn test_extract_direct_json() {
        let value = extract_json(r#"{"key": "value", "num": 42}"#).expect("Should parse");
        assert_eq!(value["key"], "value");
        assert_eq!(value["num"], 42);
    }

    #[test]
    fn test_extract_direct_json_with_surrounding_whitespace() {
        let value = extract_json("  \n{\"a\": 1}\n  ").expect("Should parse");
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_extract_rejects_non_object_json() {
        assert!(extract_json("[1, 2, 3]").is_err());
        assert!(extract_json("\"just a string\"").is_err());
        assert!(extract_json("42").is_err());
    }

    // ==================== Stage 2: code fence ====================

    #[test]
    fn test_extract_from_json_fence() {
        let raw = "Here is the result:\n```json\n{\"title\": \"Earthquake Alert\"}\n```\nDone.";
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["title"], "Earthquake Alert");
    }

    #[test]
    fn test_extract_from_plain_fence() {
        let raw = "```\n{\"title\": \"Flood Warning\"}\n```";
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["title"], "Flood Warning");
    }

    #[test]
    fn test_extract_fence_with_nested_object() {
        let raw = "```json\n{\"outer\": {\"inner\": true}}\n```";
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["outer"]["inner"], true);
    }

    // ==================== Stage 3: brace balance ====================

    #[test]
    fn test_extract_brace_fallback() {
        let raw = r#"Some preamble text {"fallback": true} trailing text"#;
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["fallback"], true);
    }

    #[test]
    fn test_extract_brace_fallback_nested_objects() {
        // A greedy or non-greedy regex would truncate at the first `}`;
        // the balance scan must not.
        let raw = r#"noise {"a": {"b": {"c": 1}}, "d": 2} more noise"#;
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["a"]["b"]["c"], 1);
        assert_eq!(value["d"], 2);
    }

    #[test]
    fn test_extract_brace_inside_string_literal() {
        let raw = r#"prefix {"text": "a } brace and { another"} suffix"#;
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["text"], "a } brace and { another");
    }

    #[test]
    fn test_extract_escaped_quote_inside_string() {
        let raw = r#"x {"text": "quote \" then } brace"} y"#;
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["text"], "quote \" then } brace");
    }

    #[test]
    fn test_extract_multibyte_noise_around_object() {
        let raw = r#"翻訳結果は次の通りです {"translation": "津波警報"} 以上"#;
        let value = extract_json(raw).expect("Should parse");
        assert_eq!(value["translation"], "津波警報");
    }

    // ==================== Failure ====================

    #[test]
    fn test_extract_no_json_fails() {
        let err = extract_json("no json here").expect_err("Should fail");
        assert_eq!(err.raw, "no json here");
    }

    #[test]
    fn test_extract_unbalanced_braces_fail() {
        assert!(extract_json("{\"a\": 1").is_err());
        assert!(extract_json("oops { not json").is_err());
    }

    #[test]
    fn test_extract_empty_input_fails() {
        assert!(extract_json("").is_err());
        assert!(extract_json("   ").is_err());
    }

    // ==================== extract_translation ====================

    #[test]
    fn test_extract_translation_direct() {
        assert_eq!(
            extract_translation(r#"{"translation":"hi"}"#).expect("Should parse"),
            "hi"
        );
    }

    #[test]
    fn test_extract_translation_fenced() {
        assert_eq!(
            extract_translation("```json\n{\"translation\":\"hi\"}\n```").expect("Should parse"),
            "hi"
        );
    }

    #[test]
    fn test_extract_translation_with_noise() {
        assert_eq!(
            extract_translation(r#"noise {"translation":"hi"} trailing"#).expect("Should parse"),
            "hi"
        );
    }

    #[test]
    fn test_extract_translation_missing_field_fails() {
        assert!(extract_translation(r#"{"other": "hi"}"#).is_err());
    }

    #[test]
    fn test_extract_translation_empty_value_fails() {
        assert!(extract_translation(r#"{"translation": "   "}"#).is_err());
    }

    #[test]
    fn test_extract_translation_keeps_raw_for_diagnostics() {
        let err = extract_translation("garbage output").expect_err("Should fail");
        assert!(err.raw.contains("garbage"));
        assert!(err.to_string().contains("garbage"));
    }

    // ==================== Properties ====================

    proptest! {
        /// Any JSON object embedded in fence markup or prose noise must
        /// survive extraction unchanged.
        #[test]
        fn prop_object_survives_wrapping(
            key in "[a-z]{1,8}",
            value in "[a-zA-Z0-9あ-ん一-鿐 ._-]{0,40}",
            prefix in "[a-zA-Z0-9 .,!?]{0,20}",
            suffix in "[a-zA-Z0-9 .,!?]{0,20}",
        ) {
            let object = serde_json::json!({ &key: &value });
            let raw_object = object.to_string();

            for wrapped in [
                raw_object.clone(),
                format!("```json\n{}\n```", raw_object),
                format!("{}{}{}", prefix, raw_object, suffix),
            ] {
                let extracted = extract_json(&wrapped).expect("object should survive");
                prop_assert_eq!(&extracted, &object);
            }
        }

        /// Extraction never panics on arbitrary input.
        #[test]
        fn prop_extract_never_panics(input in any::<String>()) {
            let _ = extract_json(&input);
        }
    }
}
