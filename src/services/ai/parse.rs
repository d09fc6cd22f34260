use serde_json::{Map, Value};

use crate::errors::ClassifyError;
use crate::models::{Category, Classification, Priority};

const SNIPPET_CHARS: usize = 80;

/// Removes one layer of markdown code fencing (```` ``` ```` or ```` ```json ````)
/// along with surrounding whitespace.
pub fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses a model reply into a label pair.
///
/// The reply must contain a JSON object, either bare, fenced, or embedded in
/// surrounding prose. Anything else is a format error. Within the object, a
/// `category` or `priority` that is missing, not a string, or outside its
/// closed set is replaced by that field's default while the other is kept.
pub fn parse_labels(reply: &str) -> Result<Classification, ClassifyError> {
    let cleaned = strip_fences(reply);

    let object = parse_object(cleaned)
        .or_else(|| brace_span(cleaned).and_then(parse_object))
        .ok_or_else(|| ClassifyError::Format(snippet(reply)))?;

    let category = label(&object, "category", Category::parse).unwrap_or_default();
    let priority = label(&object, "priority", Priority::parse).unwrap_or_default();

    Ok(Classification::new(category, priority))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn label<T>(object: &Map<String, Value>, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let value = object.get(key);
    let parsed = value.and_then(Value::as_str).and_then(parse);
    if parsed.is_none() {
        tracing::debug!(key, value = ?value, "invalid label in model reply, using default");
    }
    parsed
}

fn snippet(reply: &str) -> String {
    let mut s: String = reply.chars().take(SNIPPET_CHARS).collect();
    if reply.chars().count() > SNIPPET_CHARS {
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_json() {
        let result = parse_labels(r#"{"category":"account","priority":"low"}"#).unwrap();
        assert_eq!(result, Classification::new(Category::Account, Priority::Low));
    }

    #[test]
    fn test_parse_json_fenced() {
        let reply = "```json\n{\"category\":\"billing\",\"priority\":\"high\"}\n```";
        let result = parse_labels(reply).unwrap();
        assert_eq!(result, Classification::new(Category::Billing, Priority::High));
    }

    #[test]
    fn test_parse_plain_fenced_with_whitespace() {
        let reply = "\n  ```\n{\"category\":\"technical\",\"priority\":\"critical\"}\n```  \n";
        let result = parse_labels(reply).unwrap();
        assert_eq!(result, Classification::new(Category::Technical, Priority::Critical));
    }

    #[test]
    fn test_parse_json_inside_prose() {
        let reply = "Sure! Here is the classification: {\"category\":\"billing\",\"priority\":\"medium\"} Hope that helps.";
        let result = parse_labels(reply).unwrap();
        assert_eq!(result, Classification::new(Category::Billing, Priority::Medium));
    }

    #[test]
    fn test_invalid_category_is_repaired_alone() {
        let result = parse_labels(r#"{"category":"invoice","priority":"high"}"#).unwrap();
        assert_eq!(result, Classification::new(Category::General, Priority::High));
    }

    #[test]
    fn test_invalid_priority_is_repaired_alone() {
        let result = parse_labels(r#"{"category":"technical","priority":"urgent"}"#).unwrap();
        assert_eq!(result, Classification::new(Category::Technical, Priority::Medium));
    }

    #[test]
    fn test_wrong_types_and_missing_keys_use_defaults() {
        let result = parse_labels(r#"{"category":3,"priority":{"level":"high"}}"#).unwrap();
        assert_eq!(result, Classification::default());

        let result = parse_labels(r#"{"priority":"low"}"#).unwrap();
        assert_eq!(result, Classification::new(Category::General, Priority::Low));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let reply = r#"{"category":"account","priority":"high","confidence":0.9,"reason":"login"}"#;
        let result = parse_labels(reply).unwrap();
        assert_eq!(result, Classification::new(Category::Account, Priority::High));
    }

    #[test]
    fn test_case_mismatch_is_not_a_member() {
        let result = parse_labels(r#"{"category":"Billing","priority":"HIGH"}"#).unwrap();
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn test_no_json_is_format_error() {
        assert!(matches!(parse_labels("I think this is billing, high"), Err(ClassifyError::Format(_))));
        assert!(matches!(parse_labels(""), Err(ClassifyError::Format(_))));
        assert!(matches!(parse_labels("```json\n```"), Err(ClassifyError::Format(_))));
    }

    #[test]
    fn test_non_object_json_is_format_error() {
        assert!(matches!(parse_labels(r#"["billing","high"]"#), Err(ClassifyError::Format(_))));
        assert!(matches!(parse_labels("\"billing\""), Err(ClassifyError::Format(_))));
        assert!(matches!(parse_labels("42"), Err(ClassifyError::Format(_))));
    }

    #[test]
    fn test_strip_fences_leaves_unfenced_text() {
        assert_eq!(strip_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_fences("```JSON\n{}\n```"), "{}");
    }

    #[test]
    fn test_format_error_snippet_is_truncated() {
        let reply = "é".repeat(200);
        match parse_labels(&reply) {
            Err(ClassifyError::Format(s)) => assert_eq!(s.chars().count(), SNIPPET_CHARS + 3),
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
