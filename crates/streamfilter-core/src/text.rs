//! Character-safe truncation and display rendering of JSON values.

use std::borrow::Cow;

use serde_json::Value;

/// Keep at most `max_chars` characters of `s`. Counts characters, not
/// bytes, so multi-byte text is never split.
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Render a JSON value for display: strings as their raw text, everything
/// else as compact JSON.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("", 3), "");
        assert_eq!(truncate("héllo wörld", 7), "héllo w");
        assert_eq!(truncate("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("plain text")), "plain text");
        assert_eq!(stringify(&json!(1)), "1");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "null");
        assert_eq!(
            stringify(&json!([{"type": "text", "text": "boom"}])),
            r#"[{"type":"text","text":"boom"}]"#
        );
    }
}
