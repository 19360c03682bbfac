//! Coercion of raw editor input into typed prop values.
//!
//! Editors hand over strings; these functions turn them into the declared
//! type and never fail. Unparseable numbers become `0`, unparseable arrays
//! and objects become empty ones.

use pagewright_common::{ComponentNode, PropValue};

/// Leading numeric prefix, like `parseFloat`; NaN and garbage become 0
pub fn to_number(raw: &str) -> PropValue {
    let trimmed = raw.trim();
    let parsed = trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| numeric_prefix(trimmed).and_then(|p| p.parse::<f64>().ok()))
        .filter(|n| n.is_finite())
        .unwrap_or(0.0);
    PropValue::Number(parsed)
}

/// `"true"` and `"1"` (any case, surrounding whitespace ignored) are true
pub fn to_boolean(raw: &str) -> PropValue {
    let normalized = raw.trim().to_ascii_lowercase();
    PropValue::Bool(normalized == "true" || normalized == "1")
}

pub fn to_array(raw: &str) -> PropValue {
    match serde_json::from_str::<PropValue>(raw) {
        Ok(PropValue::Array(items)) => PropValue::Array(items),
        _ => PropValue::Array(Vec::new()),
    }
}

pub fn to_object(raw: &str) -> PropValue {
    match serde_json::from_str::<PropValue>(raw) {
        Ok(PropValue::Object(map)) => PropValue::Object(map),
        _ => PropValue::Object(Default::default()),
    }
}

pub fn to_node(raw: &str) -> PropValue {
    match serde_json::from_str::<ComponentNode>(raw) {
        Ok(node) => PropValue::node(node),
        Err(_) => PropValue::Null,
    }
}

pub fn to_function(raw: &str) -> PropValue {
    let name = raw.trim();
    if name.is_empty() {
        PropValue::Null
    } else {
        PropValue::function(name)
    }
}

/// Best-effort typing for props with no schema: JSON if it parses, else a string
pub fn infer(raw: &str) -> PropValue {
    serde_json::from_str::<PropValue>(raw).unwrap_or_else(|_| PropValue::String(raw.to_string()))
}

fn numeric_prefix(s: &str) -> Option<&str> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    seen_digit.then(|| &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(to_number("42"), PropValue::Number(42.0));
        assert_eq!(to_number(" -3.5 "), PropValue::Number(-3.5));
        assert_eq!(to_number("12px"), PropValue::Number(12.0));
        assert_eq!(to_number("abc"), PropValue::Number(0.0));
        assert_eq!(to_number("NaN"), PropValue::Number(0.0));
        assert_eq!(to_number(""), PropValue::Number(0.0));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(to_boolean("true"), PropValue::Bool(true));
        assert_eq!(to_boolean("TRUE "), PropValue::Bool(true));
        assert_eq!(to_boolean("1"), PropValue::Bool(true));
        assert_eq!(to_boolean("false"), PropValue::Bool(false));
        assert_eq!(to_boolean("yes please"), PropValue::Bool(false));
    }

    #[test]
    fn test_array_and_object_fallbacks() {
        assert_eq!(
            to_array("[1, \"a\"]"),
            PropValue::Array(vec![PropValue::Number(1.0), PropValue::from("a")])
        );
        assert_eq!(to_array("{\"a\": 1}"), PropValue::Array(vec![]));
        assert_eq!(to_array("not json"), PropValue::Array(vec![]));

        assert!(matches!(to_object("{\"a\": 1}"), PropValue::Object(m) if m.len() == 1));
        assert!(matches!(to_object("[1]"), PropValue::Object(m) if m.is_empty()));
    }

    #[test]
    fn test_node_and_function() {
        assert!(matches!(
            to_node(r#"{ "id": "x", "type": "Button" }"#),
            PropValue::Node(_)
        ));
        assert_eq!(to_node("nope"), PropValue::Null);
        assert_eq!(
            to_function(" handleClick "),
            PropValue::function("handleClick")
        );
        assert_eq!(to_function("  "), PropValue::Null);
    }

    #[test]
    fn test_infer() {
        assert_eq!(infer("3"), PropValue::Number(3.0));
        assert_eq!(infer("true"), PropValue::Bool(true));
        assert_eq!(infer("hello world"), PropValue::from("hello world"));
    }
}
