//! Recovers a JSON object from loosely formatted model output.
//!
//! Three stages, each tried only when the previous one fails:
//! 1. strict parse of the raw text
//! 2. strict parse after removing triple-backtick fences and their language tag
//! 3. strict parse of the span from the first `{` to the last `}`

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("code fence pattern is valid"));

/// Returns the first JSON object the cascade can recover, or `None`.
///
/// Only objects count as a result; a bare array or scalar falls through to the
/// next stage like any other parse failure.
pub fn repair_json(raw: &str) -> Option<Map<String, Value>> {
    parse_object(raw)
        .or_else(|| parse_object(strip_code_fences(raw).trim()))
        .or_else(|| outer_brace_span(raw).and_then(parse_object))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").into_owned()
}

/// Greedy span: first `{` through last `}` anywhere in the text.
fn outer_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_plain_json_parses_directly() {
        let parsed = repair_json(r#"{"score": 8, "feedback": "Good"}"#).unwrap();
        assert_eq!(parsed, object(json!({"score": 8, "feedback": "Good"})));
    }

    #[test]
    fn test_json_fence_with_language_tag() {
        let raw = "```json\n{\"message\": \"What is a closure?\"}\n```";
        let parsed = repair_json(raw).unwrap();
        assert_eq!(parsed["message"], "What is a closure?");
    }

    #[test]
    fn test_bare_fence_without_tag() {
        let raw = "  ```\n{\"score\": 3}\n```  ";
        assert_eq!(repair_json(raw).unwrap()["score"], 3);
    }

    #[test]
    fn test_surrounding_prose_uses_brace_span() {
        let raw = "Sure! Here is the evaluation:\n{\"score\": 6, \"category\": \"Behavioral\"}\nLet me know.";
        let parsed = repair_json(raw).unwrap();
        assert_eq!(parsed["category"], "Behavioral");
    }

    #[test]
    fn test_brace_span_is_greedy_across_nested_objects() {
        let raw = "note {\"outer\": {\"inner\": 1}} trailing";
        let parsed = repair_json(raw).unwrap();
        assert_eq!(parsed["outer"]["inner"], 1);
    }

    #[test]
    fn test_free_text_without_braces_is_none() {
        assert!(repair_json("I'm sorry, I can't help with that.").is_none());
    }

    #[test]
    fn test_unbalanced_braces_are_none() {
        assert!(repair_json("} nothing here {").is_none());
        assert!(repair_json("{\"score\": 5").is_none());
    }

    #[test]
    fn test_two_separate_objects_fail_greedy_span() {
        // The greedy span covers both objects, which is not valid JSON.
        assert!(repair_json("{\"a\": 1} and {\"b\": 2}").is_none());
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        assert!(repair_json("[1, 2, 3]").is_none());
        assert!(repair_json("\"just a string\"").is_none());
        assert!(repair_json("null").is_none());
    }

    #[test]
    fn test_empty_input_is_none() {
        assert!(repair_json("").is_none());
        assert!(repair_json("   ").is_none());
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 {}\"]{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_object() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-z_]{1,8}", arb_json(), 0..6)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn repair_round_trips_serialized_objects(obj in arb_object()) {
            let text = serde_json::to_string(&obj).unwrap();
            prop_assert_eq!(repair_json(&text), Some(obj));
        }

        #[test]
        fn repair_ignores_json_fences(obj in arb_object(), pretty in any::<bool>()) {
            let text = if pretty {
                serde_json::to_string_pretty(&obj).unwrap()
            } else {
                serde_json::to_string(&obj).unwrap()
            };
            let fenced = format!("```json\n{text}\n```");
            prop_assert_eq!(repair_json(&fenced), repair_json(&text));
        }
    }
}
