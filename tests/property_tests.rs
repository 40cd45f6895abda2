//! Property-based tests for placeholder expansion and typed accessors.
//!
//! Expansion properties run against an in-memory map. Typed round-trips write
//! to the process environment, each under its own key so they never collide.

use std::collections::{BTreeMap, HashMap};

use dragon_env::expand_with;
use proptest::prelude::*;

/// Upper-case variable names, never empty.
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,11}"
}

/// Default values without `|`, `}` or surrounding whitespace.
fn default_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:/@-]{0,16}"
}

/// Text dense in `$`, braces and pipes, but never containing `${`.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z$}{|\\\\ ]{0,24}".prop_filter("contains ${", |s| !s.contains("${")),
        any::<String>().prop_filter("contains ${", |s| !s.contains("${")),
    ]
}

fn empty() -> HashMap<String, String> {
    HashMap::new()
}

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

proptest! {
    #[test]
    fn test_text_without_placeholders_is_unchanged(text in plain_text_strategy()) {
        prop_assert_eq!(expand_with(&text, &empty()), text);
    }

    #[test]
    fn test_set_key_expands_to_its_value(key in key_strategy(), value in any::<String>()) {
        let env = env_of(&[(key.as_str(), value.as_str())]);
        prop_assert_eq!(expand_with(&format!("${{{key}}}"), &env), value);
    }

    #[test]
    fn test_unset_key_expands_to_empty(key in key_strategy()) {
        prop_assert_eq!(expand_with(&format!("${{{key}}}"), &empty()), "");
        prop_assert_eq!(expand_with(&format!("${{{key}|}}"), &empty()), "");
    }

    #[test]
    fn test_unset_key_expands_to_default(key in key_strategy(), default in default_strategy()) {
        let template = format!("${{{key}|{default}}}");
        prop_assert_eq!(expand_with(&template, &empty()), default);
    }

    #[test]
    fn test_leading_vertical_is_default_only(default in default_strategy()) {
        prop_assert_eq!(expand_with(&format!("${{|{default}}}"), &empty()), default);
    }

    #[test]
    fn test_first_set_candidate_wins(
        first in key_strategy(),
        second in key_strategy(),
        value in "[a-z0-9]{0,8}",
        default in default_strategy(),
    ) {
        prop_assume!(first != second);
        let template = format!("${{{first}|{second}|{default}}}");

        let env = env_of(&[(second.as_str(), value.as_str())]);
        prop_assert_eq!(expand_with(&template, &env), value.clone());

        let env = env_of(&[(first.as_str(), "first"), (second.as_str(), value.as_str())]);
        prop_assert_eq!(expand_with(&template, &env), "first");

        prop_assert_eq!(expand_with(&template, &empty()), default);
    }

    #[test]
    fn test_escaped_vertical_is_part_of_key(
        head in key_strategy(),
        tail in key_strategy(),
        value in "[a-z0-9]{0,8}",
    ) {
        let literal = format!("{head}|{tail}");
        let template = format!("${{{head}\\|{tail}|fallback}}");

        let env = env_of(&[(literal.as_str(), value.as_str()), (head.as_str(), "wrong")]);
        prop_assert_eq!(expand_with(&template, &env), value);

        let env = env_of(&[(head.as_str(), "wrong")]);
        prop_assert_eq!(expand_with(&template, &env), "fallback");
    }

    #[test]
    fn test_i32_round_trip(n in any::<i32>()) {
        dragon_env::set_i32("DRAGON_PROP_I32", n).unwrap();
        prop_assert_eq!(dragon_env::must_get_i32("DRAGON_PROP_I32"), n);
    }

    #[test]
    fn test_i64_round_trip(n in any::<i64>()) {
        dragon_env::set_i64("DRAGON_PROP_I64", n).unwrap();
        prop_assert_eq!(dragon_env::must_get_i64("DRAGON_PROP_I64"), n);
    }

    #[test]
    fn test_u64_round_trip(n in any::<u64>()) {
        dragon_env::set_u64("DRAGON_PROP_U64", n).unwrap();
        prop_assert_eq!(dragon_env::must_get_u64("DRAGON_PROP_U64"), n);
    }

    #[test]
    fn test_f64_round_trip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        dragon_env::set_f64("DRAGON_PROP_F64", x).unwrap();
        prop_assert_eq!(dragon_env::must_get_f64("DRAGON_PROP_F64"), x);
    }

    #[test]
    fn test_bool_round_trip(b in any::<bool>()) {
        dragon_env::set_bool("DRAGON_PROP_BOOL", b).unwrap();
        prop_assert_eq!(dragon_env::must_get_bool("DRAGON_PROP_BOOL"), b);
    }

    #[test]
    fn test_strings_round_trip(values in prop::collection::vec("[^,\\x00]{0,8}", 1..6)) {
        dragon_env::set_strings("DRAGON_PROP_STRINGS", &values).unwrap();
        prop_assert_eq!(dragon_env::must_get_strings("DRAGON_PROP_STRINGS"), values);
    }

    #[test]
    fn test_json_round_trip(
        value in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..6),
    ) {
        dragon_env::set_json("DRAGON_PROP_JSON", &value).unwrap();
        let decoded: BTreeMap<String, i64> = dragon_env::must_get_json("DRAGON_PROP_JSON");
        prop_assert_eq!(decoded, value);
    }
}
