//! Template matching
//!
//! Pure comparison of a compiled [`Template`] against an actual JSON value.
//! The first divergence short-circuits and is reported with the JSON path,
//! the expected form, and the actual value.

use super::template::Template;

/// Relative epsilon for float comparison. Integers compare exactly;
/// any float operand falls back to
/// `|a - b| <= EPSILON_REL * max(1, |a|, |b|)`.
const EPSILON_REL: f64 = 1e-6;

/// How object keys are treated during matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Extra keys in the actual object are ignored.
    Subset,
    /// Keys must correspond exactly within the compared subtree.
    Exact,
}

/// The first point of divergence between template and actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "at {}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Match `actual` against `template`, reporting the first divergence.
pub(super) fn match_template(
    template: &Template,
    actual: &serde_json::Value,
    mode: MatchMode,
) -> Result<(), Mismatch> {
    match_at(template, actual, mode, "$")
}

fn match_at(
    template: &Template,
    actual: &serde_json::Value,
    mode: MatchMode,
    path: &str,
) -> Result<(), Mismatch> {
    match template {
        Template::Literal(expected) => match_literal(expected, actual, path),
        Template::Pattern(regex) => {
            let text = match actual {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                _ => None,
            };
            match text {
                Some(text) if regex.is_match(&text) => Ok(()),
                _ => Err(mismatch(path, format!("value matching /{regex}/"), actual)),
            }
        }
        Template::Kind(kind) => {
            if kind.matches(actual) {
                Ok(())
            } else {
                Err(mismatch(path, format!("a {kind} value"), actual))
            }
        }
        Template::Object(pairs) => match_object(pairs, actual, mode, path),
        Template::Array(templates) => match_array(templates, actual, mode, path),
    }
}

fn match_literal(
    expected: &serde_json::Value,
    actual: &serde_json::Value,
    path: &str,
) -> Result<(), Mismatch> {
    let matched = match (expected, actual) {
        (serde_json::Value::Number(e), serde_json::Value::Number(a)) => numbers_match(e, a),
        (e, a) => e == a,
    };
    if matched {
        Ok(())
    } else {
        Err(mismatch(path, expected.to_string(), actual))
    }
}

fn match_object(
    pairs: &[(String, Template)],
    actual: &serde_json::Value,
    mode: MatchMode,
    path: &str,
) -> Result<(), Mismatch> {
    let serde_json::Value::Object(map) = actual else {
        return Err(mismatch(path, "an object".to_string(), actual));
    };

    for (key, template) in pairs {
        let child = format!("{path}.{key}");
        match map.get(key) {
            Some(value) => match_at(template, value, mode, &child)?,
            None => {
                return Err(Mismatch {
                    path: child,
                    expected: describe(template),
                    actual: "(missing key)".to_string(),
                });
            }
        }
    }

    if mode == MatchMode::Exact {
        for (key, value) in map {
            if !pairs.iter().any(|(k, _)| k == key) {
                return Err(Mismatch {
                    path: format!("{path}.{key}"),
                    expected: "(no such key)".to_string(),
                    actual: preview(value),
                });
            }
        }
    }

    Ok(())
}

fn match_array(
    templates: &[Template],
    actual: &serde_json::Value,
    mode: MatchMode,
    path: &str,
) -> Result<(), Mismatch> {
    let serde_json::Value::Array(items) = actual else {
        return Err(mismatch(path, "an array".to_string(), actual));
    };

    // Array-broadcast: a single-element subset template is matched
    // against every element of the actual array (vacuously true when
    // the actual array is empty).
    if mode == MatchMode::Subset && templates.len() == 1 {
        for (i, item) in items.iter().enumerate() {
            match_at(&templates[0], item, mode, &format!("{path}[{i}]"))?;
        }
        return Ok(());
    }

    if mode == MatchMode::Exact && items.len() != templates.len() {
        return Err(Mismatch {
            path: path.to_string(),
            expected: format!("an array of {} elements", templates.len()),
            actual: format!("{} elements", items.len()),
        });
    }

    for (i, template) in templates.iter().enumerate() {
        let child = format!("{path}[{i}]");
        match items.get(i) {
            Some(item) => match_at(template, item, mode, &child)?,
            None => {
                return Err(Mismatch {
                    path: child,
                    expected: describe(template),
                    actual: "(missing element)".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Integers compare exactly; anything involving a float uses the epsilon.
fn numbers_match(expected: &serde_json::Number, actual: &serde_json::Number) -> bool {
    if let (Some(e), Some(a)) = (expected.as_i64(), actual.as_i64()) {
        return e == a;
    }
    if let (Some(e), Some(a)) = (expected.as_u64(), actual.as_u64()) {
        return e == a;
    }
    match (expected.as_f64(), actual.as_f64()) {
        (Some(e), Some(a)) => floats_close(e, a),
        _ => false,
    }
}

fn floats_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON_REL * 1.0_f64.max(a.abs()).max(b.abs())
}

fn mismatch(path: &str, expected: String, actual: &serde_json::Value) -> Mismatch {
    Mismatch {
        path: path.to_string(),
        expected,
        actual: preview(actual),
    }
}

/// Short text form of a template, for missing-key/element reports.
fn describe(template: &Template) -> String {
    match template {
        Template::Literal(v) => v.to_string(),
        Template::Pattern(re) => format!("value matching /{re}/"),
        Template::Kind(kind) => format!("a {kind} value"),
        Template::Object(_) => "an object".to_string(),
        Template::Array(_) => "an array".to_string(),
    }
}

/// Compact, bounded rendering of an actual value.
fn preview(value: &serde_json::Value) -> String {
    let text = value.to_string();
    if text.len() <= 120 {
        return text;
    }
    let mut end = 120;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expect::Template;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn subset(expected: Value, actual: Value) -> Result<(), Mismatch> {
        match_template(&Template::parse(&expected).unwrap(), &actual, MatchMode::Subset)
    }

    fn exact(expected: Value, actual: Value) -> Result<(), Mismatch> {
        match_template(&Template::parse(&expected).unwrap(), &actual, MatchMode::Exact)
    }

    #[test]
    fn subset_ignores_extra_keys() {
        subset(json!({"id": 1}), json!({"id": 1, "title": "x"})).unwrap();
    }

    #[test]
    fn exact_rejects_extra_keys() {
        let err = exact(json!({"id": 1}), json!({"id": 1, "title": "x"})).unwrap_err();
        assert_eq!(err.path, "$.title");
    }

    #[test]
    fn missing_key_reported_with_path() {
        let err = subset(json!({"a": {"b": 1}}), json!({"a": {}})).unwrap_err();
        assert_eq!(err.path, "$.a.b");
        assert_eq!(err.actual, "(missing key)");
    }

    #[test]
    fn nested_value_mismatch_reports_divergence_point() {
        let err = subset(json!({"a": {"b": 1}}), json!({"a": {"b": 2}})).unwrap_err();
        assert_eq!(err.path, "$.a.b");
        assert_eq!(err.expected, "1");
        assert_eq!(err.actual, "2");
    }

    #[test]
    fn integer_comparison_is_exact() {
        subset(json!(20), json!(20)).unwrap();
        assert!(subset(json!(20), json!(19)).is_err());
    }

    #[test]
    fn float_epsilon_accepts_serialization_rounding() {
        subset(json!(20.0), json!(19.999999)).unwrap();
    }

    #[test]
    fn float_epsilon_rejects_real_differences() {
        assert!(subset(json!(20.0), json!(20.5)).is_err());
    }

    #[test]
    fn mixed_int_and_float_compare_numerically() {
        subset(json!(10), json!(10.0)).unwrap();
        subset(json!(10.0), json!(10)).unwrap();
    }

    #[test]
    fn pattern_matches_strings_and_numbers() {
        subset(json!({"id": {"$pattern": "^\\d+$"}}), json!({"id": 42})).unwrap();
        subset(json!({"token": {"$pattern": "\\w+"}}), json!({"token": "abc123"})).unwrap();
        assert!(subset(json!({"id": {"$pattern": "^\\d+$"}}), json!({"id": null})).is_err());
    }

    #[test]
    fn type_tags_check_runtime_type() {
        subset(json!({"n": {"$type": "number"}}), json!({"n": 3.5})).unwrap();
        subset(json!({"s": {"$type": "string"}}), json!({"s": "x"})).unwrap();
        subset(json!({"b": {"$type": "boolean"}}), json!({"b": false})).unwrap();
        assert!(subset(json!({"n": {"$type": "number"}}), json!({"n": "3"})).is_err());
    }

    #[test]
    fn broadcast_applies_single_template_to_every_element() {
        subset(
            json!([{"id": {"$type": "number"}}]),
            json!([{"id": 1}, {"id": 2}, {"id": 3}]),
        )
        .unwrap();
    }

    #[test]
    fn broadcast_reports_first_offending_element() {
        let err = subset(
            json!([{"id": {"$type": "number"}}]),
            json!([{"id": 1}, {"id": "two"}]),
        )
        .unwrap_err();
        assert_eq!(err.path, "$[1].id");
    }

    #[test]
    fn broadcast_is_vacuous_on_empty_arrays() {
        subset(json!([{"id": 1}]), json!([])).unwrap();
    }

    #[test]
    fn positional_arrays_compare_elementwise() {
        subset(json!([1, 2]), json!([1, 2, 3])).unwrap();
        let err = subset(json!([1, 2]), json!([1])).unwrap_err();
        assert_eq!(err.actual, "(missing element)");
    }

    #[test]
    fn exact_arrays_require_equal_length() {
        let err = exact(json!([1]), json!([1, 2])).unwrap_err();
        assert_eq!(err.expected, "an array of 1 elements");
    }

    #[test]
    fn type_mismatch_at_root() {
        let err = subset(json!({"a": 1}), json!([1])).unwrap_err();
        assert_eq!(err.path, "$");
        assert_eq!(err.expected, "an object");
    }

    // Arbitrary JSON without floats (reflexivity is only meaningful for
    // exactly-representable numbers) and without marker keys.
    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn subset_match_is_reflexive(value in arb_json()) {
            let template = Template::parse(&value).unwrap();
            prop_assert!(match_template(&template, &value, MatchMode::Subset).is_ok());
        }

        #[test]
        fn broadcast_accepts_repeated_elements(element in arb_json(), n in 0usize..5) {
            let template = Template::parse(&json!([element])).unwrap();
            let actual = Value::Array(vec![element; n]);
            prop_assert!(match_template(&template, &actual, MatchMode::Subset).is_ok());
        }
    }
}
