//! Expected-value templates
//!
//! Expected JSON is written as a plain `serde_json::Value` in which two
//! single-key marker objects denote placeholders:
//!
//! - `{"$pattern": "^\\d+$"}` — the actual value must match the regex
//! - `{"$type": "number"}` — the actual value must have that runtime type
//!
//! `Template::parse` compiles the value into a tagged tree once, so
//! evaluation is a single dispatch over the variants.

use regex::Regex;

/// Type tags accepted by the `$type` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Number,
    String,
    Boolean,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled expected-value tree.
///
/// `Literal` leaves hold scalars only; objects and arrays in the source
/// value become `Object`/`Array` nodes so placeholders can appear at any
/// depth.
#[derive(Debug, Clone)]
pub enum Template {
    Literal(serde_json::Value),
    Pattern(Regex),
    Kind(TypeKind),
    Object(Vec<(String, Template)>),
    Array(Vec<Template>),
}

impl Template {
    /// Compile an expected value, resolving placeholder markers.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for an unparseable `$pattern` regex, an
    /// unknown `$type` tag, or a marker whose value is not a string.
    pub fn parse(expected: &serde_json::Value) -> Result<Self, TemplateError> {
        Self::parse_at(expected, "$")
    }

    fn parse_at(expected: &serde_json::Value, path: &str) -> Result<Self, TemplateError> {
        match expected {
            serde_json::Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(marker) = map.get("$pattern") {
                        let source = marker.as_str().ok_or_else(|| {
                            TemplateError::MalformedMarker {
                                path: path.to_string(),
                                marker: "$pattern",
                            }
                        })?;
                        let regex =
                            Regex::new(source).map_err(|e| TemplateError::InvalidPattern {
                                path: path.to_string(),
                                message: e.to_string(),
                            })?;
                        return Ok(Self::Pattern(regex));
                    }
                    if let Some(marker) = map.get("$type") {
                        let tag = marker.as_str().ok_or_else(|| {
                            TemplateError::MalformedMarker {
                                path: path.to_string(),
                                marker: "$type",
                            }
                        })?;
                        let kind = TypeKind::from_tag(tag).ok_or_else(|| {
                            TemplateError::UnknownTypeTag {
                                path: path.to_string(),
                                tag: tag.to_string(),
                            }
                        })?;
                        return Ok(Self::Kind(kind));
                    }
                }
                let mut pairs = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let child = format!("{path}.{key}");
                    pairs.push((key.clone(), Self::parse_at(value, &child)?));
                }
                Ok(Self::Object(pairs))
            }
            serde_json::Value::Array(items) => {
                let mut templates = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let child = format!("{path}[{i}]");
                    templates.push(Self::parse_at(item, &child)?);
                }
                Ok(Self::Array(templates))
            }
            scalar => Ok(Self::Literal(scalar.clone())),
        }
    }
}

/// A malformed expected-value template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid pattern at {path}: {message}")]
    InvalidPattern { path: String, message: String },
    #[error("unknown type tag \"{tag}\" at {path} (expected number, string, or boolean)")]
    UnknownTypeTag { path: String, tag: String },
    #[error("{marker} marker at {path} must hold a string")]
    MalformedMarker { path: String, marker: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_parse_to_literals() {
        assert!(matches!(Template::parse(&json!(1)).unwrap(), Template::Literal(_)));
        assert!(matches!(Template::parse(&json!("a")).unwrap(), Template::Literal(_)));
        assert!(matches!(Template::parse(&json!(null)).unwrap(), Template::Literal(_)));
    }

    #[test]
    fn pattern_marker_compiles() {
        let tpl = Template::parse(&json!({"$pattern": "^\\d+$"})).unwrap();
        match tpl {
            Template::Pattern(re) => assert!(re.is_match("42")),
            other => panic!("expected pattern, got {other:?}"),
        }
    }

    #[test]
    fn type_marker_parses() {
        let tpl = Template::parse(&json!({"$type": "number"})).unwrap();
        assert!(matches!(tpl, Template::Kind(TypeKind::Number)));
    }

    #[test]
    fn bad_pattern_reports_path() {
        let err = Template::parse(&json!({"id": {"$pattern": "["}})).unwrap_err();
        match err {
            TemplateError::InvalidPattern { path, .. } => assert_eq!(path, "$.id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_type_tag_rejected() {
        let err = Template::parse(&json!({"$type": "array"})).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTypeTag { .. }));
    }

    #[test]
    fn marker_value_must_be_string() {
        let err = Template::parse(&json!({"$type": 3})).unwrap_err();
        assert!(matches!(err, TemplateError::MalformedMarker { .. }));
    }

    #[test]
    fn nested_structure_preserved() {
        let tpl = Template::parse(&json!({"a": [{"b": 1}]})).unwrap();
        match tpl {
            Template::Object(pairs) => {
                assert_eq!(pairs.len(), 1);
                assert!(matches!(pairs[0].1, Template::Array(_)));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn multi_key_object_with_marker_key_is_an_object() {
        // Markers are single-key objects only.
        let tpl = Template::parse(&json!({"$type": "number", "x": 1})).unwrap();
        assert!(matches!(tpl, Template::Object(_)));
    }
}
