//! Response records — the read-only result of one executed request

use std::collections::HashMap;

/// Body of a response: parsed JSON when the payload is valid JSON,
/// raw bytes otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

/// One response, produced once per executed [`crate::RequestSpec`].
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: ResponseBody,
}

impl ResponseRecord {
    /// The body as JSON, if it parsed as such.
    #[must_use]
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// A short, lossy body excerpt for failure messages.
    #[must_use]
    pub fn body_snippet(&self) -> String {
        match &self.body {
            ResponseBody::Empty => "<empty body>".to_string(),
            ResponseBody::Json(v) => truncate(&v.to_string(), 200),
            ResponseBody::Raw(bytes) => truncate(&String::from_utf8_lossy(bytes), 200),
        }
    }
}

/// Truncate on a char boundary, appending an ellipsis when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_accessor() {
        let record = ResponseRecord {
            status_code: 200,
            headers: HashMap::new(),
            body: ResponseBody::Json(json!({"id": 1})),
        };
        assert_eq!(record.json(), Some(&json!({"id": 1})));

        let raw = ResponseRecord {
            status_code: 200,
            headers: HashMap::new(),
            body: ResponseBody::Raw(b"<html>".to_vec()),
        };
        assert!(raw.json().is_none());
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let record = ResponseRecord {
            status_code: 200,
            headers: HashMap::new(),
            body: ResponseBody::Raw(long.into_bytes()),
        };
        let snippet = record.body_snippet();
        assert!(snippet.len() < 500);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let s = "é".repeat(200);
        assert!(truncate(&s, 201).ends_with('…'));
    }
}
