//! Checks against the public library catalog

use serde_json::json;

use restcheck_core::expect::ExpectationSet;
use restcheck_core::request::RequestSpec;

use crate::case::Case;
use crate::suite::Suite;

/// "Fantastic Mr Fox" — a stable catalog entry.
const KNOWN_ISBN: &str = "9780140328721";

#[must_use]
pub fn suite(base_url: &str) -> Suite {
    let base = base_url.trim_end_matches('/').to_string();
    let mut cases = Vec::new();

    {
        let base = base.clone();
        cases.push(Case::new("GET /isbn/{isbn}.json returns book metadata", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/isbn/{KNOWN_ISBN}.json")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({
                    "title": {"$type": "string"},
                    "authors": [{"key": {"$pattern": "^/authors/"}}],
                }))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("book payload satisfies the catalog schema", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/isbn/{KNOWN_ISBN}.json")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).body_schema(json!({
                    "type": "object",
                    "required": ["title", "authors"],
                    "properties": {
                        "title": {"type": "string"},
                        "authors": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["key"],
                            },
                        },
                    },
                })),
            )?;
            Ok(())
        }));
    }

    Suite::new("library", cases)
}
