//! JSON Schema export for the report interchange format
//!
//! CI consumers parse the summary JSON; this schema is their contract.

use crate::report::SummaryReport;

/// Generate JSON Schema for the summary format.
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(SummaryReport);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
