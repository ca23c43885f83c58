//! Ordered expectation sets with fail-fast evaluation

use crate::response::ResponseRecord;

use super::matcher::{MatchMode, Mismatch, match_template};
use super::template::{Template, TemplateError};

/// One predicate over a [`ResponseRecord`].
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Literal status-code equality.
    Status(u16),
    /// Subset match: expected keys must be present and match, extra
    /// actual keys are ignored.
    JsonLike(Template),
    /// Exact match: keys must correspond exactly within the compared
    /// subtree.
    JsonMatch(Template),
    /// Validate the body against a JSON Schema.
    BodySchema(serde_json::Value),
}

/// An ordered sequence of predicates, evaluated in declaration order.
/// The first failure short-circuits.
#[derive(Debug, Clone, Default)]
pub struct ExpectationSet {
    predicates: Vec<Expectation>,
}

impl ExpectationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(mut self, code: u16) -> Self {
        self.predicates.push(Expectation::Status(code));
        self
    }

    /// Add a subset-match predicate.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the expected value contains a
    /// malformed placeholder marker.
    pub fn json_like(mut self, expected: &serde_json::Value) -> Result<Self, TemplateError> {
        self.predicates
            .push(Expectation::JsonLike(Template::parse(expected)?));
        Ok(self)
    }

    /// Add an exact-match predicate.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the expected value contains a
    /// malformed placeholder marker.
    pub fn json_match(mut self, expected: &serde_json::Value) -> Result<Self, TemplateError> {
        self.predicates
            .push(Expectation::JsonMatch(Template::parse(expected)?));
        Ok(self)
    }

    #[must_use]
    pub fn body_schema(mut self, schema: serde_json::Value) -> Self {
        self.predicates.push(Expectation::BodySchema(schema));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate all predicates in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing predicate's [`AssertionError`];
    /// predicates declared after it are not evaluated.
    pub fn evaluate(&self, response: &ResponseRecord) -> Result<(), AssertionError> {
        for predicate in &self.predicates {
            match predicate {
                Expectation::Status(expected) => {
                    if response.status_code != *expected {
                        return Err(AssertionError::Status {
                            expected: *expected,
                            actual: response.status_code,
                        });
                    }
                }
                Expectation::JsonLike(template) => {
                    let body = require_json(response)?;
                    match_template(template, body, MatchMode::Subset)
                        .map_err(AssertionError::Subset)?;
                }
                Expectation::JsonMatch(template) => {
                    let body = require_json(response)?;
                    match_template(template, body, MatchMode::Exact)
                        .map_err(AssertionError::Exact)?;
                }
                Expectation::BodySchema(schema) => {
                    let body = require_json(response)?;
                    let validator = jsonschema::validator_for(schema).map_err(|e| {
                        AssertionError::InvalidSchema {
                            message: e.to_string(),
                        }
                    })?;
                    let errors: Vec<String> = validator
                        .iter_errors(body)
                        .take(5)
                        .map(|e| e.to_string())
                        .collect();
                    if !errors.is_empty() {
                        return Err(AssertionError::Schema {
                            message: errors.join("; "),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn require_json(response: &ResponseRecord) -> Result<&serde_json::Value, AssertionError> {
    response.json().ok_or_else(|| AssertionError::NotJson {
        snippet: response.body_snippet(),
    })
}

/// A failed predicate, carrying enough context for the failure detail.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssertionError {
    #[error("status: expected {expected}, got {actual}")]
    Status { expected: u16, actual: u16 },
    #[error("json subset mismatch {0}")]
    Subset(Mismatch),
    #[error("json exact mismatch {0}")]
    Exact(Mismatch),
    #[error("expected a JSON body, got {snippet}")]
    NotJson { snippet: String },
    #[error("schema violation: {message}")]
    Schema { message: String },
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}
