//! Test cases — a name plus a run function over a per-case context
//!
//! Steps inside a case run in strict sequence: `CaseCtx::check` executes
//! one spec, evaluates its expectations fail-fast, and hands back the
//! response so later steps can extract values from it (create → delete →
//! verify flows).

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;

use restcheck_core::expect::{AssertionError, ExpectationSet, TemplateError};
use restcheck_core::request::{BuildError, RequestSpec};
use restcheck_core::response::ResponseRecord;

use crate::executor::{Executor, NetworkError};

/// Anything that ends a case early. Local to the case: sibling cases
/// keep running.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("{operation}: {source}")]
    Check {
        operation: String,
        source: AssertionError,
    },
    #[error("missing field in response: {0}")]
    MissingField(String),
    #[error("aborted: suite deadline exceeded")]
    Aborted,
}

type CaseFn = Box<dyn Fn(&mut CaseCtx) -> Result<(), StepError> + Send + Sync>;

/// One named test case.
pub struct Case {
    name: String,
    run: CaseFn,
}

impl Case {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&mut CaseCtx) -> Result<(), StepError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn execute(&self, ctx: &mut CaseCtx) -> Result<(), StepError> {
        (self.run)(ctx)
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case").field("name", &self.name).finish()
    }
}

/// Per-case execution context: a seeded RNG for fixtures, the shared
/// executor, and the run's timing limits.
pub struct CaseCtx<'a> {
    executor: &'a Executor,
    rng: SmallRng,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl<'a> CaseCtx<'a> {
    pub(crate) fn new(
        executor: &'a Executor,
        rng: SmallRng,
        timeout: Option<Duration>,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            executor,
            rng,
            timeout,
            deadline,
        }
    }

    /// The case's seeded random source for fixture generation.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Execute one spec and evaluate its expectations.
    ///
    /// Returns the response so later steps can extract values from it.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] on transport failure, the first failing
    /// predicate, or once the run deadline has passed.
    pub fn check(
        &mut self,
        spec: RequestSpec,
        expectations: ExpectationSet,
    ) -> Result<ResponseRecord, StepError> {
        let cap = self.remaining_cap()?;
        let operation = format!("{} {}", spec.method(), spec.url());

        let response = self.executor.send_capped(&spec, cap)?;
        expectations
            .evaluate(&response)
            .map_err(|source| StepError::Check { operation, source })?;
        Ok(response)
    }

    /// Effective timeout ceiling: the run-level timeout bounded by the
    /// time left before the deadline.
    fn remaining_cap(&self) -> Result<Option<Duration>, StepError> {
        let Some(deadline) = self.deadline else {
            return Ok(self.timeout);
        };
        let remaining = deadline
            .checked_duration_since(Instant::now())
            .filter(|r| !r.is_zero())
            .ok_or(StepError::Aborted)?;
        Ok(Some(match self.timeout {
            Some(timeout) => timeout.min(remaining),
            None => remaining,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    fn ctx(executor: &Executor, deadline: Option<Instant>) -> CaseCtx<'_> {
        CaseCtx::new(executor, SmallRng::seed_from_u64(1), None, deadline)
    }

    #[test]
    fn expired_deadline_aborts_before_sending() {
        let executor = Executor::new().unwrap();
        let mut ctx = ctx(&executor, Some(Instant::now()));
        // The host is unroutable; reaching it would error differently.
        let spec = RequestSpec::get("http://192.0.2.1/items").build().unwrap();
        let err = ctx
            .check(spec, ExpectationSet::new().status(200))
            .unwrap_err();
        assert!(matches!(err, StepError::Aborted));
        assert_eq!(err.to_string(), "aborted: suite deadline exceeded");
    }

    #[test]
    fn build_errors_convert_into_step_errors() {
        fn fails() -> Result<RequestSpec, StepError> {
            Ok(RequestSpec::builder().url("nowhere").build()?)
        }
        assert!(matches!(fails().unwrap_err(), StepError::Build(_)));
    }

    #[test]
    fn template_errors_convert_into_step_errors() {
        fn fails() -> Result<ExpectationSet, StepError> {
            Ok(ExpectationSet::new().json_like(&json!({"$type": "widget"}))?)
        }
        assert!(matches!(fails().unwrap_err(), StepError::Template(_)));
    }

    #[test]
    fn check_error_display_names_the_operation() {
        let err = StepError::Check {
            operation: "GET https://example.com/items/1".to_string(),
            source: AssertionError::Status {
                expected: 200,
                actual: 404,
            },
        };
        assert_eq!(
            err.to_string(),
            "GET https://example.com/items/1: status: expected 200, got 404"
        );
    }
}
