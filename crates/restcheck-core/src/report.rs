//! Suite reporting — per-case outcomes collected into a summary
//!
//! The reporter is the only state shared between cases. It is held behind
//! a mutex so a parallel runner can append concurrently; order of arrival
//! is report order. Lifecycle misuse is a `SuiteError`, the one fatal
//! error class in the harness.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The result of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
}

impl TestOutcome {
    #[must_use]
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            passed: true,
            duration_ms,
            failure_detail: None,
        }
    }

    #[must_use]
    pub fn failed(name: impl Into<String>, duration_ms: u64, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            duration_ms,
            failure_detail: Some(detail.into()),
        }
    }
}

/// One failing case in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FailureEntry {
    pub name: String,
    pub detail: String,
}

/// Aggregated result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryReport {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub total_duration_ms: u64,
    pub failures: Vec<FailureEntry>,
}

impl SummaryReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Human-readable rendering. Passing cases are counted, not itemized.
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let verdict = if self.all_passed() { "PASS" } else { "FAIL" };
        let mut out = format!(
            "{verdict}: {} cases, {} passed, {} failed ({} ms)\n",
            self.total, self.passed, self.failed, self.total_duration_ms
        );
        if !self.failures.is_empty() {
            out.push_str("\nFailures:\n");
            for failure in &self.failures {
                out.push_str(&format!("  - {}: {}\n", failure.name, failure.detail));
            }
        }
        out
    }
}

/// Reporter lifecycle misuse. Fatal to the run, never retried.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("on_test_end(\"{name}\") without a matching on_test_start")]
    EndWithoutStart { name: String },
    #[error("reporter already finalized")]
    AlreadyFinalized,
    #[error("{count} case(s) still in flight at on_suite_end")]
    UnfinishedCases { count: usize },
    #[error("case worker panicked")]
    WorkerPanicked,
}

#[derive(Default)]
struct ReporterState {
    in_flight: HashMap<String, usize>,
    outcomes: Vec<TestOutcome>,
    finished: bool,
}

/// Collects outcomes for one run. Initialized once before the first case,
/// finalized exactly once after the last.
#[derive(Default)]
pub struct Reporter {
    state: Mutex<ReporterState>,
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReporterState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record that a case has started.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::AlreadyFinalized`] after `on_suite_end`.
    pub fn on_test_start(&self, name: &str) -> Result<(), SuiteError> {
        let mut state = self.lock();
        if state.finished {
            return Err(SuiteError::AlreadyFinalized);
        }
        *state.in_flight.entry(name.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Record a finished case.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::EndWithoutStart`] if no matching
    /// `on_test_start` was recorded, or [`SuiteError::AlreadyFinalized`]
    /// after `on_suite_end`.
    pub fn on_test_end(&self, outcome: TestOutcome) -> Result<(), SuiteError> {
        let mut state = self.lock();
        if state.finished {
            return Err(SuiteError::AlreadyFinalized);
        }
        let started = state.in_flight.get(&outcome.name).copied().unwrap_or(0);
        if started == 0 {
            return Err(SuiteError::EndWithoutStart { name: outcome.name });
        }
        if started == 1 {
            state.in_flight.remove(&outcome.name);
        } else {
            state.in_flight.insert(outcome.name.clone(), started - 1);
        }
        state.outcomes.push(outcome);
        Ok(())
    }

    /// Finalize and produce the summary. Tolerates zero recorded cases.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::AlreadyFinalized`] on a second call, or
    /// [`SuiteError::UnfinishedCases`] if some case never reported an
    /// outcome.
    pub fn on_suite_end(&self) -> Result<SummaryReport, SuiteError> {
        let mut state = self.lock();
        if state.finished {
            return Err(SuiteError::AlreadyFinalized);
        }
        if !state.in_flight.is_empty() {
            return Err(SuiteError::UnfinishedCases {
                count: state.in_flight.values().sum(),
            });
        }
        state.finished = true;

        let total = state.outcomes.len() as u64;
        let passed = state.outcomes.iter().filter(|o| o.passed).count() as u64;
        let total_duration_ms = state.outcomes.iter().map(|o| o.duration_ms).sum();
        let failures = state
            .outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| FailureEntry {
                name: o.name.clone(),
                detail: o
                    .failure_detail
                    .clone()
                    .unwrap_or_else(|| "unspecified failure".to_string()),
            })
            .collect();

        Ok(SummaryReport {
            total,
            passed,
            failed: total - passed,
            total_duration_ms,
            failures,
        })
    }
}
