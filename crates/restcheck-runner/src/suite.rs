//! Suite orchestration — sequential or parallel case execution
//!
//! Cases are independent; the only shared state is the reporter, which
//! appends in arrival order. A run deadline caps in-flight request
//! timeouts, and cases reached after it are recorded with an abort
//! marker rather than touching the network.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use restcheck_core::config::Config;
use restcheck_core::report::{Reporter, SuiteError, TestOutcome};

use crate::case::{Case, CaseCtx};
use crate::executor::{Executor, NetworkError};

/// A named, ordered collection of cases.
#[derive(Debug)]
pub struct Suite {
    name: String,
    cases: Vec<Case>,
}

impl Suite {
    #[must_use]
    pub fn new(name: impl Into<String>, cases: Vec<Case>) -> Self {
        Self {
            name: name.into(),
            cases,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Execute cases on one scoped thread each instead of sequentially.
    pub parallel: bool,
    /// Base seed; case `i` derives its RNG from `seed + i`.
    pub seed: u64,
    /// Ceiling for per-request timeouts.
    pub timeout: Option<Duration>,
    /// Whole-run deadline, measured from the first `run` call.
    pub deadline: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            seed: 0,
            timeout: None,
            deadline: None,
        }
    }
}

/// Drives suites against one executor and reporter.
pub struct SuiteRunner {
    executor: Executor,
    options: RunOptions,
    deadline_at: Option<Instant>,
}

impl SuiteRunner {
    #[must_use]
    pub fn new(executor: Executor, options: RunOptions) -> Self {
        let deadline_at = options.deadline.map(|d| Instant::now() + d);
        Self {
            executor,
            options,
            deadline_at,
        }
    }

    /// Build a runner from project configuration. Draws a random seed
    /// when the config leaves it unset.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, NetworkError> {
        let seed = config
            .seed
            .unwrap_or_else(|| SmallRng::from_entropy().r#gen());
        let options = RunOptions {
            parallel: config.parallel,
            seed,
            timeout: Some(Duration::from_millis(config.timeout_ms)),
            deadline: config.deadline_ms.map(Duration::from_millis),
        };
        Ok(Self::new(Executor::new()?, options))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.options.seed
    }

    /// Run every case of `suite`, reporting each outcome.
    ///
    /// Case failures are recorded, not propagated; only reporter misuse
    /// (or a panicking case worker) aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] on reporter lifecycle violations.
    pub fn run(&self, suite: &Suite, reporter: &Reporter) -> Result<(), SuiteError> {
        eprintln!("Running {} ({} cases)...", suite.name(), suite.len());

        let failed = if self.options.parallel {
            self.run_parallel(suite, reporter)?
        } else {
            let mut failed = 0u32;
            for (index, case) in suite.cases().iter().enumerate() {
                if !self.run_case(case, index, reporter)? {
                    failed += 1;
                }
            }
            failed
        };

        if failed > 0 {
            eprintln!("  {}: {failed}/{} cases failed", suite.name(), suite.len());
        } else {
            eprintln!("  {}: OK ({} cases)", suite.name(), suite.len());
        }
        Ok(())
    }

    fn run_parallel(&self, suite: &Suite, reporter: &Reporter) -> Result<u32, SuiteError> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = suite
                .cases()
                .iter()
                .enumerate()
                .map(|(index, case)| scope.spawn(move || self.run_case(case, index, reporter)))
                .collect();

            let mut failed = 0u32;
            for handle in handles {
                let passed = handle.join().map_err(|_| SuiteError::WorkerPanicked)??;
                if !passed {
                    failed += 1;
                }
            }
            Ok(failed)
        })
    }

    /// Run one case and report its outcome. Returns whether it passed.
    fn run_case(
        &self,
        case: &Case,
        index: usize,
        reporter: &Reporter,
    ) -> Result<bool, SuiteError> {
        reporter.on_test_start(case.name())?;

        let rng = SmallRng::seed_from_u64(self.options.seed.wrapping_add(index as u64));
        let mut ctx = CaseCtx::new(&self.executor, rng, self.options.timeout, self.deadline_at);

        let started = Instant::now();
        let result = case.execute(&mut ctx);
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(()) => TestOutcome::passed(case.name(), duration_ms),
            Err(e) => TestOutcome::failed(case.name(), duration_ms, e.to_string()),
        };
        let passed = outcome.passed;
        reporter.on_test_end(outcome)?;
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::StepError;
    use restcheck_core::expect::ExpectationSet;
    use restcheck_core::request::RequestSpec;

    fn runner(options: RunOptions) -> SuiteRunner {
        SuiteRunner::new(Executor::new().unwrap(), options)
    }

    fn noop_suite(count: usize) -> Suite {
        let cases = (0..count)
            .map(|i| Case::new(format!("case-{i}"), |_| Ok(())))
            .collect();
        Suite::new("noop", cases)
    }

    #[test]
    fn sequential_run_reports_every_case() {
        let runner = runner(RunOptions::default());
        let reporter = Reporter::new();
        runner.run(&noop_suite(3), &reporter).unwrap();

        let summary = reporter.on_suite_end().unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn parallel_run_reports_every_case() {
        let runner = runner(RunOptions {
            parallel: true,
            ..Default::default()
        });
        let reporter = Reporter::new();
        runner.run(&noop_suite(6), &reporter).unwrap();

        let summary = reporter.on_suite_end().unwrap();
        assert_eq!(summary.total, 6);
        assert!(summary.all_passed());
    }

    #[test]
    fn failing_case_does_not_abort_siblings() {
        let cases = vec![
            Case::new("breaks", |_| {
                Err(StepError::MissingField("id".to_string()))
            }),
            Case::new("still runs", |_| Ok(())),
        ];
        let runner = runner(RunOptions::default());
        let reporter = Reporter::new();
        runner.run(&Suite::new("mixed", cases), &reporter).unwrap();

        let summary = reporter.on_suite_end().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failures[0].name, "breaks");
        assert!(summary.failures[0].detail.contains("missing field"));
    }

    #[test]
    fn expired_deadline_marks_cases_without_network_calls() {
        let cases = vec![Case::new("would hit the network", |ctx| {
            let spec = RequestSpec::get("http://192.0.2.1/items").build()?;
            ctx.check(spec, ExpectationSet::new().status(200))?;
            Ok(())
        })];
        let runner = runner(RunOptions {
            deadline: Some(Duration::ZERO),
            ..Default::default()
        });
        let reporter = Reporter::new();
        runner
            .run(&Suite::new("deadline", cases), &reporter)
            .unwrap();

        let summary = reporter.on_suite_end().unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.failures[0].detail,
            "aborted: suite deadline exceeded"
        );
    }

    #[test]
    fn case_rng_is_derived_from_run_seed() {
        use std::sync::Mutex;

        let drawn = std::sync::Arc::new(Mutex::new(Vec::new()));
        let make_suite = |sink: std::sync::Arc<Mutex<Vec<u64>>>| {
            Suite::new(
                "seeded",
                vec![Case::new("draws", move |ctx| {
                    let value: u64 = ctx.rng().r#gen();
                    match sink.lock() {
                        Ok(mut values) => values.push(value),
                        Err(poisoned) => poisoned.into_inner().push(value),
                    }
                    Ok(())
                })],
            )
        };

        for _ in 0..2 {
            let runner = runner(RunOptions {
                seed: 99,
                ..Default::default()
            });
            let reporter = Reporter::new();
            runner
                .run(&make_suite(drawn.clone()), &reporter)
                .unwrap();
            reporter.on_suite_end().unwrap();
        }

        let values = drawn.lock().unwrap();
        assert_eq!(values[0], values[1]);
    }
}
