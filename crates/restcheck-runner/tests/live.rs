//! Live end-to-end checks against the public APIs
//!
//! Ignored by default since they need outbound network access.
//! Run with: cargo test -p restcheck-runner --test live -- --ignored

use restcheck_core::config::Config;
use restcheck_core::report::Reporter;
use restcheck_runner::suites;
use restcheck_runner::SuiteRunner;

fn run_live(build: impl Fn(&Config) -> restcheck_runner::Suite) {
    let config = Config::default();
    let runner = SuiteRunner::from_config(&config).unwrap();
    let reporter = Reporter::new();
    runner.run(&build(&config), &reporter).unwrap();
    let summary = reporter.on_suite_end().unwrap();
    assert!(
        summary.all_passed(),
        "failures: {:#?}",
        summary.failures
    );
}

#[test]
#[ignore = "requires network access to the public store API"]
fn store_suite_passes_against_the_live_service() {
    run_live(|c| suites::store::suite(&c.store_url));
}

#[test]
#[ignore = "requires network access to the public inventory API"]
fn inventory_suite_passes_against_the_live_service() {
    run_live(|c| suites::inventory::suite(&c.inventory_url));
}

#[test]
#[ignore = "requires network access to the public library catalog"]
fn library_suite_passes_against_the_live_service() {
    run_live(|c| suites::library::suite(&c.library_url));
}

#[test]
#[ignore = "requires network access to the public blog API"]
fn blog_suite_passes_against_the_live_service() {
    run_live(|c| suites::blog::suite(&c.blog_url));
}
