//! restcheck-runner: fake data, HTTP execution, and suite orchestration

pub mod case;
pub mod datagen;
pub mod executor;
pub mod suite;
pub mod suites;

pub use case::{Case, CaseCtx, StepError};
pub use executor::{Executor, NetworkError};
pub use suite::{RunOptions, Suite, SuiteRunner};
