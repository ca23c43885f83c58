//! restcheck-core: request descriptors, response assertions, and suite reporting
//!
//! This crate provides the pure, I/O-free half of the harness: immutable
//! request specifications and their builder, response records, the JSON
//! assertion engine (subset and exact matching with pattern/type
//! placeholders), and the reporter that turns per-case outcomes into a
//! suite summary.

pub mod config;
pub mod expect;
pub mod report;
pub mod request;
pub mod response;
pub mod schema;

pub use config::{Config, ConfigError};
pub use expect::{
    AssertionError, Expectation, ExpectationSet, MatchMode, Mismatch, Template, TemplateError,
    TypeKind,
};
pub use report::{Reporter, SuiteError, SummaryReport, TestOutcome};
pub use request::{BuildError, Method, RequestBuilder, RequestSpec};
pub use response::{ResponseBody, ResponseRecord};
