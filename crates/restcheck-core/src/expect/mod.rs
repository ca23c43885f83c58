//! Response assertion engine — templates, matching, and expectation sets

mod matcher;
mod set;
mod template;

pub use matcher::{MatchMode, Mismatch};
pub use set::{AssertionError, Expectation, ExpectationSet};
pub use template::{Template, TemplateError, TypeKind};
