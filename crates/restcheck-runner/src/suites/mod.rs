//! Built-in suites against the public demo APIs
//!
//! None of these implement the services they exercise; every system
//! under check is an external collaborator reached over HTTPS.

pub mod blog;
pub mod inventory;
pub mod library;
pub mod store;

use restcheck_core::config::Config;

use crate::suite::Suite;

/// All built-in suites, pointed at the configured base URLs.
#[must_use]
pub fn all(config: &Config) -> Vec<Suite> {
    vec![
        store::suite(&config.store_url),
        inventory::suite(&config.inventory_url),
        library::suite(&config.library_url),
        blog::suite(&config.blog_url),
    ]
}
