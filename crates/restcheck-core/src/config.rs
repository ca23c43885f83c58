//! Project configuration for check runs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_store_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_inventory_url() -> String {
    "https://apichallenges.eviltester.com/simpleapi".to_string()
}

fn default_library_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_blog_url() -> String {
    "https://thetestrequest.com".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_report() -> bool {
    true
}

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the fake e-commerce store API
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Base URL of the simple inventory API
    #[serde(default = "default_inventory_url")]
    pub inventory_url: String,

    /// Base URL of the public library catalog
    #[serde(default = "default_library_url")]
    pub library_url: String,

    /// Base URL of the fake blog API
    #[serde(default = "default_blog_url")]
    pub blog_url: String,

    /// Ceiling for per-request timeouts, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whole-run deadline in milliseconds (disabled by default)
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Run cases within a suite in parallel
    #[serde(default)]
    pub parallel: bool,

    /// Seed for generated payloads (random per run when unset)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Persist a report for every run
    #[serde(default = "default_report")]
    pub report: bool,

    /// Directory for reports (default: "~/.restcheck/reports")
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            inventory_url: default_inventory_url(),
            library_url: default_library_url(),
            blog_url: default_blog_url(),
            timeout_ms: default_timeout_ms(),
            deadline_ms: None,
            parallel: false,
            seed: None,
            report: true,
            report_dir: None,
        }
    }
}

impl Config {
    /// Load config from file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed, or if the
    /// timeout is zero.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from default location (.restcheck.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = [".restcheck.toml", ".restcheck.json", "restcheck.toml"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        // No config file, return default
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Create example config file
    pub fn example() -> &'static str {
        r#"# restcheck configuration

# Base URLs of the services under check
store_url = "https://fakestoreapi.com"
inventory_url = "https://apichallenges.eviltester.com/simpleapi"
library_url = "https://openlibrary.org"
blog_url = "https://thetestrequest.com"

# Ceiling for per-request timeouts, in milliseconds
timeout_ms = 30000

# Whole-run deadline in milliseconds (disabled by default)
# deadline_ms = 120000

# Run cases within a suite in parallel (default: false)
# parallel = true

# Seed for generated payloads; set for reproducible fixtures
# seed = 42

# Persist a report for every run (default: true)
# report = false
# report_dir = "/tmp/restcheck-reports"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("timeout_ms must be nonzero")]
    InvalidTimeout,
}
