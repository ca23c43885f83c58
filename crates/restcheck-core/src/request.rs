//! Request descriptors — immutable specs built through a fluent builder
//!
//! A `RequestSpec` is validated at build time: malformed specs fail with
//! `BuildError` before anything touches the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-request timeout, matching the suites' historical default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP method subset used by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable HTTP request descriptor.
///
/// Built through [`RequestBuilder`]; once built it cannot be modified.
/// Invariants: the URL is an absolute http(s) URI with a non-empty host,
/// and the timeout is nonzero.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    timeout: Duration,
}

impl RequestSpec {
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::Get).url(url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::Post).url(url)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::Put).url(url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::Delete).url(url)
    }

    #[must_use]
    pub fn patch(url: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::Patch).url(url)
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Fluent builder for [`RequestSpec`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    url: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body. The executor sends it with
    /// `Content-Type: application/json`.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and freeze the spec.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the method or URL is missing, the URL is
    /// not an absolute http(s) URI, or the timeout is zero.
    pub fn build(self) -> Result<RequestSpec, BuildError> {
        let method = self.method.ok_or(BuildError::MissingMethod)?;
        let url = self.url.ok_or(BuildError::MissingUrl)?;
        validate_url(&url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(BuildError::ZeroTimeout);
        }

        Ok(RequestSpec {
            method,
            url,
            headers: self.headers,
            body: self.body,
            timeout,
        })
    }
}

/// Check that `url` is an absolute http(s) URI with a non-empty host.
fn validate_url(url: &str) -> Result<(), BuildError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| BuildError::InvalidUrl {
            url: url.to_string(),
            reason: "expected an absolute http:// or https:// URI",
        })?;

    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        return Err(BuildError::InvalidUrl {
            url: url.to_string(),
            reason: "empty host",
        });
    }
    if host.contains(char::is_whitespace) {
        return Err(BuildError::InvalidUrl {
            url: url.to_string(),
            reason: "whitespace in host",
        });
    }
    Ok(())
}

/// A malformed spec, caught at build time.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("request has no method")]
    MissingMethod,
    #[error("request has no URL")]
    MissingUrl,
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: &'static str },
    #[error("timeout must be nonzero")]
    ZeroTimeout,
}
