//! HTTP execution — one spec in, one response or a transport error out
//!
//! Exactly one send per invocation. There is no retry policy: many cases
//! assert on 4xx responses as the expected outcome, and an automatic
//! retry would corrupt test intent.

use std::time::Duration;

use restcheck_core::request::{Method, RequestSpec};
use restcheck_core::response::{ResponseBody, ResponseRecord};

/// Transport-level failure. Surfaced as the failing case's detail,
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("http client: {0}")]
    Client(String),
}

impl NetworkError {
    fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Blocking HTTP executor shared by all cases of a run.
pub struct Executor {
    client: reqwest::blocking::Client,
}

impl Executor {
    /// Build the underlying client.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Client`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, NetworkError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| NetworkError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Send a spec and capture the response.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on timeout, connection failure, or any
    /// other transport error.
    pub fn send(&self, spec: &RequestSpec) -> Result<ResponseRecord, NetworkError> {
        self.send_capped(spec, None)
    }

    /// Send with an optional ceiling on the spec's timeout. The suite
    /// runner uses this to bound in-flight calls by the run deadline.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] on timeout, connection failure, or any
    /// other transport error.
    pub fn send_capped(
        &self,
        spec: &RequestSpec,
        cap: Option<Duration>,
    ) -> Result<ResponseRecord, NetworkError> {
        let timeout = match cap {
            Some(cap) => spec.timeout().min(cap),
            None => spec.timeout(),
        };

        let mut request = self
            .client
            .request(to_reqwest(spec.method()), spec.url())
            .timeout(timeout);
        for (name, value) in spec.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = spec.body() {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| NetworkError::from_reqwest(spec.url(), &e))?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let bytes = response
            .bytes()
            .map_err(|e| NetworkError::from_reqwest(spec.url(), &e))?;
        let body = if bytes.is_empty() {
            ResponseBody::Empty
        } else if let Ok(value) = serde_json::from_slice(&bytes) {
            ResponseBody::Json(value)
        } else {
            ResponseBody::Raw(bytes.to_vec())
        };

        Ok(ResponseRecord {
            status_code,
            headers,
            body,
        })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        Executor::new().unwrap();
    }

    #[test]
    fn connection_refused_maps_to_connect_error() {
        let executor = Executor::new().unwrap();
        let spec = RequestSpec::get("http://127.0.0.1:1/unreachable")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Nothing listens on port 1; an Ok here means an intercepting
        // proxy answered and there is nothing to assert.
        let Err(err) = executor.send(&spec) else { return };
        match err {
            NetworkError::Connect { url, .. } => assert!(url.contains("127.0.0.1:1")),
            NetworkError::Timeout { .. } | NetworkError::Transport { .. } => {}
            other => panic!("unexpected error: {other}"),
        }
    }
}
