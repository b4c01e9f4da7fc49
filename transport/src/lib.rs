//! Private HTTP transport for Bravia device communication
//!
//! This crate provides the minimal blocking HTTP layer used by `bravia-api` to
//! talk to a Sony Bravia television. It knows nothing about the JSON-RPC or
//! IRCC payloads; it only posts a body to a path on the device and hands the
//! raw response back.
//!
//! The [`Transport`] trait is the seam the higher layers depend on, so tests
//! and embedders can inject their own implementation.

mod error;

pub use error::TransportError;

use std::fmt;
use std::time::Duration;

/// Default timeout for connecting to and reading from the television
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Content-Type` header, empty when absent
    pub content_type: String,
    /// Response body decoded as UTF-8
    pub body: String,
}

/// A blocking request/response channel to a single device
///
/// Implementations must treat every call independently: there is no session,
/// and a failed call leaves nothing behind that a later call depends on.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Post `body` to `path` on the device with the given extra headers
    fn post(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError>;

    /// The `host[:port]` this transport talks to
    fn host(&self) -> &str;
}

/// `ureq`-backed transport for a television reachable at `http://<host>`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    host: String,
}

impl HttpTransport {
    /// Create a transport with the default 5 second timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_timeout(host, DEFAULT_TIMEOUT)
    }

    /// Create a transport whose connect and read timeouts are both `timeout`
    pub fn with_timeout(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout_read(timeout)
                .build(),
            host: host.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.host, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn post(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url(path);

        let mut request = self.agent.post(&url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.send_string(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!(url = %url, status = code, "device returned error status");
                let body = response.into_string().unwrap_or_default();
                return Err(TransportError::Status { code, body });
            }
            Err(ureq::Error::Transport(e)) => {
                tracing::debug!(url = %url, error = %e, "device unreachable");
                return Err(TransportError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let content_type = response.content_type().to_string();
        let body = response
            .into_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    fn host(&self) -> &str {
        &self.host
    }
}
