//! HTTP client seam.
//!
//! The source only ever issues a plain GET and needs three things back:
//! the numeric status, the status line for error reporting, and the body
//! decoded as text. `HttpClient` captures exactly that so hosts can hand in
//! their own configured client (timeouts, proxies, TLS roots) and tests can
//! substitute an in-memory one.

use std::sync::Arc;

use crate::error::{Result, SourceError};

/// Blocking GET client shared by every call on a source instance.
///
/// Implementations must tolerate concurrent use: the host may call the
/// source from several worker threads at once.
pub trait HttpClient: Send + Sync {
    /// Issue a GET to `url`. Transport failures are `SourceError::Request`;
    /// any HTTP response, including non-2xx, is `Ok`.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Builds the lazily-constructed client on first use.
pub type ClientFactory = Box<dyn Fn() -> Result<Arc<dyn HttpClient>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// e.g. `404 Not Found`
    pub status_line: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_line: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_line: status_line.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(feature = "http")]
impl HttpClient for reqwest::blocking::Client {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = reqwest::blocking::Client::get(self, url)
            .send()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = resp.status();
        // charset from Content-Type, UTF-8 otherwise
        let body = resp
            .text()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        Ok(HttpResponse::new(status.as_u16(), status.to_string(), body))
    }
}

/// The factory used when the host supplies neither a client nor a factory.
pub fn default_factory() -> ClientFactory {
    Box::new(build_default_client)
}

#[cfg(feature = "http")]
fn build_default_client() -> Result<Arc<dyn HttpClient>> {
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| SourceError::Client(e.to_string()))?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "http"))]
fn build_default_client() -> Result<Arc<dyn HttpClient>> {
    Err(SourceError::Client(
        "no default client: enable the `http` feature or supply one".into(),
    ))
}
