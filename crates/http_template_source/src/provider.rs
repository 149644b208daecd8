//! Host-side provider contract.
//!
//! A templating host asks each configured provider two questions about a
//! template path: "when was it last modified?" and "give me its content".
//! Providers answer with data, never by failing; the host decides whether
//! an absent answer means "try the next provider" or "template not found".

use chrono::{DateTime, Utc};

use crate::config::ProviderConfig;
use crate::error::{Result, SourceError};
use crate::url::{fix_scheme, is_url};

/// Outcome of a content fetch: content and timestamp on success, an error
/// otherwise. Never both.
#[derive(Debug)]
pub struct FetchResult {
    inner: Result<(String, DateTime<Utc>)>,
}

impl FetchResult {
    pub fn ok(content: String, modified: DateTime<Utc>) -> Self {
        Self {
            inner: Ok((content, modified)),
        }
    }

    pub fn failed(error: SourceError) -> Self {
        Self { inner: Err(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn content(&self) -> Option<&str> {
        self.inner.as_ref().ok().map(|(content, _)| content.as_str())
    }

    pub fn error(&self) -> Option<&SourceError> {
        self.inner.as_ref().err()
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.inner.as_ref().ok().map(|(_, modified)| *modified)
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn into_content(self) -> Option<String> {
        self.inner.ok().map(|(content, _)| content)
    }

    /// Collapse into a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> Result<(String, DateTime<Utc>)> {
        self.inner
    }
}

/// The capability set a host expects from a template source.
pub trait TemplateProvider: Send + Sync {
    /// Modification time of `path`, or `None` when it is unknown or the
    /// template cannot be reached.
    fn last_modified(&self, path: Option<&str>) -> Option<DateTime<Utc>>;

    /// Full (content, error, modified) answer for `path`.
    fn fetch(&self, path: Option<&str>) -> FetchResult;

    /// Ordered locations searched by `load`.
    fn include_path(&self) -> &[String];

    /// Content only; `None` on any failure.
    fn fetch_content(&self, path: Option<&str>) -> Option<String> {
        self.fetch(path).into_content()
    }

    /// Resolve `name` against the include path and fetch the first hit.
    ///
    /// URL-shaped names bypass the include path. When every candidate fails
    /// the last failure is returned.
    fn load(&self, name: &str) -> FetchResult {
        if name.is_empty() {
            return self.fetch(None);
        }
        if is_url(&fix_scheme(name)) {
            return self.fetch(Some(name));
        }

        let mut last = None;
        for candidate in join_candidates(self.include_path(), name) {
            let result = self.fetch(Some(candidate.as_str()));
            if result.is_ok() {
                return result;
            }
            last = Some(result);
        }
        last.unwrap_or_else(|| FetchResult::failed(SourceError::NotFound(name.to_string())))
    }
}

/// `prefix` + `/` + `name`, with exactly one slash at the seam.
pub fn join_candidates(include_path: &[String], name: &str) -> Vec<String> {
    let name = name.trim_start_matches('/');
    include_path
        .iter()
        .map(|prefix| format!("{}/{}", prefix.trim_end_matches('/'), name))
        .collect()
}

/// Standard provider setup shared by every concrete source.
#[derive(Debug, Clone, Default)]
pub struct BaseProvider {
    include_path: Vec<String>,
    debug: bool,
}

impl BaseProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            include_path: config.include_path.clone(),
            debug: config.debug,
        }
    }

    pub fn include_path(&self) -> &[String] {
        &self.include_path
    }

    pub fn set_include_path(&mut self, paths: Vec<String>) {
        self.include_path = paths;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
