//! HTTP template source.
//!
//! Serves templates whose path is an `http(s)://` URL by issuing one
//! blocking GET per call. A successful GET is reported as "modified now":
//! there is no separate metadata request, so hosts comparing modification
//! times will always see a fresh template.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

use crate::client::{default_factory, ClientFactory, HttpClient, HttpResponse};
use crate::config::{ProviderConfig, SourceOptions};
use crate::error::{Result, SourceError};
use crate::provider::{BaseProvider, FetchResult, TemplateProvider};
use crate::url::{filter_urls, fix_scheme, is_url};

pub struct HttpTemplateSource {
    base: BaseProvider,
    client: OnceCell<Arc<dyn HttpClient>>,
    factory: ClientFactory,
}

impl HttpTemplateSource {
    /// Shorthand for `configure` with no pre-built client.
    pub fn new(config: ProviderConfig) -> Self {
        Self::configure(SourceOptions::new(config))
    }

    /// Base setup first, then drop every include-path entry that is not a
    /// URL. A supplied client is stored as-is and never rebuilt.
    pub fn configure(options: SourceOptions) -> Self {
        let SourceOptions {
            config,
            client,
            client_factory,
        } = options;

        let mut base = BaseProvider::new(&config);
        let urls = filter_urls(base.include_path().iter().cloned());
        base.set_include_path(urls);

        Self {
            base,
            client: client.map(OnceCell::with_value).unwrap_or_default(),
            factory: client_factory.unwrap_or_else(default_factory),
        }
    }

    pub fn base(&self) -> &BaseProvider {
        &self.base
    }

    /// The shared client, built on first use. Concurrent first calls build
    /// at most one; a failed build is not cached.
    pub fn http_client(&self) -> Result<Arc<dyn HttpClient>> {
        self.client.get_or_try_init(|| (self.factory)()).cloned()
    }

    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.http_client()?.get(url)?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(SourceError::Status(response.status_line))
        }
    }
}

impl TemplateProvider for HttpTemplateSource {
    fn last_modified(&self, path: Option<&str>) -> Option<DateTime<Utc>> {
        if self.base.debug() {
            debug!(?path, "last_modified");
        }
        let path = path.filter(|p| !p.is_empty())?;
        let url = fix_scheme(path);

        match self.get(&url) {
            Ok(_) => Some(Utc::now()),
            Err(e) => {
                debug!(%url, error = %e, "last_modified failed");
                None
            }
        }
    }

    fn fetch(&self, path: Option<&str>) -> FetchResult {
        if self.base.debug() {
            debug!(?path, "fetch");
        }
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            return FetchResult::failed(SourceError::NoPath);
        };
        let url = fix_scheme(path);
        if !is_url(&url) {
            return FetchResult::failed(SourceError::NotUrl);
        }

        match self.get(&url) {
            Ok(response) => FetchResult::ok(response.body, Utc::now()),
            Err(e) => {
                debug!(%url, error = %e, "fetch failed");
                FetchResult::failed(e)
            }
        }
    }

    fn include_path(&self) -> &[String] {
        self.base.include_path()
    }
}

impl std::fmt::Debug for HttpTemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTemplateSource")
            .field("base", &self.base)
            .field("client_ready", &self.client.get().is_some())
            .finish()
    }
}
