use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::{ClientFactory, HttpClient};
use crate::error::Result;

/// Configuration mapping handed over by the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Ordered candidate locations (filesystem paths and URL prefixes).
    #[serde(rename = "INCLUDE_PATH", default)]
    pub include_path: Vec<String>,
    /// Trace each provider call at debug level.
    #[serde(rename = "DEBUG", default)]
    pub debug: bool,
}

impl ProviderConfig {
    /// Parse a JSON configuration mapping. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_include_path<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_path = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Everything `HttpTemplateSource::configure` accepts: the serializable
/// mapping plus the live client handles that cannot be serialized.
#[derive(Default)]
pub struct SourceOptions {
    pub config: ProviderConfig,
    /// Pre-built client to reuse instead of constructing one lazily.
    pub client: Option<Arc<dyn HttpClient>>,
    /// Overrides how the lazy client is built.
    pub client_factory: Option<ClientFactory>,
}

impl SourceOptions {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_client_factory(mut self, factory: ClientFactory) -> Self {
        self.client_factory = Some(factory);
        self
    }
}

impl std::fmt::Debug for SourceOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceOptions")
            .field("config", &self.config)
            .field("client", &self.client.is_some())
            .field("client_factory", &self.client_factory.is_some())
            .finish()
    }
}
