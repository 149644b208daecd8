//! HTTP template source: serves URL-shaped template paths over HTTP GET.
//!
//! Plugs into a templating host's provider mechanism: the host asks for a
//! template's modification time and content, and this source answers by
//! fetching the template from its URL instead of reading local disk.
//!
//! # Architecture
//!
//! ```text
//! Host engine
//!   │  last_modified(path) / fetch(path) / fetch_content(path)
//!   ▼
//! HttpTemplateSource ──► BaseProvider (include path, debug flag)
//!   │
//!   │  fix_scheme + is_url guard
//!   ▼
//! HttpClient (lazy, built once per source) ──► GET <url>
//!   │
//!   ▼
//! FetchResult { content, error, modified }
//! ```
//!
//! Failures are data, never panics or `Err` at the provider surface: a
//! missing path, a non-URL path or a failed request all come back as an
//! absent value or an error inside `FetchResult`.
//!
//! A successful GET counts as "modified now", so hosts that compare
//! modification times will refetch every time.

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod source;
pub mod url;

pub use client::{ClientFactory, HttpClient, HttpResponse};
pub use config::{ProviderConfig, SourceOptions};
pub use error::{Result, SourceError};
pub use provider::{BaseProvider, FetchResult, TemplateProvider};
pub use source::HttpTemplateSource;
