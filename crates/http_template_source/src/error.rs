use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no path specified")]
    NoPath,

    #[error("not a URL")]
    NotUrl,

    /// Non-2xx response; carries the status line, e.g. `404 Not Found`.
    #[error("error with request: {0}")]
    Status(String),

    /// Transport-level failure (DNS, connect, TLS, body decode).
    #[error("error with request: {0}")]
    Request(String),

    #[error("http client: {0}")]
    Client(String),

    #[error("template not found: {0}")]
    NotFound(String),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
