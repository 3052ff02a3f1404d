use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("API error: {0}")]
    Api(String),

    /// The remote service answered with an explicit rate-limit status.
    /// Handled by backing off, never propagated out of an adapter.
    #[error("rate limited by remote service")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}
