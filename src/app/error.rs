use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid limit: {0} (must be at least 1)")]
    InvalidLimit(usize),

    #[error("Duplicate source id: {0}")]
    DuplicateSource(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GazetteError>;

/// Failure of a single source during aggregation. Recorded, never surfaced
/// by the query operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] crate::fetcher::FetchError),

    #[error("unexpected payload: {0}")]
    ParseFailed(String),
}
